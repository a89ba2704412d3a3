use url::Url;

pub const DEFAULT_ALLOWED_DOMAINS: &[&str] = &[
    "timesofindia.indiatimes.com",
    "www.timesofindia.indiatimes.com",
    "economictimes.indiatimes.com",
    "m.timesofindia.com",
];

pub const DEFAULT_FALLBACK_DOMAIN: &str = "indiatimes.com";

/// Host allow-list for links handed to the browser.
///
/// A host passes if it equals an allowed domain or is a subdomain of one.
/// When a fallback is set, any host that merely contains the fallback string
/// also passes; this is looser than suffix matching (it accepts
/// `indiatimes.com.attacker.example`) and can be disabled in the config.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    allowed_domains: Vec<String>,
    fallback: Option<String>,
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new(
            DEFAULT_ALLOWED_DOMAINS.iter().map(|d| d.to_string()),
            Some(DEFAULT_FALLBACK_DOMAIN.to_string()),
        )
    }
}

impl UrlValidator {
    pub fn new<I>(allowed_domains: I, fallback: Option<String>) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            allowed_domains: allowed_domains
                .into_iter()
                .map(|d| d.to_ascii_lowercase())
                .collect(),
            fallback: fallback
                .filter(|f| !f.is_empty())
                .map(|f| f.to_ascii_lowercase()),
        }
    }

    pub fn is_allowed(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        let Some(host) = parsed.host_str() else {
            return false;
        };
        if host.is_empty() {
            return false;
        }

        let suffix_match = self.allowed_domains.iter().any(|allowed| {
            host == allowed
                || host
                    .strip_suffix(allowed.as_str())
                    .is_some_and(|rest| rest.ends_with('.'))
        });
        if suffix_match {
            return true;
        }

        self.fallback
            .as_deref()
            .is_some_and(|fallback| host.contains(fallback))
    }
}
