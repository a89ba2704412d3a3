pub mod validator;

use std::fmt;

pub use validator::UrlValidator;

/// Something that can show a URL to the user, normally the system browser.
pub trait BrowserOpener {
    fn open(&self, url: &str) -> std::io::Result<()>;
}

/// Opens links with the platform's default handler via the `open` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl BrowserOpener for SystemBrowser {
    fn open(&self, url: &str) -> std::io::Result<()> {
        open::that(url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    EmptyUrl,
    HostNotAllowed,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::EmptyUrl => write!(f, "invalid URL"),
            BlockReason::HostNotAllowed => write!(f, "URL host not allowed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    Opened,
    Blocked(BlockReason),
    /// The browser could not be started; carries the reported cause
    Failed(String),
}

/// Gate between headline links and the browser.
pub struct ArticleLauncher {
    validator: UrlValidator,
    browser: Box<dyn BrowserOpener + Send + Sync>,
}

impl ArticleLauncher {
    pub fn new(validator: UrlValidator, browser: Box<dyn BrowserOpener + Send + Sync>) -> Self {
        Self { validator, browser }
    }

    /// Open `url` if it passes the allow-list. Browser failures are returned
    /// as [`LaunchOutcome::Failed`], never as errors.
    pub fn open_article(&self, url: &str) -> LaunchOutcome {
        if url.is_empty() {
            tracing::warn!("Refusing to open empty URL");
            return LaunchOutcome::Blocked(BlockReason::EmptyUrl);
        }

        if !self.validator.is_allowed(url) {
            tracing::warn!("Blocked URL with disallowed host: {}", url);
            return LaunchOutcome::Blocked(BlockReason::HostNotAllowed);
        }

        tracing::info!("Opening article: {}", url);
        match self.browser.open(url) {
            Ok(()) => LaunchOutcome::Opened,
            Err(e) => {
                tracing::warn!("Failed to open browser for {}: {}", url, e);
                LaunchOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct RecordingBrowser {
        opened: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl BrowserOpener for RecordingBrowser {
        fn open(&self, url: &str) -> std::io::Result<()> {
            self.opened.lock().unwrap().push(url.to_string());
            if self.fail {
                Err(std::io::Error::other("no browser found"))
            } else {
                Ok(())
            }
        }
    }

    fn launcher(browser: &RecordingBrowser) -> ArticleLauncher {
        ArticleLauncher::new(UrlValidator::default(), Box::new(browser.clone()))
    }

    #[test]
    fn test_empty_url_never_reaches_browser() {
        let browser = RecordingBrowser::default();

        let outcome = launcher(&browser).open_article("");

        assert_eq!(outcome, LaunchOutcome::Blocked(BlockReason::EmptyUrl));
        assert!(browser.opened.lock().unwrap().is_empty());
    }

    #[test]
    fn test_disallowed_host_never_reaches_browser() {
        let browser = RecordingBrowser::default();

        let outcome = launcher(&browser).open_article("https://evil.com/phish");

        assert_eq!(outcome, LaunchOutcome::Blocked(BlockReason::HostNotAllowed));
        assert!(browser.opened.lock().unwrap().is_empty());
    }

    #[test]
    fn test_allowed_url_is_opened() {
        let browser = RecordingBrowser::default();
        let url = "https://timesofindia.indiatimes.com/india/article.cms";

        let outcome = launcher(&browser).open_article(url);

        assert_eq!(outcome, LaunchOutcome::Opened);
        assert_eq!(*browser.opened.lock().unwrap(), vec![url.to_string()]);
    }

    #[test]
    fn test_browser_failure_is_reported_not_raised() {
        let browser = RecordingBrowser {
            fail: true,
            ..Default::default()
        };

        let outcome = launcher(&browser).open_article("https://timesofindia.indiatimes.com/x");

        assert_eq!(outcome, LaunchOutcome::Failed("no browser found".into()));
        assert_eq!(browser.opened.lock().unwrap().len(), 1);
    }
}
