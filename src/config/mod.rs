//! Configuration management for Headwire.
//!
//! Configuration is read from `~/.config/headwire/config.toml` at startup
//! unless another path is given on the command line. If the default file
//! doesn't exist, a default configuration with comments is created.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::DEFAULT_CACHE_DURATION;
use crate::fetcher::http_fetcher::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::launcher::validator::{DEFAULT_ALLOWED_DOMAINS, DEFAULT_FALLBACK_DOMAIN};

/// Number of headlines shown per topic.
pub const DEFAULT_TOP_N: usize = 10;

const DEFAULT_TOPICS: &[(&str, &str)] = &[
    ("Top Stories", "https://timesofindia.indiatimes.com/rssfeedstopstories.cms"),
    ("India", "https://timesofindia.indiatimes.com/rssfeeds/-2128936835.cms"),
    ("World", "https://timesofindia.indiatimes.com/rssfeeds/296589292.cms"),
    ("Business", "https://timesofindia.indiatimes.com/rssfeeds/1898055.cms"),
    ("Sports", "https://timesofindia.indiatimes.com/rssfeeds/4719148.cms"),
    ("Tech", "https://timesofindia.indiatimes.com/rssfeeds/66949542.cms"),
    ("Entertainment", "https://timesofindia.indiatimes.com/rssfeeds/1081479906.cms"),
];

/// A named feed shown in the topic menu.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TopicConfig {
    pub name: String,
    pub url: String,
}

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds a fetched feed is served from memory
    pub cache_duration_secs: u64,
    /// Network timeout per request, in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Headlines shown per topic
    pub top_n: usize,
    /// Hosts (and their subdomains) that links may be opened on
    pub allowed_domains: Vec<String>,
    /// Also allow any host containing `fallback_domain`
    pub loose_domain_fallback: bool,
    pub fallback_domain: String,
    pub topics: Vec<TopicConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_duration_secs: DEFAULT_CACHE_DURATION.as_secs(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            top_n: DEFAULT_TOP_N,
            allowed_domains: DEFAULT_ALLOWED_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            loose_domain_fallback: true,
            fallback_domain: DEFAULT_FALLBACK_DOMAIN.to_string(),
            topics: DEFAULT_TOPICS
                .iter()
                .map(|(name, url)| TopicConfig {
                    name: name.to_string(),
                    url: url.to_string(),
                })
                .collect(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/headwire/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("headwire").join("config.toml"))
    }

    pub fn cache_duration(&self) -> Duration {
        Duration::from_secs(self.cache_duration_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The substring fallback for the link allow-list, if enabled.
    pub fn fallback(&self) -> Option<String> {
        if self.loose_domain_fallback {
            Some(self.fallback_domain.clone())
        } else {
            None
        }
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        let mut content = String::from(
            r##"# Headwire Configuration

# How long a fetched feed is reused before it is downloaded again (seconds)
cache_duration_secs = 300

# Network timeout for a feed request (seconds)
timeout_secs = 10

# Number of headlines listed per topic
top_n = 10

# Links are only opened when their host is one of these domains or a
# subdomain of one
allowed_domains = [
    "timesofindia.indiatimes.com",
    "www.timesofindia.indiatimes.com",
    "economictimes.indiatimes.com",
    "m.timesofindia.com",
]

# Additionally allow any host that contains `fallback_domain` anywhere.
# This is looser than the list above; set to false for suffix-only matching.
loose_domain_fallback = true
fallback_domain = "indiatimes.com"

# Topics, in menu order
"##,
        );

        for (name, url) in DEFAULT_TOPICS {
            content.push_str(&format!("\n[[topics]]\nname = \"{}\"\nurl = \"{}\"\n", name, url));
        }

        content
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
