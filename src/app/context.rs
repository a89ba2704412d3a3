use std::sync::Arc;

use crate::app::error::Result;
use crate::cache::CacheStore;
use crate::config::Config;
use crate::domain::TopicRegistry;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::{FeedService, Fetcher};
use crate::launcher::{ArticleLauncher, BrowserOpener, SystemBrowser, UrlValidator};

pub struct AppContext {
    pub feeds: FeedService,
    pub launcher: ArticleLauncher,
    pub top_n: usize,
}

impl AppContext {
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::with_options(
            &config.user_agent,
            config.timeout(),
        )?);

        Self::with_parts(config, fetcher, Box::new(SystemBrowser))
    }

    pub fn with_parts(
        config: &Config,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        browser: Box<dyn BrowserOpener + Send + Sync>,
    ) -> Result<Self> {
        let registry = TopicRegistry::new(
            config
                .topics
                .iter()
                .map(|t| (t.name.clone(), t.url.clone())),
        )?;
        let cache = CacheStore::new(config.cache_duration());
        let validator = UrlValidator::new(config.allowed_domains.iter().cloned(), config.fallback());

        Ok(Self {
            feeds: FeedService::new(registry, fetcher, cache),
            launcher: ArticleLauncher::new(validator, browser),
            top_n: config.top_n,
        })
    }
}
