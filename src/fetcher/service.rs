use std::sync::Arc;

use crate::app::{HeadwireError, Result};
use crate::cache::CacheStore;
use crate::domain::{Entry, TopicRegistry};
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedOutcome {
    /// Headlines in feed order, either fresh or from the cache
    Entries(Arc<[Entry]>),
    /// The feed parsed but contained no items; nothing was cached
    Empty,
}

/// Resolves topics to feeds, serving from the cache while it is fresh.
pub struct FeedService {
    registry: TopicRegistry,
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
    cache: CacheStore,
}

impl FeedService {
    pub fn new(
        registry: TopicRegistry,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        cache: CacheStore,
    ) -> Self {
        Self {
            registry,
            fetcher,
            normalizer: Normalizer::new(),
            cache,
        }
    }

    pub fn registry(&self) -> &TopicRegistry {
        &self.registry
    }

    pub fn list_topics(&self) -> Vec<&str> {
        self.registry.names()
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Headlines for `topic`.
    ///
    /// Makes at most one network request per topic per cache window. Network
    /// and parse failures leave the cache untouched, as does an empty feed.
    pub async fn fetch_feed(&mut self, topic: &str) -> Result<FeedOutcome> {
        let source = self
            .registry
            .get(topic)
            .ok_or_else(|| HeadwireError::UnknownTopic(topic.to_string()))?;

        if let Some(entries) = self.cache.get(topic) {
            tracing::debug!("Cache hit for {}", topic);
            return Ok(FeedOutcome::Entries(entries));
        }

        tracing::info!("Fetching {} from {}", topic, source.url);
        let body = self.fetcher.fetch(source.url.as_str()).await?;
        let entries = self.normalizer.normalize(&body)?;

        if entries.is_empty() {
            tracing::warn!("No entries found in feed for {}", topic);
            return Ok(FeedOutcome::Empty);
        }

        tracing::info!("Fetched {} entries for {}", entries.len(), topic);
        let entries: Arc<[Entry]> = entries.into();
        self.cache.put(topic, entries.clone());

        Ok(FeedOutcome::Entries(entries))
    }
}
