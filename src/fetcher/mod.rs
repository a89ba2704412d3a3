pub mod http_fetcher;
pub mod service;

use async_trait::async_trait;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;
pub use service::{FeedOutcome, FeedService};

#[async_trait]
pub trait Fetcher {
    /// GET `url` and return the response body. Transport failures and
    /// non-success statuses are errors.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
