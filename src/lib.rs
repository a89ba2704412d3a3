//! # Headwire
//!
//! A terminal reader for Times of India headlines, organised by topic.
//!
//! ## Architecture
//!
//! ```text
//! Topic → Cache ─hit──────────────────────→ Entries → Top-N → Launcher → Browser
//!           └─miss→ Fetcher → Normalizer ─→ Cache ┘
//! ```
//!
//! - [`fetcher`]: HTTP retrieval and the cache-aware [`FeedService`](fetcher::FeedService)
//! - [`normalizer`]: RSS item parsing into [`Entry`](domain::Entry) records
//! - [`cache`]: per-topic, time-bounded in-memory cache
//! - [`launcher`]: host allow-list and browser hand-off
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive menu
//! headwire
//!
//! # One-shot listing
//! headwire headlines "Top Stories" -n 5
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together all components:
/// feed service, cache, launcher.
pub mod app;

/// In-memory feed cache with a fixed time-to-live.
pub mod cache;

/// Command-line interface and the interactive menu.
pub mod cli;

/// Configuration loaded from `~/.config/headwire/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Entry`](domain::Entry): a headline (title, link, published)
/// - [`TopicRegistry`](domain::TopicRegistry): ordered topic → feed mapping
pub mod domain;

/// Feed retrieval.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait for HTTP GETs
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
/// - [`FeedService`](fetcher::FeedService): topic lookup, caching, parsing
pub mod fetcher;

/// Opening articles in the browser behind a host allow-list.
pub mod launcher;

/// RSS parsing into headline entries.
pub mod normalizer;
