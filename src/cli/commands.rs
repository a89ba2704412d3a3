use std::io::Write;

use crate::app::{AppContext, HeadwireError, Result};
use crate::domain::{top_entries, IndexedEntry};
use crate::fetcher::FeedOutcome;
use crate::launcher::{BlockReason, LaunchOutcome};

pub fn list_topics(ctx: &AppContext) -> Result<()> {
    for (i, name) in ctx.feeds.list_topics().into_iter().enumerate() {
        println!("{}. {}", i + 1, name);
    }
    Ok(())
}

/// Print the top headlines for `topic` to `out`.
///
/// Returns `Ok(false)` when the fetch failed; the reason has then been
/// written to `err` in the same words the interactive menu uses.
pub async fn show_headlines<W: Write, E: Write>(
    ctx: &mut AppContext,
    topic: &str,
    limit: Option<usize>,
    json: bool,
    out: &mut W,
    err: &mut E,
) -> Result<bool> {
    let n = limit.unwrap_or(ctx.top_n);

    let entries = match ctx.feeds.fetch_feed(topic).await {
        Ok(FeedOutcome::Entries(entries)) => entries,
        Ok(FeedOutcome::Empty) => {
            writeln!(err, "{}", empty_feed_message(topic))?;
            if json {
                writeln!(out, "[]")?;
            }
            return Ok(true);
        }
        Err(e) => {
            writeln!(err, "{}", fetch_error_message(&e))?;
            return Ok(false);
        }
    };

    let top = top_entries(&entries, n);

    if json {
        let body = serde_json::to_string_pretty(&top)?;
        writeln!(out, "{}", body)?;
        return Ok(true);
    }

    for indexed in &top {
        writeln!(out, "{}", format_listing(indexed))?;
    }

    Ok(true)
}

pub fn open_link(ctx: &AppContext, url: &str) -> Result<()> {
    let outcome = ctx.launcher.open_article(url);
    println!("{}", launch_message(url, &outcome));
    Ok(())
}

/// One headline for the non-interactive listing: compact date when the
/// timestamp parses, the raw text otherwise.
fn format_listing(indexed: &IndexedEntry) -> String {
    let entry = &indexed.entry;
    let date = entry
        .published_at()
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| entry.published.clone());

    let mut line = format!("{:>2}. {}", indexed.index, entry.title);
    if !date.is_empty() {
        line.push_str(&format!(" [{}]", date));
    }
    if !entry.link.is_empty() {
        line.push_str(&format!("\n    {}", entry.link));
    }
    line
}

pub(crate) fn empty_feed_message(topic: &str) -> String {
    format!("Warning: No entries found in feed for {}.", topic)
}

/// User-facing text for a failed fetch.
pub(crate) fn fetch_error_message(error: &HeadwireError) -> String {
    match error {
        HeadwireError::UnknownTopic(topic) => {
            format!("Error: No URL found for genre '{}'", topic)
        }
        HeadwireError::Network(e) => format!("Network error fetching feed: {}", e),
        HeadwireError::FeedParse(e) => format!("Error parsing feed: {}", e),
        other => format!("Error: {}", other),
    }
}

pub(crate) fn launch_message(url: &str, outcome: &LaunchOutcome) -> String {
    match outcome {
        LaunchOutcome::Opened => format!("Opening article: {}", url),
        LaunchOutcome::Blocked(BlockReason::EmptyUrl) => "Error: Invalid URL.".to_string(),
        LaunchOutcome::Blocked(BlockReason::HostNotAllowed) => format!(
            "Security Warning: URL host not allowed ({}). Opening blocked.",
            url
        ),
        LaunchOutcome::Failed(e) => format!("Failed to open browser: {}", e),
    }
}
