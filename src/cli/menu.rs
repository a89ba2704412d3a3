//! Numbered topic and headline menus read from a line-oriented input.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::app::{AppContext, Result};
use crate::cli::commands::{empty_feed_message, fetch_error_message, launch_message};
use crate::domain::{top_entries, IndexedEntry};
use crate::fetcher::FeedOutcome;

enum Flow {
    Back,
    Quit,
}

enum Choice {
    Exit,
    Invalid,
    /// A 1-based selection that may still be out of range
    Pick(usize),
}

fn parse_choice(input: &str) -> Choice {
    let input = input.trim();
    if input == "0" {
        return Choice::Exit;
    }
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Choice::Invalid;
    }
    // all digits but too large to fit is simply out of range
    Choice::Pick(input.parse().unwrap_or(usize::MAX))
}

pub struct Menu<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Menu<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
        }
    }

    /// Run until the user picks `0` at the topic menu or input ends.
    pub async fn run(&mut self, ctx: &mut AppContext) -> Result<()> {
        loop {
            self.show_topics(ctx)?;

            let Some(line) = self.prompt("\nEnter choice: ").await? else {
                break;
            };

            match parse_choice(&line) {
                Choice::Exit => break,
                Choice::Invalid => {
                    writeln!(self.out, "Invalid input. Please enter a number.")?;
                }
                Choice::Pick(n) => {
                    let topic = n
                        .checked_sub(1)
                        .and_then(|i| ctx.feeds.registry().by_index(i))
                        .map(|t| t.name.clone());

                    match topic {
                        Some(topic) => {
                            if let Flow::Quit = self.browse_topic(ctx, &topic).await? {
                                break;
                            }
                        }
                        None => writeln!(self.out, "Invalid genre selection.")?,
                    }
                }
            }
        }

        writeln!(self.out, "Exiting...")?;
        Ok(())
    }

    fn show_topics(&mut self, ctx: &AppContext) -> Result<()> {
        writeln!(self.out, "\n--- Times of India CLI ---")?;
        writeln!(self.out, "Select a Genre:")?;
        for (i, name) in ctx.feeds.list_topics().into_iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, name)?;
        }
        writeln!(self.out, "0. Exit")?;
        Ok(())
    }

    async fn browse_topic(&mut self, ctx: &mut AppContext, topic: &str) -> Result<Flow> {
        if ctx.feeds.cache().get(topic).is_none() {
            writeln!(self.out, "Fetching {} headlines...", topic)?;
        }

        let entries = match ctx.feeds.fetch_feed(topic).await {
            Ok(FeedOutcome::Entries(entries)) => entries,
            Ok(FeedOutcome::Empty) => {
                writeln!(self.out, "{}", empty_feed_message(topic))?;
                return Ok(Flow::Back);
            }
            Err(e) => {
                writeln!(self.out, "{}", fetch_error_message(&e))?;
                return Ok(Flow::Back);
            }
        };

        let top = top_entries(&entries, ctx.top_n);
        if top.is_empty() {
            writeln!(self.out, "No headlines available.")?;
            return Ok(Flow::Back);
        }

        loop {
            self.show_headlines(topic, &top)?;
            writeln!(self.out, "\nEnter article number to open (or 0 to go back):")?;

            let Some(line) = self.prompt("> ").await? else {
                return Ok(Flow::Quit);
            };

            match parse_choice(&line) {
                Choice::Exit => return Ok(Flow::Back),
                Choice::Invalid => writeln!(self.out, "Invalid input.")?,
                Choice::Pick(n) => match n.checked_sub(1).and_then(|i| top.get(i)) {
                    Some(indexed) => {
                        let link = &indexed.entry.link;
                        let outcome = ctx.launcher.open_article(link);
                        writeln!(self.out, "{}", launch_message(link, &outcome))?;
                    }
                    None => writeln!(self.out, "Invalid article number.")?,
                },
            }
        }
    }

    fn show_headlines(&mut self, topic: &str, top: &[IndexedEntry]) -> Result<()> {
        writeln!(self.out, "\n--- {} Top {} Headlines ---", topic, top.len())?;
        for indexed in top {
            let entry = &indexed.entry;
            if entry.published.is_empty() {
                writeln!(self.out, "{}. {}", indexed.index, entry.title)?;
            } else {
                writeln!(
                    self.out,
                    "{}. {} ({})",
                    indexed.index, entry.title, entry.published
                )?;
            }
        }
        Ok(())
    }

    /// Print `prompt` and read one line; `None` at end of input.
    async fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;
        Ok(self.lines.next_line().await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::app::HeadwireError;
    use crate::config::{Config, TopicConfig};
    use crate::fetcher::Fetcher;
    use crate::launcher::BrowserOpener;

    const FEED: &str = "<rss><channel>\
        <item><title>Allowed story</title>\
        <link>https://timesofindia.indiatimes.com/a</link>\
        <pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate></item>\
        <item><title>Offsite story</title>\
        <link>https://evil.com/b</link></item>\
        <item><title>No link</title></item>\
        </channel></rss>";

    struct StaticFetcher {
        body: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Fetcher for StaticFetcher {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.body.is_empty() {
                return Err(HeadwireError::FeedParse("empty body".into()));
            }
            Ok(self.body.as_bytes().to_vec())
        }
    }

    #[derive(Clone, Default)]
    struct RecordingBrowser {
        opened: Arc<Mutex<Vec<String>>>,
    }

    impl BrowserOpener for RecordingBrowser {
        fn open(&self, url: &str) -> std::io::Result<()> {
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    struct Harness {
        ctx: AppContext,
        fetcher: Arc<StaticFetcher>,
        browser: RecordingBrowser,
    }

    fn harness(body: &'static str) -> Harness {
        let config = Config {
            topics: vec![
                TopicConfig {
                    name: "India".into(),
                    url: "https://timesofindia.indiatimes.com/rssfeeds/-2128936835.cms".into(),
                },
                TopicConfig {
                    name: "World".into(),
                    url: "https://timesofindia.indiatimes.com/rssfeeds/296589292.cms".into(),
                },
            ],
            ..Config::default()
        };
        let fetcher = Arc::new(StaticFetcher {
            body,
            calls: AtomicUsize::new(0),
        });
        let browser = RecordingBrowser::default();
        let ctx =
            AppContext::with_parts(&config, fetcher.clone(), Box::new(browser.clone())).unwrap();

        Harness {
            ctx,
            fetcher,
            browser,
        }
    }

    async fn run(harness: &mut Harness, input: &str) -> String {
        let mut out = Vec::new();
        Menu::new(input.as_bytes(), &mut out)
            .run(&mut harness.ctx)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_exit_immediately() {
        let mut h = harness(FEED);
        let out = run(&mut h, "0\n").await;

        assert!(out.contains("--- Times of India CLI ---"));
        assert!(out.contains("1. India\n2. World\n0. Exit"));
        assert!(out.ends_with("Exiting...\n"));
        assert_eq!(h.fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_topic_input() {
        let mut h = harness(FEED);
        let out = run(&mut h, "abc\n9\n0\n").await;

        assert!(out.contains("Invalid input. Please enter a number."));
        assert!(out.contains("Invalid genre selection."));
    }

    #[tokio::test]
    async fn test_lists_headlines_and_opens_allowed_link() {
        let mut h = harness(FEED);
        let out = run(&mut h, "1\n1\n0\n0\n").await;

        assert!(out.contains("Fetching India headlines..."));
        assert!(out.contains("--- India Top 3 Headlines ---"));
        assert!(out.contains("1. Allowed story (Mon, 01 Jan 2024 00:00:00 GMT)"));
        assert!(out.contains("3. No link\n"));
        assert!(out.contains("Opening article: https://timesofindia.indiatimes.com/a"));
        assert_eq!(
            *h.browser.opened.lock().unwrap(),
            vec!["https://timesofindia.indiatimes.com/a".to_string()]
        );
    }

    #[tokio::test]
    async fn test_blocked_and_empty_links_do_not_open() {
        let mut h = harness(FEED);
        let out = run(&mut h, "1\n2\n3\n7\nx\n0\n0\n").await;

        assert!(out.contains("Security Warning: URL host not allowed (https://evil.com/b)."));
        assert!(out.contains("Error: Invalid URL."));
        assert!(out.contains("Invalid article number."));
        assert!(out.contains("Invalid input.\n"));
        assert!(h.browser.opened.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_second_visit_is_served_from_cache() {
        let mut h = harness(FEED);
        let out = run(&mut h, "1\n0\n1\n0\n0\n").await;

        assert_eq!(out.matches("Fetching India headlines...").count(), 1);
        assert_eq!(out.matches("--- India Top 3 Headlines ---").count(), 2);
        assert_eq!(h.fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_returns_to_topics() {
        let mut h = harness("");
        let out = run(&mut h, "2\n0\n").await;

        assert!(out.contains("Error parsing feed: empty body"));
        assert!(out.ends_with("Exiting...\n"));
    }

    #[tokio::test]
    async fn test_empty_feed_warning() {
        let mut h = harness("<rss><channel></channel></rss>");
        let out = run(&mut h, "2\n0\n").await;

        assert!(out.contains("Warning: No entries found in feed for World."));
    }

    #[tokio::test]
    async fn test_end_of_input_exits() {
        let mut h = harness(FEED);
        let out = run(&mut h, "1\n").await;

        assert!(out.ends_with("> Exiting...\n"));
    }
}
