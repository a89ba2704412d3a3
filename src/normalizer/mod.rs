use html_escape::decode_html_entities;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::app::{HeadwireError, Result};
use crate::domain::Entry;

const ITEM_TAG: &[u8] = b"item";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Published,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"title" => Some(Field::Title),
            b"link" => Some(Field::Link),
            b"pubDate" => Some(Field::Published),
            _ => None,
        }
    }
}

#[derive(Default)]
struct EntryBuilder {
    title: Option<String>,
    link: Option<String>,
    published: Option<String>,
}

impl EntryBuilder {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link,
            Field::Published => &mut self.published,
        }
    }

    fn has(&mut self, field: Field) -> bool {
        self.slot(field).is_some()
    }

    fn build(self) -> Entry {
        Entry::new(self.title, self.link, self.published)
    }
}

/// Text being collected for one field of the current item.
struct Capture {
    field: Field,
    depth: usize,
    text: String,
}

/// Turns an RSS document into headline entries in document order.
#[derive(Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Parse `body`, returning one [`Entry`] per `<item>`.
    ///
    /// An empty vector is a valid result: a well-formed document without
    /// items is not an error. Ill-formed markup is reported as
    /// [`HeadwireError::FeedParse`].
    pub fn normalize(&self, body: &[u8]) -> Result<Vec<Entry>> {
        let mut reader = Reader::from_reader(body);
        reader.config_mut().trim_text(false);

        let mut entries = Vec::new();
        let mut buf = Vec::new();

        let mut depth = 0usize;
        let mut saw_root = false;
        let mut item: Option<(usize, EntryBuilder)> = None;
        let mut capture: Option<Capture> = None;

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| HeadwireError::FeedParse(format!("XML parse error: {}", e)))?;

            match event {
                Event::Start(e) => {
                    depth += 1;
                    saw_root = true;
                    let name = e.local_name();

                    match item.as_mut() {
                        None if name.as_ref() == ITEM_TAG => {
                            item = Some((depth, EntryBuilder::default()));
                        }
                        Some((_, builder)) if capture.is_none() => {
                            if let Some(field) = Field::from_tag(name.as_ref()) {
                                if !builder.has(field) {
                                    capture = Some(Capture {
                                        field,
                                        depth,
                                        text: String::new(),
                                    });
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Event::Empty(e) => {
                    saw_root = true;
                    let name = e.local_name();

                    match item.as_mut() {
                        None if name.as_ref() == ITEM_TAG => {
                            entries.push(EntryBuilder::default().build());
                        }
                        Some((_, builder)) if capture.is_none() => {
                            if let Some(field) = Field::from_tag(name.as_ref()) {
                                let slot = builder.slot(field);
                                if slot.is_none() {
                                    *slot = Some(String::new());
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Event::End(_) => {
                    if let Some(done) = capture.take_if(|c| c.depth == depth) {
                        if let Some((_, builder)) = item.as_mut() {
                            *builder.slot(done.field) = Some(done.text.trim().to_string());
                        }
                    }
                    if let Some((_, builder)) = item.take_if(|(d, _)| *d == depth) {
                        entries.push(builder.build());
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Text(e) => {
                    if let Some(capture) = capture.as_mut() {
                        match e.unescape() {
                            Ok(text) => capture.text.push_str(&text),
                            // entities XML lacks, such as &nbsp;
                            Err(_) => capture
                                .text
                                .push_str(&decode_html_entities(&String::from_utf8_lossy(&e))),
                        }
                    }
                }
                Event::CData(e) => {
                    if let Some(capture) = capture.as_mut() {
                        capture.text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !saw_root {
            return Err(HeadwireError::FeedParse("document has no root element".into()));
        }
        if depth > 0 {
            return Err(HeadwireError::FeedParse("unexpected end of document".into()));
        }

        Ok(entries)
    }
}
