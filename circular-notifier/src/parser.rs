use crate::types::{FeedEntry, NotifierError, Result};
use feed_rs::parser;
use tracing::{debug, info};

#[derive(Debug)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub entries: Vec<FeedEntry>,
}

pub struct FeedParser;

impl FeedParser {
    /// Parses RSS or Atom content, keeping the document order of its items.
    pub fn parse_feed(content: &str) -> Result<ParsedFeed> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content.as_bytes())
            .map_err(|e| NotifierError::Parse(format!("Failed to parse feed: {}", e)))?;

        let title = feed.title.map(|t| t.content);

        let entries: Vec<FeedEntry> = feed
            .entries
            .into_iter()
            .filter_map(Self::parse_entry)
            .enumerate()
            .map(|(position, mut entry)| {
                entry.original_order = position;
                entry
            })
            .collect();

        info!("Parsed feed with {} entries", entries.len());

        Ok(ParsedFeed { title, entries })
    }

    fn parse_entry(entry: feed_rs::model::Entry) -> Option<FeedEntry> {
        // Entries without a link cannot be followed to their full text
        let link = match entry.links.first() {
            Some(link) => link.href.trim().to_string(),
            None => {
                debug!("Skipping entry without link: {}", entry.id);
                return None;
            }
        };

        // The title is the watermark key; an empty one would match the first-run watermark
        let title = entry
            .title
            .map(|t| t.content.trim().to_string())
            .unwrap_or_default();
        if title.is_empty() {
            debug!("Skipping untitled entry: {}", link);
            return None;
        }

        Some(FeedEntry::new(title, link, 0))
    }
}
