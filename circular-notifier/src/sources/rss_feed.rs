use crate::parser::FeedParser;
use crate::traits::FeedSource;
use crate::types::{FeedEntry, Result};
use crate::Fetcher;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// Generic RSS/Atom feed source
pub struct RssFeedSource {
    pub url: String,
    pub title: Option<String>,
    fetcher: Arc<Fetcher>,
}

impl RssFeedSource {
    pub fn new(url: String, fetcher: Arc<Fetcher>) -> Self {
        Self {
            url,
            title: None,
            fetcher,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[async_trait]
impl FeedSource for RssFeedSource {
    fn source_name(&self) -> String {
        self.title.clone().unwrap_or_else(|| {
            // Extract domain name from URL as fallback
            if let Ok(parsed) = url::Url::parse(&self.url) {
                if let Some(domain) = parsed.domain() {
                    return format!("RSS Feed ({})", domain);
                }
            }
            "RSS Feed".to_string()
        })
    }

    async fn pull(&self) -> Result<Vec<FeedEntry>> {
        info!("Pulling RSS feed: {}", self.url);

        let fetch_result = self.fetcher.fetch_feed(&self.url).await;
        info!(
            "Feed HTTP status: {:?} ({} ms)",
            fetch_result.http_status, fetch_result.response_time_ms
        );

        if !fetch_result.success {
            let error_msg = fetch_result.error.unwrap_or_else(|| "Fetch failed".to_string());
            warn!("Giving up on feed {} for this run: {}", self.url, error_msg);
            return Ok(Vec::new());
        }

        let content = match fetch_result.content {
            Some(content) => content,
            None => {
                warn!("No content returned for RSS feed {}", self.url);
                return Ok(Vec::new());
            }
        };

        // An unparseable document counts as an empty feed
        let parsed_feed = match FeedParser::parse_feed(&content) {
            Ok(parsed_feed) => parsed_feed,
            Err(e) => {
                warn!("Could not parse feed {}: {}", self.url, e);
                return Ok(Vec::new());
            }
        };
        info!(
            "Feed {:?} lists {} entries",
            parsed_feed.title.as_deref().unwrap_or(&self.url),
            parsed_feed.entries.len()
        );

        Ok(parsed_feed.entries)
    }
}
