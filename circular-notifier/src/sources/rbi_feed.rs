use crate::sources::RssFeedSource;
use crate::traits::FeedSource;
use crate::types::{FeedEntry, Result};
use crate::Fetcher;
use async_trait::async_trait;
use std::sync::Arc;

/// Press-release feed of the Reserve Bank of India.
pub const RBI_PRESS_RELEASES_URL: &str = "https://www.rbi.org.in/pressreleases_rss.xml";

/// Reserve Bank of India press releases
pub struct RbiFeedSource {
    inner: RssFeedSource,
}

impl RbiFeedSource {
    pub fn new(url: String, fetcher: Arc<Fetcher>) -> Self {
        let inner = RssFeedSource::new(url, fetcher).with_title("RBI Press Releases");
        Self { inner }
    }
}

#[async_trait]
impl FeedSource for RbiFeedSource {
    fn source_name(&self) -> String {
        format!("RBI: {}", self.inner.source_name())
    }

    async fn pull(&self) -> Result<Vec<FeedEntry>> {
        self.inner.pull().await
    }
}
