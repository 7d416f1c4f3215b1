use crate::types::{FeedEntry, Result};
use async_trait::async_trait;

/// Trait for pulling entries from a feed
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Human-readable name for this source
    fn source_name(&self) -> String;

    /// Fetch the feed and return its entries newest first.
    /// An empty vector means there is nothing to do this run.
    async fn pull(&self) -> Result<Vec<FeedEntry>>;
}

/// Turns a circular's link into plain body text.
#[async_trait]
pub trait PageExtractor: Send + Sync {
    /// Never fails: transport problems come back as placeholder text.
    async fn extract_full_text(&self, link: &str) -> String;
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    fn model_name(&self) -> String;

    async fn summarize(&self, text: &str, max_length: usize) -> Result<String>;
}

/// Chat destination for outbound messages.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends `text` as one or more messages. Delivery failures are logged, not returned.
    async fn send(&self, text: &str);
}

/// Durable slot holding the title of the last processed entry.
pub trait WatermarkStore: Send + Sync {
    /// Returns an empty string when nothing has been stored yet.
    fn load(&self) -> Result<String>;

    fn save(&self, title: &str) -> Result<()>;
}
