use crate::types::{FetchConfig, FetchResult, NotifierError, PageFetch, Result};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Shared HTTP client for the feed and for circular pages.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }

    /// Single attempt; a failed fetch is reported in the result rather than as an error.
    pub async fn fetch_feed(&self, url: &str) -> FetchResult {
        let start_time = Instant::now();

        debug!("Fetching feed: {}", url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to fetch feed {}: {}", url, e);
                return FetchResult {
                    success: false,
                    error: Some(e.to_string()),
                    response_time_ms: start_time.elapsed().as_millis() as u64,
                    http_status: None,
                    content: None,
                };
            }
        };

        let status = response.status();
        debug!("Feed HTTP status for {}: {}", url, status);

        if !status.is_success() {
            warn!("Feed request to {} returned {}", url, status);
            return FetchResult {
                success: false,
                error: Some(format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                )),
                response_time_ms: start_time.elapsed().as_millis() as u64,
                http_status: Some(status.as_u16()),
                content: None,
            };
        }

        match response.text().await {
            Ok(content) => {
                info!("Successfully fetched feed: {} ({} bytes)", url, content.len());
                FetchResult {
                    success: true,
                    error: None,
                    response_time_ms: start_time.elapsed().as_millis() as u64,
                    http_status: Some(status.as_u16()),
                    content: Some(content),
                }
            }
            Err(e) => {
                error!("Failed to read feed body from {}: {}", url, e);
                FetchResult {
                    success: false,
                    error: Some(NotifierError::Http(e).to_string()),
                    response_time_ms: start_time.elapsed().as_millis() as u64,
                    http_status: Some(status.as_u16()),
                    content: None,
                }
            }
        }
    }

    /// Fetches a circular page. Timeouts and connection errors come back as `PageFetch::Failed`.
    pub async fn fetch_page(&self, url: &str) -> PageFetch {
        debug!("Fetching page: {}", url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Page request to {} failed: {}", url, e);
                return PageFetch::Failed(e.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Page request to {} returned {}", url, status);
            return PageFetch::Status(status.as_u16());
        }

        match response.text().await {
            Ok(body) => PageFetch::Html(body),
            Err(e) => {
                warn!("Failed to read page body from {}: {}", url, e);
                PageFetch::Failed(e.to_string())
            }
        }
    }
}
