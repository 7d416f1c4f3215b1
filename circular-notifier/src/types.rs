/// User-Agent sent with every feed and page request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// One item of the parsed feed, in the order the feed lists it (newest first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// Zero-based position in the source feed.
    pub original_order: usize,
}

impl FeedEntry {
    pub fn new(title: impl Into<String>, link: impl Into<String>, original_order: usize) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            original_order,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchResult {
    pub success: bool,
    pub error: Option<String>,
    pub response_time_ms: u64,
    pub http_status: Option<u16>,
    pub content: Option<String>, // RSS/XML content
}

/// Outcome of fetching a circular's web page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFetch {
    Html(String),
    Status(u16),
    Failed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Summarization failed (status {status:?}): {message}")]
    Summarization { status: Option<u16>, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NotifierError>;
