use crate::notifier::TelegramConfig;
use crate::sources::rbi_feed::RBI_PRESS_RELEASES_URL;
use crate::state::DEFAULT_STATE_FILE;
use crate::summarizer::{SummarizerConfig, DEFAULT_MAX_SUMMARY_LENGTH, DEFAULT_MODEL};
use crate::types::{FetchConfig, NotifierError, Result};
use clap::Parser;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const HUGGINGFACE_TOKEN: &str = "HUGGINGFACE_TOKEN";

/// Relay new circulars from an RSS feed to a Telegram chat.
#[derive(Debug, Clone, Parser)]
#[command(name = "circular-notifier", version, about)]
pub struct Settings {
    /// RSS feed to poll
    #[arg(long, env = "FEED_URL", default_value = RBI_PRESS_RELEASES_URL)]
    pub feed_url: String,

    /// File holding the title of the last relayed circular
    #[arg(long, env = "LAST_TITLE_FILE", default_value = DEFAULT_STATE_FILE)]
    pub state_file: PathBuf,

    /// Hosted summarization model
    #[arg(long, env = "SUMMARIZATION_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, default_value_t = DEFAULT_MAX_SUMMARY_LENGTH)]
    pub max_summary_length: usize,

    /// Pause after each chat message, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub pacing_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            feed_url: RBI_PRESS_RELEASES_URL.to_string(),
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            model: DEFAULT_MODEL.to_string(),
            max_summary_length: DEFAULT_MAX_SUMMARY_LENGTH,
            pacing_ms: 1000,
        }
    }
}

/// Everything a run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub feed_url: String,
    pub state_file: PathBuf,
    pub max_summary_length: usize,
    pub fetch: FetchConfig,
    pub telegram: TelegramConfig,
    pub summarizer: SummarizerConfig,
}

impl AppConfig {
    pub fn from_env(settings: Settings) -> Result<Self> {
        Self::from_lookup(settings, |key| env::var(key).ok())
    }

    /// Builds the config, reading secrets through `lookup`. Missing or blank values are fatal.
    pub fn from_lookup<F>(settings: Settings, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| NotifierError::Config(format!("{} must be set", key)))
        };

        let bot_token = required(TELEGRAM_BOT_TOKEN)?;
        let chat_id = required(TELEGRAM_CHAT_ID)?;
        let hf_token = required(HUGGINGFACE_TOKEN)?;

        url::Url::parse(&settings.feed_url)?;

        let mut telegram = TelegramConfig::new(bot_token, chat_id);
        telegram.pacing = Duration::from_millis(settings.pacing_ms);

        let mut summarizer = SummarizerConfig::new(hf_token);
        summarizer.model = settings.model;

        Ok(Self {
            feed_url: settings.feed_url,
            state_file: settings.state_file,
            max_summary_length: settings.max_summary_length,
            fetch: FetchConfig::default(),
            telegram,
            summarizer,
        })
    }
}
