use crate::traits::Notifier;
use crate::types::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Largest message body sent in one request; Telegram rejects anything over 4096.
pub const MESSAGE_CHAR_LIMIT: usize = 4000;

pub const DEFAULT_PACING: Duration = Duration::from_secs(1);

#[derive(Clone)]
pub struct TelegramConfig {
    pub api_base: String,
    pub bot_token: String,
    pub chat_id: String,
    pub chunk_limit: usize,
    pub pacing: Duration,
    pub timeout_seconds: u64,
}

impl TelegramConfig {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            chunk_limit: MESSAGE_CHAR_LIMIT,
            pacing: DEFAULT_PACING,
            timeout_seconds: 30,
        }
    }
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("api_base", &self.api_base)
            .field("bot_token", &"***")
            .field("chat_id", &self.chat_id)
            .field("chunk_limit", &self.chunk_limit)
            .field("pacing", &self.pacing)
            .finish()
    }
}

/// Splits `text` into chunks of at most `limit` characters without breaking words.
///
/// Whitespace inside a chunk is kept as-is, so line breaks survive; whitespace
/// falling on a chunk boundary is dropped. A word longer than `limit` is cut
/// at character boundaries. Blank input yields no chunks.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    let mut pending_space = "";

    for (is_space, token) in whitespace_runs(text) {
        if is_space {
            if !current.is_empty() {
                pending_space = token;
            }
            continue;
        }

        let word_len = token.chars().count();
        let space = std::mem::take(&mut pending_space);
        let space_len = space.chars().count();

        if !current.is_empty() && current_len + space_len + word_len <= limit {
            current.push_str(space);
            current.push_str(token);
            current_len += space_len + word_len;
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if word_len <= limit {
            current.push_str(token);
            current_len = word_len;
            continue;
        }

        let chars: Vec<char> = token.chars().collect();
        let mut pieces = chars.chunks(limit).map(|piece| piece.iter().collect::<String>());
        let mut last = pieces.next().unwrap_or_default();
        for piece in pieces {
            chunks.push(std::mem::replace(&mut last, piece));
        }
        current_len = last.chars().count();
        current = last;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Alternating runs of whitespace and non-whitespace, tagged `true` for whitespace.
fn whitespace_runs(text: &str) -> Vec<(bool, &str)> {
    let mut runs = Vec::new();
    let mut run_start = 0;
    let mut run_is_space: Option<bool> = None;

    for (idx, ch) in text.char_indices() {
        let is_space = ch.is_whitespace();
        match run_is_space {
            Some(previous) if previous == is_space => {}
            Some(previous) => {
                runs.push((previous, &text[run_start..idx]));
                run_start = idx;
                run_is_space = Some(is_space);
            }
            None => run_is_space = Some(is_space),
        }
    }

    if let Some(is_space) = run_is_space {
        runs.push((is_space, &text[run_start..]));
    }

    runs
}

/// Escapes the characters Telegram's HTML parse mode treats as markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Bold header announcing a new circular.
pub fn format_title_message(title: &str) -> String {
    format!("<b>{}</b>", escape_html(title))
}

/// Summary followed by a link to the full circular.
pub fn format_summary_message(summary: &str, link: &str) -> String {
    format!(
        "{}\n\n🔗 <a href=\"{}\">Read full circular</a>",
        escape_html(summary),
        escape_html(link)
    )
}

/// Posts messages through the Telegram Bot API.
pub struct TelegramNotifier {
    client: Client,
    config: TelegramConfig,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.api_base.trim_end_matches('/'),
            self.config.bot_token
        )
    }

    async fn send_chunk(&self, chunk: &str) {
        let form = [
            ("chat_id", self.config.chat_id.as_str()),
            ("text", chunk),
            ("parse_mode", "HTML"),
        ];

        match self.client.post(self.endpoint()).form(&form).send().await {
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                debug!("Telegram send -> {}: {}", status.as_u16(), body);
                if !status.is_success() {
                    warn!("Telegram rejected message ({}): {}", status.as_u16(), body);
                }
            }
            Err(e) => {
                // reqwest includes the URL in its errors, and ours carries the bot token
                warn!("Telegram send failed: {}", e.without_url());
            }
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) {
        let chunks = split_message(text, self.config.chunk_limit);
        info!("Sending message in {} chunk(s)", chunks.len());

        for chunk in &chunks {
            self.send_chunk(chunk).await;
            if !self.config.pacing.is_zero() {
                tokio::time::sleep(self.config.pacing).await;
            }
        }
    }
}
