use crate::traits::Summarizer;
use crate::types::{NotifierError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Shown in place of a summary when the inference call fails.
pub const SUMMARY_UNAVAILABLE: &str = "(summary unavailable)";

pub const DEFAULT_MODEL: &str = "facebook/bart-large-cnn";
pub const DEFAULT_INFERENCE_BASE: &str = "https://router.huggingface.co/hf-inference/models";
pub const DEFAULT_MAX_SUMMARY_LENGTH: usize = 200;

#[derive(Clone)]
pub struct SummarizerConfig {
    pub api_base: String,
    pub model: String,
    pub token: String,
    pub timeout_seconds: u64,
}

impl SummarizerConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_INFERENCE_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            token: token.into(),
            timeout_seconds: 120,
        }
    }
}

impl fmt::Debug for SummarizerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummarizerConfig")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("token", &"***")
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: SummarizationParameters,
}

#[derive(Debug, Serialize)]
struct SummarizationParameters {
    max_length: usize,
}

#[derive(Debug, Deserialize)]
struct SummarizationOutput {
    summary_text: String,
}

#[derive(Debug, Deserialize)]
struct InferenceError {
    error: String,
}

/// Summaries from a model hosted on the Hugging Face inference API.
pub struct HuggingFaceSummarizer {
    client: Client,
    config: SummarizerConfig,
}

impl HuggingFaceSummarizer {
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    fn model_name(&self) -> String {
        self.config.model.clone()
    }

    async fn summarize(&self, text: &str, max_length: usize) -> Result<String> {
        debug!(
            "Requesting summary of {} chars from {}",
            text.chars().count(),
            self.config.model
        );

        let request = SummarizationRequest {
            inputs: text,
            parameters: SummarizationParameters { max_length },
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<InferenceError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(NotifierError::Summarization {
                status: Some(status.as_u16()),
                message,
            });
        }

        let outputs: Vec<SummarizationOutput> = serde_json::from_str(&body)?;
        let summary = outputs
            .into_iter()
            .next()
            .map(|output| output.summary_text)
            .ok_or_else(|| NotifierError::Summarization {
                status: Some(status.as_u16()),
                message: "empty result list".to_string(),
            })?;

        info!("Received summary of {} chars", summary.chars().count());
        Ok(summary)
    }
}
