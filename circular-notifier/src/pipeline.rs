use crate::config::AppConfig;
use crate::extractor::CircularPageExtractor;
use crate::fetcher::Fetcher;
use crate::notifier::{format_summary_message, format_title_message, TelegramNotifier};
use crate::sources::RbiFeedSource;
use crate::state::{new_entries_since, FileWatermarkStore};
use crate::summarizer::{HuggingFaceSummarizer, SUMMARY_UNAVAILABLE};
use crate::traits::{FeedSource, Notifier, PageExtractor, Summarizer, WatermarkStore};
use crate::types::{FeedEntry, Result};
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    FetchingFeed,
    NoNewItems,
    ProcessingItems,
    Done,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The feed could not be fetched or held no entries.
    EmptyFeed,
    NoNewItems,
    Processed,
}

/// What a single run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// State the pipeline was left in; `Done` for every run that returns.
    pub state: RunState,
    pub outcome: RunOutcome,
    /// Titles handled this run, oldest first.
    pub processed: Vec<String>,
    /// Watermark written at the end of the run, if any.
    pub watermark: Option<String>,
}

impl RunReport {
    fn nothing_sent(state: RunState, outcome: RunOutcome) -> Self {
        Self {
            state,
            outcome,
            processed: Vec::new(),
            watermark: None,
        }
    }

    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }
}

/// One-shot relay: feed delta → title → extract → summarize → summary+link → watermark.
pub struct CircularPipeline {
    source: Box<dyn FeedSource>,
    extractor: Box<dyn PageExtractor>,
    summarizer: Box<dyn Summarizer>,
    notifier: Box<dyn Notifier>,
    store: Box<dyn WatermarkStore>,
    max_summary_length: usize,
    state: RunState,
}

impl CircularPipeline {
    pub fn new(
        source: Box<dyn FeedSource>,
        extractor: Box<dyn PageExtractor>,
        summarizer: Box<dyn Summarizer>,
        notifier: Box<dyn Notifier>,
        store: Box<dyn WatermarkStore>,
        max_summary_length: usize,
    ) -> Self {
        Self {
            source,
            extractor,
            summarizer,
            notifier,
            store,
            max_summary_length,
            state: RunState::Idle,
        }
    }

    /// Wires the production collaborators described by `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let fetcher = Arc::new(Fetcher::new(config.fetch.clone())?);

        Ok(Self::new(
            Box::new(RbiFeedSource::new(config.feed_url.clone(), fetcher.clone())),
            Box::new(CircularPageExtractor::new(fetcher)),
            Box::new(HuggingFaceSummarizer::new(config.summarizer.clone())?),
            Box::new(TelegramNotifier::new(config.telegram.clone())?),
            Box::new(FileWatermarkStore::new(config.state_file.clone())),
            config.max_summary_length,
        ))
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    fn transition(&mut self, next: RunState) {
        info!("Run state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Executes one run. Only watermark I/O errors are returned.
    pub async fn run(&mut self) -> Result<RunReport> {
        let span = info_span!("run", run_id = %Uuid::new_v4());
        self.run_inner().instrument(span).await
    }

    async fn run_inner(&mut self) -> Result<RunReport> {
        self.transition(RunState::FetchingFeed);
        info!("Fetching feed from {}", self.source.source_name());

        let entries = match self.source.pull().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Feed fetch failed: {}", e);
                Vec::new()
            }
        };

        if entries.is_empty() {
            info!("No entries found in feed");
            self.transition(RunState::Done);
            return Ok(RunReport::nothing_sent(self.state, RunOutcome::EmptyFeed));
        }

        let watermark = self.store.load()?;
        info!("Last sent title: {:?}", watermark);

        let new_entries = new_entries_since(&entries, &watermark);
        if new_entries.is_empty() {
            self.transition(RunState::NoNewItems);
            info!("No new circulars to send");
            self.transition(RunState::Done);
            return Ok(RunReport::nothing_sent(self.state, RunOutcome::NoNewItems));
        }

        self.transition(RunState::ProcessingItems);
        info!("{} new circular(s) to send", new_entries.len());

        let mut processed = Vec::with_capacity(new_entries.len());
        for entry in new_entries.iter().rev() {
            self.process_entry(entry).await;
            processed.push(entry.title.clone());
        }

        // Feed order is newest first, so the first new entry is the newest processed
        let newest = new_entries[0].title.clone();
        self.store.save(&newest)?;
        info!("Updated watermark to {:?}", newest);

        self.transition(RunState::Done);
        Ok(RunReport {
            state: self.state,
            outcome: RunOutcome::Processed,
            processed,
            watermark: Some(newest),
        })
    }

    async fn process_entry(&self, entry: &FeedEntry) {
        info!("Processing {:?}", entry.title);

        self.notifier.send(&format_title_message(&entry.title)).await;

        let full_text = self.extractor.extract_full_text(&entry.link).await;

        let summary = match self
            .summarizer
            .summarize(&full_text, self.max_summary_length)
            .await
        {
            Ok(summary) => summary,
            Err(e) => {
                warn!(
                    "Summarization with {} failed for {:?}: {}",
                    self.summarizer.model_name(),
                    entry.title,
                    e
                );
                SUMMARY_UNAVAILABLE.to_string()
            }
        };

        self.notifier
            .send(&format_summary_message(&summary, &entry.link))
            .await;
    }
}
