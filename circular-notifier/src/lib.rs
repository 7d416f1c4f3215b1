pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod notifier;
pub mod parser;
pub mod pipeline;
pub mod sources;
pub mod state;
pub mod summarizer;
pub mod traits;
pub mod types;

pub use config::{AppConfig, Settings};
pub use extractor::CircularPageExtractor;
pub use fetcher::Fetcher;
pub use notifier::TelegramNotifier;
pub use parser::FeedParser;
pub use pipeline::{CircularPipeline, RunOutcome, RunReport, RunState};
pub use sources::{RbiFeedSource, RssFeedSource};
pub use state::FileWatermarkStore;
pub use summarizer::HuggingFaceSummarizer;
pub use traits::{FeedSource, Notifier, PageExtractor, Summarizer, WatermarkStore};
pub use types::*;
