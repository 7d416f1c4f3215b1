use crate::traits::WatermarkStore;
use crate::types::{FeedEntry, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, info};

/// Default location of the watermark file, relative to the working directory.
pub const DEFAULT_STATE_FILE: &str = "last_title.txt";

/// Watermark kept in a single plain-text file.
pub struct FileWatermarkStore {
    path: PathBuf,
}

impl FileWatermarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WatermarkStore for FileWatermarkStore {
    fn load(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents.trim().to_string()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No watermark at {}, treating as first run", self.path.display());
                Ok(String::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, title: &str) -> Result<()> {
        fs::write(&self.path, title)?;
        info!("Saved watermark to {}", self.path.display());
        Ok(())
    }
}

/// Entries published since `watermark`, newest first.
///
/// Walks the feed from the top and stops at the first entry whose title equals
/// the watermark exactly. When no title matches (including the empty watermark
/// of a first run) every entry is returned. An item re-published under an
/// unchanged title is therefore treated as already sent.
pub fn new_entries_since(entries: &[FeedEntry], watermark: &str) -> Vec<FeedEntry> {
    entries
        .iter()
        .take_while(|entry| entry.title != watermark)
        .cloned()
        .collect()
}
