use std::time::Duration;

use fantoccini::error::{CmdError, NewSessionError};

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// The page did not produce the awaited elements inside the wait window.
    #[error("Timed out after {waited:?} waiting for '{selector}'")]
    Timeout { selector: String, waited: Duration },

    /// An element the page is expected to always render was not there.
    #[error("Expected element '{selector}' was not found")]
    ElementNotFound { selector: String },

    /// The listing re-rendered between locating and using an entry.
    #[error("Listing entry {index} is no longer attached to the page")]
    StaleElement { index: usize },

    #[error("Could not read a page count from '{0}'")]
    InvalidPageCount(String),

    #[error("WebDriver command failed: {0}")]
    WebDriver(#[from] CmdError),

    #[error("Could not start a WebDriver session: {0}")]
    Session(#[from] NewSessionError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to upload {key} to bucket {bucket}: {source}")]
    Upload {
        bucket: String,
        key: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Upload requested but S3_OPTCG_BUCKET_NAME is not set")]
    MissingBucket,
}

impl ScrapeError {
    pub fn element_not_found(selector: &str) -> Self {
        ScrapeError::ElementNotFound {
            selector: selector.to_string(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ScrapeError::Timeout { .. })
    }

    pub fn is_missing_element(&self) -> bool {
        matches!(self, ScrapeError::ElementNotFound { .. })
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, ScrapeError::StaleElement { .. })
    }
}
