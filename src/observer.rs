use log::{debug, error, info, warn};

use crate::cards::card_record::CardRecord;
use crate::error::ScrapeError;

/// Receives progress events from the scraping and validation steps. The
/// steps themselves never log; whoever runs them decides where events go.
pub trait ScrapeObserver: Send + Sync {
    /// A retryable operation failed on `attempt` (1-based).
    fn attempt_failed(&self, _operation: &str, _attempt: u32, _error: &ScrapeError) {}

    /// A listing entry went stale and was skipped.
    fn entry_skipped(&self, _index: usize, _error: &ScrapeError) {}

    fn record_harvested(&self, _record: &CardRecord) {}

    fn page_loaded(&self, _url: &str, _entries: usize) {}

    fn pages_discovered(&self, _last_page: u32) {}

    fn validation(&self, _check: &str, _message: &str) {}
}

/// Forwards every event to the `log` facade.
pub struct LogObserver;

impl ScrapeObserver for LogObserver {
    fn attempt_failed(&self, operation: &str, attempt: u32, error: &ScrapeError) {
        error!("Attempt {} error in {}: {}", attempt, operation, error);
    }

    fn entry_skipped(&self, index: usize, error: &ScrapeError) {
        warn!("Skipping listing entry {}: {}", index, error);
    }

    fn record_harvested(&self, record: &CardRecord) {
        debug!(
            "Collected {} ({:?}) lowest price {:?}",
            record.full_product_name, record.card_type, record.current_lowest_price
        );
    }

    fn page_loaded(&self, url: &str, entries: usize) {
        info!("Elements from {} successfully loaded: {} entries", url, entries);
    }

    fn pages_discovered(&self, last_page: u32) {
        info!("Successfully read last page. Number is {}", last_page);
    }

    fn validation(&self, check: &str, message: &str) {
        info!("[{}] {}", check, message);
    }
}
