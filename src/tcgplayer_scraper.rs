use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use log::info;

use crate::browser::Browser;
use crate::error::ScrapeError;
use crate::observer::ScrapeObserver;
use crate::page_navigator::PageNavigator;
use crate::pagination::last_page;
use crate::record_extractor::RecordExtractor;
use crate::retry::RetryPolicy;
use crate::utilities::config::Config;
use crate::utilities::constants::DEFAULT_WAIT_INCREMENT_SECS;
use crate::utilities::file_management::{append_records, read_records, write_records};
use crate::validator::{drop_duplicates, CardTableValidator, ValidationReport};

pub struct TcgplayerScraper<B: Browser> {
    browser: B,
    config: Config,
    policy: RetryPolicy,
    observer: Arc<dyn ScrapeObserver>,
}

impl<B: Browser> TcgplayerScraper<B> {
    pub fn new(browser: B, config: Config, observer: Arc<dyn ScrapeObserver>) -> Self {
        let policy = RetryPolicy::new(
            config.max_attempts,
            Duration::from_secs(config.wait_secs),
            Duration::from_secs(DEFAULT_WAIT_INCREMENT_SECS),
        );
        TcgplayerScraper {
            browser,
            config,
            policy,
            observer,
        }
    }

    /// Pages to visit: 1 up to the last page, cut at `MAX_PAGES` when set.
    async fn discover_pages(&self) -> Result<Vec<u32>, ScrapeError> {
        let navigator = PageNavigator::new(&self.browser, self.policy, self.observer.as_ref());
        navigator.load(&self.config.search_url_for_page(1)).await?;

        let mut pages = last_page(&self.browser, &self.policy, self.observer.as_ref()).await?;
        if let Some(max_pages) = self.config.max_pages {
            pages.truncate(max_pages as usize);
        }
        Ok(pages)
    }

    /// Scrapes every listing page into `path`, appending after each page.
    /// Returns the number of records written.
    pub async fn scrape_to_file(&self, path: &Path, date: &str) -> Result<usize, ScrapeError> {
        let pages = self.discover_pages().await?;
        info!("Scraping {} page(s) into {}", pages.len(), path.display());
        // Header-only file when there is nothing to scrape.
        append_records(path, &[])?;

        let navigator = PageNavigator::new(&self.browser, self.policy, self.observer.as_ref());
        let extractor = RecordExtractor::new(&self.browser, self.policy, self.observer.as_ref());

        let mut total = 0;
        for page in pages {
            let entries = navigator
                .load(&self.config.search_url_for_page(page))
                .await?;
            let records = extractor.harvest(entries, date).await?;
            append_records(path, &records)?;

            total += records.len();
            info!(
                "Page {} done: {} record(s), {} in total",
                page,
                records.len(),
                total
            );
        }
        Ok(total)
    }

    /// Ends the browser session.
    pub async fn close(self) -> Result<(), ScrapeError> {
        self.browser.close().await
    }
}

/// Runs every check over the scraped file, then rewrites it without
/// duplicate rows.
pub fn validate_and_deduplicate(
    path: &Path,
    observer: &dyn ScrapeObserver,
) -> Result<ValidationReport, ScrapeError> {
    let records = read_records(path)?;
    let report = CardTableValidator::new(&records, observer).run_all();

    let deduplicated = drop_duplicates(records);
    write_records(path, &deduplicated)?;
    info!(
        "Removed {} duplicated row(s), {} row(s) left in {}",
        report.duplicates,
        deduplicated.len(),
        path.display()
    );
    Ok(report)
}
