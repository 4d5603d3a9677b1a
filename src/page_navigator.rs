use crate::browser::Browser;
use crate::error::ScrapeError;
use crate::observer::ScrapeObserver;
use crate::page_model::LISTING_ENTRY_SELECTOR;
use crate::retry::{attempt, RetryPolicy};

/// Opens listing pages and waits for their entries to render.
pub struct PageNavigator<'a, B: Browser + ?Sized> {
    browser: &'a B,
    policy: RetryPolicy,
    observer: &'a dyn ScrapeObserver,
}

impl<'a, B: Browser + ?Sized> PageNavigator<'a, B> {
    pub fn new(browser: &'a B, policy: RetryPolicy, observer: &'a dyn ScrapeObserver) -> Self {
        Self {
            browser,
            policy,
            observer,
        }
    }

    /// Navigates to `url` and returns the number of listing entries on it.
    /// Only timeouts are retried; any other failure is returned at once.
    pub async fn load(&self, url: &str) -> Result<usize, ScrapeError> {
        let browser = self.browser;
        let entries = attempt(
            &self.policy,
            "load",
            self.observer,
            ScrapeError::is_timeout,
            |wait| async move {
                browser.goto(url).await?;
                browser.wait_for_elements(LISTING_ENTRY_SELECTOR, wait).await
            },
        )
        .await?;

        self.observer.page_loaded(url, entries);
        Ok(entries)
    }
}
