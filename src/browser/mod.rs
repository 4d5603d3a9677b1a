pub mod webdriver;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ScrapeError;

/// The few browser operations the scraper needs. Implemented on a live
/// WebDriver session in production and mocked in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Browser: Send + Sync {
    async fn goto(&self, url: &str) -> Result<(), ScrapeError>;

    /// Waits until at least one element matches `css` and returns how many
    /// match. Fails with `Timeout` when nothing shows up in time.
    async fn wait_for_elements(&self, css: &str, timeout: Duration) -> Result<usize, ScrapeError>;

    /// Text of the first element at `xpath`. Fails with `ElementNotFound`
    /// when it does not appear in time.
    async fn wait_for_text(&self, xpath: &str, timeout: Duration) -> Result<String, ScrapeError>;

    /// Re-resolves the elements matching `css` and clicks the one at `index`.
    /// Fails with `StaleElement` when the list changed underneath.
    async fn click_nth(&self, css: &str, index: usize) -> Result<(), ScrapeError>;

    async fn page_source(&self) -> Result<String, ScrapeError>;

    async fn back(&self) -> Result<(), ScrapeError>;

    /// Blocks for `duration` so client side rendering can finish.
    async fn settle(&self, duration: Duration);

    async fn close(&self) -> Result<(), ScrapeError>;
}
