use crate::browser::Browser;
use crate::error::ScrapeError;
use crate::observer::ScrapeObserver;
use crate::page_model::LAST_PAGE_XPATH;
use crate::retry::{attempt, RetryPolicy};

fn parse_page_count(text: &str) -> Result<u32, ScrapeError> {
    text.trim()
        .replace(',', "")
        .parse::<u32>()
        .map_err(|_| ScrapeError::InvalidPageCount(text.to_string()))
}

/// Reads the "last page" control of an already loaded listing and returns
/// every page number from 1 up to it. A missing control is retried.
pub async fn last_page<B: Browser + ?Sized>(
    browser: &B,
    policy: &RetryPolicy,
    observer: &dyn ScrapeObserver,
) -> Result<Vec<u32>, ScrapeError> {
    let text = attempt(
        policy,
        "last_page",
        observer,
        ScrapeError::is_missing_element,
        |wait| browser.wait_for_text(LAST_PAGE_XPATH, wait),
    )
    .await?;

    let last = parse_page_count(&text)?;
    observer.pages_discovered(last);
    Ok((1..=last).collect())
}
