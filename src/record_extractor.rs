use std::time::Duration;

use crate::browser::Browser;
use crate::cards::card_record::CardRecord;
use crate::error::ScrapeError;
use crate::observer::ScrapeObserver;
use crate::page_model::{DetailPage, LISTING_ENTRY_SELECTOR};
use crate::retry::RetryPolicy;

/// Visits every entry of the current listing page and turns its detail page
/// into a `CardRecord`.
pub struct RecordExtractor<'a, B: Browser + ?Sized> {
    browser: &'a B,
    policy: RetryPolicy,
    observer: &'a dyn ScrapeObserver,
}

impl<'a, B: Browser + ?Sized> RecordExtractor<'a, B> {
    pub fn new(browser: &'a B, policy: RetryPolicy, observer: &'a dyn ScrapeObserver) -> Self {
        Self {
            browser,
            policy,
            observer,
        }
    }

    /// Harvests `entries` listing entries in index order. A detail page
    /// missing an expected element is retried with a longer settle time.
    /// Those retries share one budget for the whole pass, and the longer
    /// settle time carries over to later entries. A stale entry is skipped,
    /// anything else aborts the harvest.
    pub async fn harvest(
        &self,
        entries: usize,
        date: &str,
    ) -> Result<Vec<CardRecord>, ScrapeError> {
        let mut records = Vec::with_capacity(entries);
        let mut failures = 0;
        let mut index = 0;

        while index < entries {
            let settle = self.policy.wait_for_attempt(failures + 1);
            match extract_entry(self.browser, index, settle, date).await {
                Ok(record) => {
                    self.observer.record_harvested(&record);
                    records.push(record);
                    index += 1;
                }
                Err(e) if e.is_missing_element() => {
                    failures += 1;
                    self.observer.attempt_failed("harvest", failures, &e);
                    if failures >= self.policy.max_attempts {
                        return Err(e);
                    }
                }
                Err(e) if e.is_stale() => {
                    self.observer.entry_skipped(index, &e);
                    index += 1;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(records)
    }
}

async fn extract_entry<B: Browser + ?Sized>(
    browser: &B,
    index: usize,
    settle: Duration,
    date: &str,
) -> Result<CardRecord, ScrapeError> {
    // The listing may have re-rendered since the last visit.
    browser.wait_for_elements(LISTING_ENTRY_SELECTOR, settle).await?;
    browser.click_nth(LISTING_ENTRY_SELECTOR, index).await?;
    browser.settle(settle).await;

    let html = browser.page_source().await?;
    browser.back().await?;

    Ok(DetailPage::parse(&html)?.into_record(date))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use mockall::predicate::eq;

    use super::*;
    use crate::browser::MockBrowser;
    use crate::test::helpers::{luffy_alternate_art, RecordingObserver, RUN_DATE};

    const DETAIL_PAGE: &str = include_str!("test/detail_page.html");
    const SHORT_GUIDE_PAGE: &str = include_str!("test/detail_page_short_guide.html");

    fn policy() -> RetryPolicy {
        RetryPolicy::new(3, Duration::from_secs(12), Duration::from_secs(1))
    }

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn listing_browser(entries: usize) -> MockBrowser {
        let mut browser = MockBrowser::new();
        browser
            .expect_wait_for_elements()
            .with(eq(LISTING_ENTRY_SELECTOR), mockall::predicate::always())
            .returning(move |_, _| Ok(entries));
        browser.expect_settle().returning(|_| ());
        browser.expect_back().returning(|| Ok(()));
        browser
    }

    #[tokio::test]
    async fn test_harvest_every_entry() {
        init();
        let mut browser = listing_browser(2);
        browser
            .expect_click_nth()
            .with(eq(LISTING_ENTRY_SELECTOR), eq(0))
            .times(1)
            .returning(|_, _| Ok(()));
        browser
            .expect_click_nth()
            .with(eq(LISTING_ENTRY_SELECTOR), eq(1))
            .times(1)
            .returning(|_, _| Ok(()));
        let mut sources = vec![SHORT_GUIDE_PAGE, DETAIL_PAGE];
        browser
            .expect_page_source()
            .times(2)
            .returning(move || Ok(sources.pop().unwrap().to_string()));

        let observer = RecordingObserver::default();
        let extractor = RecordExtractor::new(&browser, policy(), &observer);
        let records = extractor.harvest(2, RUN_DATE).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], luffy_alternate_art());
        assert_eq!(records[1].name, "Nami");
        assert_eq!(observer.count_starting_with("record_harvested"), 2);
    }

    #[tokio::test]
    async fn test_stale_entry_is_skipped() {
        init();
        let mut browser = listing_browser(3);
        browser
            .expect_click_nth()
            .with(eq(LISTING_ENTRY_SELECTOR), eq(1))
            .times(1)
            .returning(|_, index| Err(ScrapeError::StaleElement { index }));
        browser.expect_click_nth().times(2).returning(|_, _| Ok(()));
        browser
            .expect_page_source()
            .times(2)
            .returning(|| Ok(DETAIL_PAGE.to_string()));

        let observer = RecordingObserver::default();
        let extractor = RecordExtractor::new(&browser, policy(), &observer);
        let records = extractor.harvest(3, RUN_DATE).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(observer.events()[1], "entry_skipped 1");
        assert_eq!(observer.count_starting_with("attempt_failed"), 0);
    }

    #[tokio::test]
    async fn test_missing_element_retried_with_longer_settle() {
        init();
        let mut browser = MockBrowser::new();
        browser.expect_wait_for_elements().returning(|_, _| Ok(1));
        browser.expect_click_nth().times(2).returning(|_, _| Ok(()));
        browser.expect_back().times(2).returning(|| Ok(()));
        browser
            .expect_settle()
            .with(eq(Duration::from_secs(12)))
            .times(1)
            .returning(|_| ());
        browser
            .expect_settle()
            .with(eq(Duration::from_secs(13)))
            .times(1)
            .returning(|_| ());
        let mut sources = vec![DETAIL_PAGE, "<html><body>Loading...</body></html>"];
        browser
            .expect_page_source()
            .times(2)
            .returning(move || Ok(sources.pop().unwrap().to_string()));

        let observer = RecordingObserver::default();
        let extractor = RecordExtractor::new(&browser, policy(), &observer);
        let records = extractor.harvest(1, RUN_DATE).await.unwrap();

        assert_eq!(records, vec![luffy_alternate_art()]);
        assert_eq!(observer.events()[0], "attempt_failed harvest 1");
    }

    #[tokio::test]
    async fn test_missing_element_three_times_aborts() {
        init();
        let mut browser = listing_browser(4);
        browser.expect_click_nth().times(3).returning(|_, _| Ok(()));
        browser
            .expect_page_source()
            .times(3)
            .returning(|| Ok("<html><body></body></html>".to_string()));

        let observer = RecordingObserver::default();
        let extractor = RecordExtractor::new(&browser, policy(), &observer);
        let err = extractor.harvest(4, RUN_DATE).await.unwrap_err();

        assert!(err.is_missing_element());
        assert_eq!(observer.count_starting_with("attempt_failed harvest"), 3);
    }

    fn recording_settles(browser: &mut MockBrowser) -> Arc<Mutex<Vec<u64>>> {
        let settles = Arc::new(Mutex::new(Vec::new()));
        let recorded = settles.clone();
        browser
            .expect_settle()
            .returning(move |duration| recorded.lock().unwrap().push(duration.as_secs()));
        settles
    }

    #[tokio::test]
    async fn test_failures_on_different_entries_share_one_budget() {
        init();
        let mut browser = MockBrowser::new();
        browser.expect_wait_for_elements().returning(|_, _| Ok(3));
        browser.expect_click_nth().returning(|_, _| Ok(()));
        browser.expect_back().returning(|| Ok(()));
        let settles = recording_settles(&mut browser);
        // Every entry renders without prices on its first visit.
        let mut sources = vec![
            "<html><body></body></html>",
            DETAIL_PAGE,
            "<html><body></body></html>",
            DETAIL_PAGE,
            "<html><body></body></html>",
        ];
        sources.reverse();
        browser
            .expect_page_source()
            .times(5)
            .returning(move || Ok(sources.pop().unwrap().to_string()));

        let observer = RecordingObserver::default();
        let extractor = RecordExtractor::new(&browser, policy(), &observer);
        let err = extractor.harvest(3, RUN_DATE).await.unwrap_err();

        assert!(err.is_missing_element());
        assert_eq!(
            observer.events(),
            vec![
                "attempt_failed harvest 1",
                "record_harvested Monkey.D.Luffy (Alternate Art) - Romance Dawn",
                "attempt_failed harvest 2",
                "record_harvested Monkey.D.Luffy (Alternate Art) - Romance Dawn",
                "attempt_failed harvest 3",
            ]
        );
        assert_eq!(*settles.lock().unwrap(), vec![12, 13, 13, 14, 14]);
    }

    #[tokio::test]
    async fn test_longer_settle_carries_over_to_next_entry() {
        init();
        let mut browser = MockBrowser::new();
        browser.expect_wait_for_elements().returning(|_, _| Ok(2));
        browser.expect_click_nth().returning(|_, _| Ok(()));
        browser.expect_back().returning(|| Ok(()));
        let settles = recording_settles(&mut browser);
        let mut sources = vec![DETAIL_PAGE, DETAIL_PAGE, "<html><body></body></html>"];
        browser
            .expect_page_source()
            .times(3)
            .returning(move || Ok(sources.pop().unwrap().to_string()));

        let observer = RecordingObserver::default();
        let extractor = RecordExtractor::new(&browser, policy(), &observer);
        let records = extractor.harvest(2, RUN_DATE).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(*settles.lock().unwrap(), vec![12, 13, 13]);
    }

    #[tokio::test]
    async fn test_listing_timeout_aborts_without_retry() {
        init();
        let mut browser = MockBrowser::new();
        browser
            .expect_wait_for_elements()
            .times(1)
            .returning(|selector, waited| {
                Err(ScrapeError::Timeout {
                    selector: selector.to_string(),
                    waited,
                })
            });
        browser.expect_click_nth().never();

        let observer = RecordingObserver::default();
        let extractor = RecordExtractor::new(&browser, policy(), &observer);
        let err = extractor.harvest(2, RUN_DATE).await.unwrap_err();

        assert!(err.is_timeout());
        assert!(observer.events().is_empty());
    }
}
