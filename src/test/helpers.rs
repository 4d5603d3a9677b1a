use std::sync::Mutex;

use crate::cards::card_record::CardRecord;
use crate::error::ScrapeError;
use crate::observer::ScrapeObserver;

pub static RUN_DATE: &str = "2024-03-09";

pub fn luffy_alternate_art() -> CardRecord {
    CardRecord {
        full_product_name: "Monkey.D.Luffy (Alternate Art) - Romance Dawn".to_string(),
        name: "Monkey.D.Luffy".to_string(),
        card_type: vec!["Alternate Art".to_string()],
        set: "Romance Dawn".to_string(),
        current_lowest_price: Some(101.49),
        normal_market_price: Some(110.0),
        foil_market_price: Some(250.5),
        normal_buylist_price: Some(102.0),
        foil_buylist_price: Some(200.0),
        normal_listed_median_price: Some(115.0),
        foil_listed_median_price: Some(260.0),
        date: RUN_DATE.to_string(),
    }
}

pub fn nami_promotion_pack() -> CardRecord {
    CardRecord {
        full_product_name: "Nami (Promotion Pack) - One Piece Promotion Cards".to_string(),
        name: "Nami".to_string(),
        card_type: vec!["Promotion Pack".to_string()],
        set: "One Piece Promotion Cards".to_string(),
        current_lowest_price: Some(0.25),
        normal_market_price: Some(0.3),
        foil_market_price: None,
        normal_buylist_price: Some(0.25),
        foil_buylist_price: None,
        normal_listed_median_price: Some(0.35),
        foil_listed_median_price: None,
        date: RUN_DATE.to_string(),
    }
}

pub fn zoro_without_prices() -> CardRecord {
    CardRecord {
        full_product_name: "Roronoa Zoro".to_string(),
        name: "Roronoa Zoro".to_string(),
        card_type: Vec::new(),
        set: "".to_string(),
        current_lowest_price: None,
        normal_market_price: None,
        foil_market_price: None,
        normal_buylist_price: None,
        foil_buylist_price: None,
        normal_listed_median_price: None,
        foil_listed_median_price: None,
        date: RUN_DATE.to_string(),
    }
}

/// Keeps every observed event as a line of text so tests can assert on them.
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn count_starting_with(&self, prefix: &str) -> usize {
        self.events()
            .iter()
            .filter(|event| event.starts_with(prefix))
            .count()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl ScrapeObserver for RecordingObserver {
    fn attempt_failed(&self, operation: &str, attempt: u32, _error: &ScrapeError) {
        self.push(format!("attempt_failed {} {}", operation, attempt));
    }

    fn entry_skipped(&self, index: usize, _error: &ScrapeError) {
        self.push(format!("entry_skipped {}", index));
    }

    fn record_harvested(&self, record: &CardRecord) {
        self.push(format!("record_harvested {}", record.full_product_name));
    }

    fn page_loaded(&self, url: &str, entries: usize) {
        self.push(format!("page_loaded {} {}", url, entries));
    }

    fn pages_discovered(&self, last_page: u32) {
        self.push(format!("pages_discovered {}", last_page));
    }

    fn validation(&self, check: &str, message: &str) {
        self.push(format!("validation {} {}", check, message));
    }
}
