use std::env;

use log::error;

use super::constants::{
    BUCKET_ENV, DEFAULT_MAX_ATTEMPTS, DEFAULT_WAIT_SECS, OUTPUT_DIR, OUTPUT_PREFIX,
    PAGE_PLACEHOLDER, TCGPLAYER_SEARCH_URL, WEBDRIVER_URL,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub search_url: String,
    pub webdriver_url: String,
    pub headless: bool,
    pub output_dir: String,
    pub output_prefix: String,
    pub wait_secs: u64,
    pub max_attempts: u32,
    pub max_pages: Option<u32>,
    pub bucket_name: Option<String>,
    pub upload: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_url: TCGPLAYER_SEARCH_URL.to_string(),
            webdriver_url: WEBDRIVER_URL.to_string(),
            headless: true,
            output_dir: OUTPUT_DIR.to_string(),
            output_prefix: OUTPUT_PREFIX.to_string(),
            wait_secs: DEFAULT_WAIT_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_pages: None,
            bucket_name: None,
            upload: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.update_from(|key| env::var(key).ok());
        config
    }

    /// Builds the listing URL for a page number.
    pub fn search_url_for_page(&self, page: u32) -> String {
        self.search_url.replace(PAGE_PLACEHOLDER, &page.to_string())
    }

    fn update_from<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(search_url) = var("TCG_SEARCH_URL") {
            if search_url.contains(PAGE_PLACEHOLDER) {
                self.search_url = search_url;
            } else {
                error!(
                    "TCG_SEARCH_URL must contain {}, keeping {}",
                    PAGE_PLACEHOLDER, self.search_url
                );
            }
        }
        if let Some(webdriver_url) = var("WEBDRIVER_URL") {
            self.webdriver_url = webdriver_url;
        }
        if let Some(headless) = var("HEADLESS") {
            self.headless = headless != "0";
        }
        if let Some(output_dir) = var("OUTPUT_DIR") {
            self.output_dir = output_dir;
        }
        if let Some(output_prefix) = var("OUTPUT_PREFIX") {
            self.output_prefix = output_prefix;
        }
        if let Some(wait_secs) = var("WAIT_SECS") {
            self.wait_secs = wait_secs.parse().unwrap_or_else(|_| {
                error!("Invalid WAIT_SECS '{}', using {}", wait_secs, DEFAULT_WAIT_SECS);
                DEFAULT_WAIT_SECS
            });
        }
        if let Some(max_attempts) = var("MAX_ATTEMPTS") {
            self.max_attempts = match max_attempts.parse::<u32>() {
                Ok(attempts) if attempts > 0 => attempts,
                _ => {
                    error!(
                        "Invalid MAX_ATTEMPTS '{}', using {}",
                        max_attempts, DEFAULT_MAX_ATTEMPTS
                    );
                    DEFAULT_MAX_ATTEMPTS
                }
            };
        }
        if let Some(max_pages) = var("MAX_PAGES") {
            self.max_pages = match max_pages.parse::<u32>() {
                Ok(pages) => Some(pages),
                Err(_) => {
                    error!("Invalid MAX_PAGES '{}', scraping every page", max_pages);
                    None
                }
            };
        }
        if let Some(bucket_name) = var(BUCKET_ENV) {
            if !bucket_name.is_empty() {
                self.bucket_name = Some(bucket_name);
            }
        }
        if let Some(upload) = var("UPLOAD") {
            self.upload = upload == "1";
        }
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: Config = Config::new();
}
