mod browser;
mod cards;
mod error;
mod observer;
mod page_model;
mod page_navigator;
mod pagination;
mod record_extractor;
mod retry;
mod s3_uploader;
mod tcgplayer_scraper;
#[cfg(test)]
mod test;
mod utilities;
mod validator;

use std::path::Path;
use std::sync::Arc;

use log::{error, info};

use browser::webdriver::WebDriverBrowser;
use error::ScrapeError;
use observer::LogObserver;
use s3_uploader::{upload_output, S3Uploader};
use tcgplayer_scraper::{validate_and_deduplicate, TcgplayerScraper};
use utilities::config::CONFIG;
use utilities::constants::{COLUMN_DATE_FORMAT, FILE_DATE_FORMAT};
use utilities::file_management::output_file_path;
use utilities::string_manipulators::date_time_as_string;

async fn scrape_cards_and_save_to_file(path: &Path, date: &str) -> Result<usize, ScrapeError> {
    let browser = WebDriverBrowser::connect(&CONFIG.webdriver_url, CONFIG.headless).await?;
    let scraper = TcgplayerScraper::new(browser, CONFIG.clone(), Arc::new(LogObserver));

    let scraped = scraper.scrape_to_file(path, date).await;
    if let Err(e) = scraper.close().await {
        error!("Failed to close the browser session: {}", e);
    }
    scraped
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let start_time = chrono::prelude::Local::now();
    info!("Starting at {}", start_time);

    let file_date = date_time_as_string(Some(start_time), Some(FILE_DATE_FORMAT));
    let date = date_time_as_string(Some(start_time), Some(COLUMN_DATE_FORMAT));
    let path = output_file_path(&CONFIG.output_dir, &CONFIG.output_prefix, &file_date);

    let scraped = scrape_cards_and_save_to_file(&path, &date)
        .await
        .inspect_err(|e| error!("Scrape failed: {}", e))?;

    let report = validate_and_deduplicate(&path, &LogObserver)?;

    if CONFIG.upload {
        let uploader = S3Uploader::from_env().await;
        upload_output(&uploader, CONFIG.bucket_name.as_deref(), &path)
            .await
            .inspect_err(|e| error!("Upload failed: {}", e))?;
    }

    let end_time = chrono::prelude::Local::now();
    info!(
        "TCGplayer scrape started at: {}. Finished at: {}. Took: {} seconds and with {} records ({} duplicated) in {}",
        start_time,
        end_time,
        (end_time - start_time).num_seconds(),
        scraped,
        report.duplicates,
        path.display()
    );
    Ok(())
}
