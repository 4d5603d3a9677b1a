use std::time::Duration;

use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use log::{debug, info};
use serde_json::json;

use super::Browser;
use crate::error::ScrapeError;

const CHROME_ARGS: [&str; 3] = ["--headless", "--no-sandbox", "--disable-dev-shm-usage"];

/// A Chrome session driven over the WebDriver protocol.
pub struct WebDriverBrowser {
    client: Client,
}

impl WebDriverBrowser {
    pub async fn connect(webdriver_url: &str, headless: bool) -> Result<Self, ScrapeError> {
        info!("Creating driver on {}", webdriver_url);

        let args: Vec<&str> = CHROME_ARGS
            .iter()
            .copied()
            .filter(|arg| headless || *arg != "--headless")
            .collect();
        let mut capabilities = serde_json::Map::new();
        capabilities.insert("browserName".to_string(), json!("chrome"));
        capabilities.insert("goog:chromeOptions".to_string(), json!({ "args": args }));

        let client = ClientBuilder::native()
            .capabilities(capabilities)
            .connect(webdriver_url)
            .await?;

        info!("Driver successfully created.");
        Ok(Self { client })
    }
}

fn stale_or(error: CmdError, index: usize) -> ScrapeError {
    if error.is_stale_element_reference() {
        ScrapeError::StaleElement { index }
    } else {
        ScrapeError::WebDriver(error)
    }
}

/// A structural element that never showed up is `ElementNotFound`, whether
/// the wait ran out or the driver answered "no such element".
fn missing_or(error: CmdError, xpath: &str) -> ScrapeError {
    match error {
        CmdError::WaitTimeout => ScrapeError::element_not_found(xpath),
        e if e.is_no_such_element() => ScrapeError::element_not_found(xpath),
        e => ScrapeError::WebDriver(e),
    }
}

#[async_trait]
impl Browser for WebDriverBrowser {
    async fn goto(&self, url: &str) -> Result<(), ScrapeError> {
        debug!("Accessing {}", url);
        self.client.goto(url).await?;
        Ok(())
    }

    async fn wait_for_elements(&self, css: &str, timeout: Duration) -> Result<usize, ScrapeError> {
        match self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(css))
            .await
        {
            Ok(_) => Ok(self.client.find_all(Locator::Css(css)).await?.len()),
            Err(CmdError::WaitTimeout) => Err(ScrapeError::Timeout {
                selector: css.to_string(),
                waited: timeout,
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn wait_for_text(&self, xpath: &str, timeout: Duration) -> Result<String, ScrapeError> {
        let element = self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::XPath(xpath))
            .await
            .map_err(|e| missing_or(e, xpath))?;
        Ok(element.text().await?)
    }

    async fn click_nth(&self, css: &str, index: usize) -> Result<(), ScrapeError> {
        let elements = self
            .client
            .find_all(Locator::Css(css))
            .await
            .map_err(|e| stale_or(e, index))?;
        let element = elements
            .get(index)
            .ok_or(ScrapeError::StaleElement { index })?;
        element.click().await.map_err(|e| stale_or(e, index))
    }

    async fn page_source(&self) -> Result<String, ScrapeError> {
        Ok(self.client.source().await?)
    }

    async fn back(&self) -> Result<(), ScrapeError> {
        self.client.back().await?;
        Ok(())
    }

    async fn settle(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    async fn close(&self) -> Result<(), ScrapeError> {
        info!("Closing driver");
        self.client.clone().close().await?;
        Ok(())
    }
}
