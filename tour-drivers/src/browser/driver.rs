use crate::browser::page::TourPage;
use anyhow::{Context, Result};
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use tour_config::DriverConfig;
use tracing::info;
use url::Url;
use webdriver::capabilities::Capabilities;

/// Thin wrapper around a `fantoccini` WebDriver client.
pub struct TourDriver {
    pub client: Client,
}

impl TourDriver {
    /// Create a new driver connected to a running WebDriver service.
    ///
    /// The endpoint comes from `driver.webdriver_url` (Chromedriver on
    /// `http://localhost:9515` by default).
    pub async fn connect(config: &DriverConfig) -> Result<Self> {
        let client = ClientBuilder::native()
            .capabilities(build_capabilities(config))
            .connect(&config.webdriver_url)
            .await
            .with_context(|| format!("failed to connect to WebDriver at {}", config.webdriver_url))?;

        info!(
            target: "tour.driver",
            endpoint = %config.webdriver_url,
            headless = config.headless,
            "WebDriver session started"
        );
        Ok(Self { client })
    }

    /// Navigate to `url` and return a [`TourPage`] for it.
    pub async fn goto(&self, url: &Url) -> Result<TourPage> {
        let page = TourPage::new(self.client.clone());
        page.goto(url).await?;
        Ok(page)
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        info!(target: "tour.driver", "WebDriver session closed");
        Ok(())
    }
}

/// Construct Chrome command-line arguments for the session.
pub fn build_chrome_arguments(config: &DriverConfig) -> Vec<String> {
    let (width, height) = config.window_size;
    let mut args = vec![
        "--disable-infobars".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--hide-scrollbars".to_string(),
        format!("--window-size={width},{height}"),
    ];
    if config.headless {
        args.push("--headless".to_string());
        args.push("--disable-gpu".to_string());
    }
    args
}

fn build_capabilities(config: &DriverConfig) -> Capabilities {
    let mut caps = Capabilities::new();
    caps.insert(
        "goog:chromeOptions".to_string(),
        json!({ "args": build_chrome_arguments(config) }),
    );
    caps
}
