use clap::Parser;
use std::path::PathBuf;
use tour_common::Result;
use tour_config::TourConfig;
use tour_scroller::SectionId;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "tour.yaml";

/// Scroll a page through its sections, pausing after each one.
#[derive(Debug, Parser)]
#[command(name = "section-tour", version, about)]
pub struct Cli {
    /// Configuration file (YAML/TOML/JSON). Required to exist when given.
    #[arg(short, long, env = "TOUR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Page to open before touring.
    #[arg(short, long)]
    pub url: Option<String>,

    /// Section selector to visit; repeat to build the list in order.
    #[arg(short, long = "section", value_name = "SELECTOR")]
    pub sections: Vec<String>,

    /// Pause after each section, in milliseconds.
    #[arg(short, long)]
    pub delay_ms: Option<u64>,

    /// Run the browser without a visible window.
    #[arg(long)]
    pub headless: bool,

    /// WebDriver endpoint.
    #[arg(long, value_name = "URL")]
    pub webdriver: Option<String>,
}

impl Cli {
    /// Overlay command-line values onto the loaded configuration.
    pub fn apply(&self, cfg: &mut TourConfig) -> Result<()> {
        if let Some(url) = &self.url {
            cfg.page_url = Some(url.clone());
        }
        if !self.sections.is_empty() {
            cfg.tour.sections = SectionId::parse_list(self.sections.iter().cloned())?;
        }
        if let Some(delay_ms) = self.delay_ms {
            cfg.tour.delay_ms = delay_ms;
        }
        if self.headless {
            cfg.driver.headless = true;
        }
        if let Some(endpoint) = &self.webdriver {
            cfg.driver.webdriver_url = endpoint.clone();
        }
        Ok(())
    }
}
