use anyhow::Result;
use clap::Parser;
use cli::{Cli, DEFAULT_CONFIG_FILE};
use tour_common::observability::init_logging;
use tour_config::{TourConfig, TourConfigLoader};
use tour_drivers::browser::{driver::TourDriver, page::TourPage};
use tour_scroller::{SequentialScroller, TourReport};
use tracing::{info, warn};
use url::Url;
mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config (env wins over file, CLI wins over both)
    let loader = match &cli.config {
        Some(path) => TourConfigLoader::new().with_file(path),
        None => TourConfigLoader::new().with_optional_file(DEFAULT_CONFIG_FILE),
    };
    let mut cfg: TourConfig = loader.load()?;
    cli.apply(&mut cfg)?;

    let log_path = init_logging(cfg.logging.to_log_config())?;
    info!(target: "tour.app", log = %log_path.display(), "section-tour starting");

    let url = cfg.page_url()?;
    let scroller = cfg.tour.scroller();
    let driver = TourDriver::connect(&cfg.driver).await?;

    // Ctrl-C drops the in-flight tour; the session is closed either way.
    let outcome = tokio::select! {
        res = tour(&driver, &url, &scroller) => Some(res),
        _ = tokio::signal::ctrl_c() => None,
    };

    if let Err(e) = driver.close().await {
        warn!(target: "tour.app", error = %e, "failed to close WebDriver session");
    }

    match outcome {
        Some(report) => {
            let report = report?;
            info!(
                target: "tour.app",
                scrolled = report.scrolled(),
                skipped = report.skipped(),
                "tour complete"
            );
        }
        None => warn!(target: "tour.app", "interrupted; remaining sections abandoned"),
    }
    Ok(())
}

async fn page_title(page: &TourPage) -> String {
    title_or_empty(page.get_title().await)
}

fn title_or_empty(title: Result<String>) -> String {
    match title {
        Ok(title) => title,
        Err(e) => {
            warn!(target: "tour.app", error = %e, "failed to read page title");
            String::new()
        }
    }
}

async fn tour(driver: &TourDriver, url: &Url, scroller: &SequentialScroller) -> Result<TourReport> {
    let page = driver.goto(url).await?;
    let title = page_title(&page).await;
    info!(target: "tour.app", %title, "touring page");
    Ok(scroller.run(&page).await?)
}
