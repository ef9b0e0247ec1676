use anyhow::Result;
use async_trait::async_trait;
use fantoccini::{elements::Element, Client, Locator};
use tour_scroller::{ScrollHost, ScrollOptions, SectionId};
use tracing::info;
use url::Url;

/// `arguments[0]` is the element, `arguments[1]` the `{ behavior, block }` dictionary.
pub const SCROLL_INTO_VIEW_SCRIPT: &str = "arguments[0].scrollIntoView(arguments[1]);";

/// Page wrapper exposing the lookups and scrolling the tour needs.
pub struct TourPage {
    pub(crate) client: Client,
}

impl TourPage {
    /// Construct a page wrapper around an existing WebDriver client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Navigate to `url`.
    pub async fn goto(&self, url: &Url) -> Result<()> {
        self.client.goto(url.as_str()).await?;
        info!(target: "tour.driver", %url, "page loaded");
        Ok(())
    }

    /// Return the page title.
    pub async fn get_title(&self) -> Result<String> {
        self.client.title().await.map_err(anyhow::Error::from)
    }

    /// Find the first element matching a CSS selector, if any.
    ///
    /// Matches come back in document order, so this is the same element
    /// `document.querySelector` would return.
    pub async fn find_first(&self, selector: &str) -> Result<Option<Element>> {
        let elements = self.client.find_all(Locator::Css(selector)).await?;
        Ok(elements.into_iter().next())
    }
}

#[async_trait]
impl ScrollHost for TourPage {
    type Element = Element;

    async fn query_selector(&self, section: &SectionId) -> Result<Option<Element>> {
        self.find_first(section.as_str()).await
    }

    async fn scroll_into_view(&self, element: &Element, options: ScrollOptions) -> Result<()> {
        let args = scroll_arguments(element, options)?;
        self.client.execute(SCROLL_INTO_VIEW_SCRIPT, args).await?;
        Ok(())
    }
}

fn scroll_arguments(element: &Element, options: ScrollOptions) -> Result<Vec<serde_json::Value>> {
    Ok(vec![
        serde_json::to_value(element)?,
        serde_json::to_value(options)?,
    ])
}
