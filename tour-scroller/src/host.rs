use crate::section::SectionId;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Motion used by scroll-into-view, mirroring the DOM `behavior` option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
    Auto,
}

/// Vertical alignment used by scroll-into-view, mirroring the DOM `block` option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBlock {
    #[default]
    Start,
    Center,
    End,
    Nearest,
}

/// Options handed to [`ScrollHost::scroll_into_view`].
///
/// Serializes to the exact object the DOM API takes:
/// `{"behavior":"smooth","block":"start"}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollOptions {
    #[serde(default)]
    pub behavior: ScrollBehavior,
    #[serde(default)]
    pub block: ScrollBlock,
}

/// The document the scroller drives.
///
/// Lookups happen at the moment of use; the scroller never caches elements
/// between steps or runs.
#[async_trait]
pub trait ScrollHost: Send + Sync {
    /// Live handle to a region of the document.
    type Element: Send + Sync;

    /// Resolve `section` to the first matching element, or `None`.
    ///
    /// `Err` means the host itself failed, not that nothing matched.
    async fn query_selector(&self, section: &SectionId) -> Result<Option<Self::Element>>;

    /// Ask the host to bring `element` into view.
    async fn scroll_into_view(&self, element: &Self::Element, options: ScrollOptions)
    -> Result<()>;
}
