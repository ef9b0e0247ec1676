use serde::{Deserialize, Serialize};
use std::fmt;
use tour_common::{Result, TourError};

/// Sections visited when nothing else is configured, in visiting order.
pub const DEFAULT_SECTIONS: [&str; 5] = [
    "#profile",
    "#career",
    "#experience",
    "#coaching-experience",
    "#qualifications",
];

/// CSS selector naming a region of the document.
///
/// The selector is opaque to the scroller; the only check is that it is not
/// blank, since an empty selector can never resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SectionId(String);

impl SectionId {
    pub fn new(selector: impl Into<String>) -> Result<Self> {
        let selector = selector.into();
        if selector.trim().is_empty() {
            return Err(TourError::InvalidSection(selector));
        }
        Ok(Self(selector))
    }

    /// The built-in section list.
    pub fn defaults() -> Vec<SectionId> {
        DEFAULT_SECTIONS
            .iter()
            .map(|s| SectionId(s.to_string()))
            .collect()
    }

    /// Build an ordered list, failing on the first blank selector.
    pub fn parse_list<I, S>(selectors: I) -> Result<Vec<SectionId>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        selectors.into_iter().map(SectionId::new).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SectionId {
    type Error = TourError;

    fn try_from(value: String) -> Result<Self> {
        SectionId::new(value)
    }
}

impl From<SectionId> for String {
    fn from(id: SectionId) -> Self {
        id.0
    }
}

impl AsRef<str> for SectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
