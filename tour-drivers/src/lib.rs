//! Driver layer for touring a page in a real browser.
//!
//! This crate exposes the WebDriver-backed host the sequential scroller runs
//! against.
//!
//! - [`browser::driver::TourDriver`]: WebDriver client wrapper
//! - [`browser::page::TourPage`]: selector lookup and scroll-into-view, as a
//!   [`tour_scroller::ScrollHost`]
pub mod browser;
