//! Sequential section scrolling.
//!
//! - [`section::SectionId`]: validated CSS selector naming a page region
//! - [`host::ScrollHost`]: lookup + scroll-into-view seam implemented by drivers
//! - [`scroller::SequentialScroller`]: visits sections in order with a fixed pause
//!
//! ```
//! use std::time::Duration;
//! use tour_scroller::{SectionId, SequentialScroller};
//!
//! let scroller = SequentialScroller::new(SectionId::defaults(), Duration::from_millis(1000));
//! assert_eq!(scroller.sections().len(), 5);
//! assert_eq!(scroller.expected_duration(), Duration::from_secs(5));
//! ```
pub mod host;
pub mod scroller;
pub mod section;

pub use host::{ScrollBehavior, ScrollBlock, ScrollHost, ScrollOptions};
pub use scroller::{SequentialScroller, StepOutcome, TourReport};
pub use section::SectionId;
