//! Common types and utilities shared across the section-tour crates.
//!
//! This crate holds the shared error type and the observability helpers used
//! by every other crate in the workspace. It stays dependency-light so the
//! scroller core can depend on it without pulling in the browser stack.
//!
//! # Overview
//!
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`TourError`] and [`Result`]: Shared error handling
//!
//! # Examples
//!
//! ```rust
//! use tour_common::TourError;
//!
//! let err = TourError::InvalidSection("   ".into());
//! assert_eq!(err.to_string(), "Invalid section selector: \"   \"");
//! ```
pub mod observability;

/// Error types used across the section-tour workspace.
#[derive(thiserror::Error, Debug)]
pub enum TourError {
    /// The host document (browser session, page) failed underneath a run.
    #[error("Host error: {0}")]
    Host(#[from] anyhow::Error),

    /// A section selector was blank.
    #[error("Invalid section selector: {0:?}")]
    InvalidSection(String),
}

/// Convenient alias for results that use [`TourError`].
pub type Result<T> = std::result::Result<T, TourError>;
