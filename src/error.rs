//! Error types for catalog-detect.
//!
//! Detection itself never fails on data-quality problems (no anchors, no
//! candidate block, unparseable dates); those produce empty results. The
//! variants here cover contract violations by the caller.

/// Error type for catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A structural path supplied by the caller could not be parsed.
    #[error("Invalid structural path: {0}")]
    InvalidPath(String),

    /// A tuning option is outside its accepted range.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;
