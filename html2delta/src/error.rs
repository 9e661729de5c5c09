//! Error types for HTML to Delta conversion

use thiserror::Error;

/// Errors that can abort a conversion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// A color value used a syntax other than hex, rgb(a) or hsl(a)
    #[error("Color format not supported: {0}")]
    UnsupportedColorFormat(String),
    /// A CSS length used a unit that cannot be converted to pixels
    #[error("Unit not supported: {0}")]
    UnsupportedUnit(String),
    /// The document nests deeper than the configured ceiling
    #[error("Nesting depth exceeds the limit of {limit}")]
    DepthLimitExceeded { limit: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
