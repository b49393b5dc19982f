//! Error types.

use thiserror::Error;

/// Errors raised while creating or driving a resizer.
///
/// Most misuse (pressing a disabled handle, a missing callback, a zero-sized
/// axis) is silently ignored; only the cases below are reported.
#[derive(Debug, Error)]
pub enum ResizeError {
    /// The element's current transform is not `none` or a 2-D `matrix(...)`.
    #[error("Malformed transform: {0:?}")]
    MalformedTransform(String),
    /// A selector did not resolve to an element.
    #[error("Element not found: {0}")]
    ElementNotFound(String),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration validation and loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{axis} range is inverted: min {min} > max {max}")]
    InvertedRange { axis: &'static str, min: f64, max: f64 },
    #[error("{axis} range minimum must be a finite, non-negative number (got {min})")]
    InvalidMinimum { axis: &'static str, min: f64 },
    #[error("Proportional ratio must be finite and positive (got {0})")]
    InvalidRatio(f64),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for resizer operations.
pub type ResizeResult<T> = Result<T, ResizeError>;
