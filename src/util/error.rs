//! Error types for yologrid.

use thiserror::Error;

/// Result alias for yologrid operations.
pub type YoloGridResult<T> = std::result::Result<T, YoloGridError>;

/// Errors that can occur while decoding or filtering detections.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum YoloGridError {
    /// The output tensor length does not match the configured grid geometry.
    #[error("tensor length {got} does not match grid geometry (expected {expected})")]
    ConfigurationMismatch { expected: usize, got: usize },
    /// A caller-supplied parameter is outside its valid range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
    /// The grid geometry cannot describe any network output.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(&'static str),
    /// Image decoding or encoding failed.
    #[cfg(feature = "image-io")]
    #[error("image I/O failed: {reason}")]
    ImageIo { reason: String },
}
