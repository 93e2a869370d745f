//! Error types for I/O operations.
//!
//! Codec library errors are flattened to strings here so that no
//! `png` or `jpeg-*` type appears in the public API.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported format or extension.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    Decode(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    Encode(String),

    /// Image dimensions that cannot be decoded or encoded.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Image width
        width: u32,
        /// Image height
        height: u32,
        /// Why the size is rejected
        reason: String,
    },

    /// Error raised while building the pixel buffer.
    #[error(transparent)]
    Core(#[from] rasterkit_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
