//! Error types for rasterkit-core operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers the failure modes of the pixel data model:
//! - Pixel addressing outside the buffer
//! - Buffer construction from raw data of the wrong size
//!
//! Every error is local and synchronous; nothing in the core performs I/O,
//! so nothing here is transient or worth retrying.
//!
//! # Usage
//!
//! ```rust
//! use rasterkit_core::{Error, Result};
//!
//! fn check(row: u32, col: u32, width: u32, height: u32) -> Result<()> {
//!     if row >= height || col >= width {
//!         return Err(Error::out_of_bounds(row, col, width, height));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(3, 0, 4, 3).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or addressing a [`crate::PixelBuffer`].
///
/// # Categories
///
/// - **Bounds errors**: [`OutOfBounds`](Error::OutOfBounds)
/// - **Dimension errors**: [`InvalidDimensions`](Error::InvalidDimensions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Pixel coordinates are outside buffer bounds.
    ///
    /// Returned when accessing `(row, col)` where `row >= height` or
    /// `col >= width`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rasterkit_core::Error;
    ///
    /// let err = Error::out_of_bounds(7, 2, 4, 5);
    /// assert!(err.to_string().contains("(7, 2)"));
    /// ```
    #[error("pixel (row, col) = ({row}, {col}) out of bounds for buffer {width}x{height}")]
    OutOfBounds {
        /// Row index that was out of bounds
        row: u32,
        /// Column index that was out of bounds
        col: u32,
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
    },

    /// Invalid buffer dimensions.
    ///
    /// Returned when raw data does not hold exactly `width * height * 3`
    /// bytes, or when the byte count would overflow `usize`.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(row: u32, col: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            row,
            col,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a bounds error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds() {
        let err = Error::out_of_bounds(100, 50, 80, 60);
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
        assert!(msg.contains("80x60"));
        assert!(err.is_bounds_error());
    }

    #[test]
    fn test_invalid_dimensions() {
        let err = Error::invalid_dimensions(4, 4, "expected 48 bytes, got 3");
        let msg = err.to_string();
        assert!(msg.contains("4x4"));
        assert!(msg.contains("48"));
        assert!(!err.is_bounds_error());
    }
}
