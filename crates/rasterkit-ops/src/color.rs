//! Per-pixel color transforms.
//!
//! Each transform maps every pixel independently through a
//! [`color_math`](crate::color_math) primitive and returns a new buffer of
//! the same dimensions.
//!
//! # Operations
//!
//! - [`grayscale`] - BT.601 luma, stored as R = G = B
//! - [`brightness`] - percent scaling per channel
//! - [`negative`] - channel inversion
//! - [`posterize`] - level quantization per channel
//!
//! # Grayscale
//!
//! Grayscale output is computed, not copied: each pixel becomes
//! `(y, y, y)` with `y = (299 R + 587 G + 114 B + 500) / 1000`. Copying the
//! packed color value into a gray-typed buffer would leave the image
//! saturated.

use crate::color_math::{invert, luma, quantize_interval, quantize_with_interval, scale_by_percent};
use crate::OpsResult;
use rasterkit_core::PixelBuffer;
use tracing::trace;

/// Converts to grayscale using BT.601 luma weights.
///
/// # Example
///
/// ```rust
/// use rasterkit_core::PixelBuffer;
/// use rasterkit_ops::color::grayscale;
///
/// let src = PixelBuffer::filled(2, 2, [255, 0, 0]);
/// let gray = grayscale(&src);
/// assert_eq!(gray.pixel(0, 0), [76, 76, 76]);
/// assert!(gray.is_grayscale());
/// ```
pub fn grayscale(src: &PixelBuffer) -> PixelBuffer {
    trace!(width = src.width(), height = src.height(), "grayscale");
    let mut dst = src.clone();
    dst.map_pixels(|[r, g, b]| {
        let y = luma(r, g, b);
        [y, y, y]
    });
    dst
}

/// Scales every channel by `percent` percent, clamping to `[0, 255]`.
///
/// Negative values darken, positive values brighten, `0` is the identity.
pub fn brightness(src: &PixelBuffer, percent: i32) -> PixelBuffer {
    trace!(width = src.width(), height = src.height(), percent, "brightness");
    let mut dst = src.clone();
    if percent != 0 {
        dst.map_pixels(|[r, g, b]| {
            [
                scale_by_percent(r, percent),
                scale_by_percent(g, percent),
                scale_by_percent(b, percent),
            ]
        });
    }
    dst
}

/// Inverts every channel.
pub fn negative(src: &PixelBuffer) -> PixelBuffer {
    trace!(width = src.width(), height = src.height(), "negative");
    let mut dst = src.clone();
    dst.map_pixels(|[r, g, b]| [invert(r), invert(g), invert(b)]);
    dst
}

/// Quantizes every channel to `levels` levels.
///
/// # Errors
///
/// [`OpsError::InvalidArgument`](crate::OpsError::InvalidArgument) when
/// `levels <= 0` or `levels > 256`, checked before any pixel is touched.
///
/// # Example
///
/// ```rust
/// use rasterkit_core::PixelBuffer;
/// use rasterkit_ops::color::posterize;
///
/// let src = PixelBuffer::filled(1, 1, [200, 100, 50]);
/// let out = posterize(&src, 2).unwrap();
/// assert_eq!(out.pixel(0, 0), [128, 0, 0]);
/// assert!(posterize(&src, 0).is_err());
/// ```
pub fn posterize(src: &PixelBuffer, levels: i32) -> OpsResult<PixelBuffer> {
    let interval = quantize_interval(levels)?;
    trace!(width = src.width(), height = src.height(), levels, interval, "posterize");

    let mut dst = src.clone();
    dst.map_pixels(|[r, g, b]| {
        [
            quantize_with_interval(r, interval),
            quantize_with_interval(g, interval),
            quantize_with_interval(b, interval),
        ]
    });
    Ok(dst)
}
