//! Channel-level arithmetic shared by the color transforms.
//!
//! Every function here works on a single 8-bit channel value and widens to
//! `i32`/`i64` internally, so intermediate results can leave `[0, 255]`
//! before [`clamp`] brings them back.
//!
//! # Functions
//!
//! - [`clamp`] - saturate to `[0, 255]`
//! - [`scale_by_percent`] - brightness primitive
//! - [`invert`] - negative primitive
//! - [`quantize`] - posterize primitive
//! - [`luma`] - BT.601 grayscale value

use crate::{OpsError, OpsResult};

/// BT.601 luma weights in thousandths: `Y = 0.299 R + 0.587 G + 0.114 B`.
pub const BT601_WEIGHTS: [u32; 3] = [299, 587, 114];

/// Largest accepted posterize level count; above it the bucket width is 0.
pub const MAX_LEVELS: i32 = 256;

/// Saturates `v` to `[0, 255]`.
///
/// # Example
///
/// ```rust
/// use rasterkit_ops::color_math::clamp;
///
/// assert_eq!(clamp(-12), 0);
/// assert_eq!(clamp(300), 255);
/// assert_eq!(clamp(77), 77);
/// ```
#[inline]
pub fn clamp(v: i64) -> u8 {
    v.clamp(0, 255) as u8
}

/// Scales a channel by `pct` percent: `clamp(c + pct * c / 100)`.
///
/// The division truncates toward zero. Negative `pct` darkens, positive
/// brightens; `pct` itself is unbounded.
///
/// # Example
///
/// ```rust
/// use rasterkit_ops::color_math::scale_by_percent;
///
/// assert_eq!(scale_by_percent(100, 50), 150);
/// assert_eq!(scale_by_percent(100, -50), 50);
/// assert_eq!(scale_by_percent(255, 50), 255);
/// ```
#[inline]
pub fn scale_by_percent(channel: u8, pct: i32) -> u8 {
    let c = channel as i64;
    clamp(c + (pct as i64) * c / 100)
}

/// Inverts a channel: `255 - c`.
#[inline]
pub fn invert(channel: u8) -> u8 {
    255 - channel
}

/// Returns the bucket width for `levels` posterize levels: `256 / levels`.
///
/// # Errors
///
/// [`OpsError::InvalidArgument`] when `levels <= 0`, or when
/// `levels > 256` (the width would be zero).
pub fn quantize_interval(levels: i32) -> OpsResult<i32> {
    if levels <= 0 {
        return Err(OpsError::invalid_argument(
            "levels",
            format!("must be >= 1, got {}", levels),
        ));
    }
    if levels > MAX_LEVELS {
        return Err(OpsError::invalid_argument(
            "levels",
            format!("must be <= {}, got {}", MAX_LEVELS, levels),
        ));
    }
    Ok(256 / levels)
}

/// Snaps a channel down to the start of its bucket when divided into
/// `interval`-wide buckets.
#[inline]
pub fn quantize_with_interval(channel: u8, interval: i32) -> u8 {
    debug_assert!(interval > 0);
    let c = channel as i32;
    ((c / interval) * interval) as u8
}

/// Quantizes a channel to `levels` levels: `(c / (256 / levels)) * (256 / levels)`.
///
/// # Example
///
/// ```rust
/// use rasterkit_ops::color_math::quantize;
///
/// assert_eq!(quantize(200, 2).unwrap(), 128);
/// assert_eq!(quantize(127, 2).unwrap(), 0);
/// assert!(quantize(10, 0).is_err());
/// ```
pub fn quantize(channel: u8, levels: i32) -> OpsResult<u8> {
    let interval = quantize_interval(levels)?;
    Ok(quantize_with_interval(channel, interval))
}

/// BT.601 luma of an RGB triple, rounded to nearest.
///
/// # Example
///
/// ```rust
/// use rasterkit_ops::color_math::luma;
///
/// assert_eq!(luma(255, 255, 255), 255);
/// assert_eq!(luma(0, 0, 0), 0);
/// assert_eq!(luma(255, 0, 0), 76);
/// ```
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let [wr, wg, wb] = BT601_WEIGHTS;
    let sum = wr * r as u32 + wg * g as u32 + wb * b as u32;
    // weights sum to 1000, so the result never exceeds 255
    ((sum + 500) / 1000) as u8
}
