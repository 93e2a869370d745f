//! Box blur with clamped (edge-replicated) sampling.
//!
//! Each output pixel is the integer-truncated mean of the
//! `(2r + 1) x (2r + 1)` square centred on it. Samples that fall outside the
//! image snap to the nearest edge pixel, so the divisor is always
//! `(2r + 1)^2`.
//!
//! # Strategies
//!
//! - [`BlurStrategy::Naive`] - direct neighborhood sum,
//!   `O(w * h * k^2)` with `k = min(2r + 1, max(w, h))`
//! - [`BlurStrategy::Separable`] - horizontal window sums followed by
//!   vertical window sums, `O(w * h * k)`
//!
//! Taps that clamp onto the same edge sample are counted with a weight
//! instead of being visited one by one, so any `i32` radius is cheap. Both
//! strategies add up the same exact integer total per channel (in `u128`)
//! and divide once, so their outputs are identical.
//!
//! All sums read from the source buffer; nothing is written back into it
//! while the pass runs.
//!
//! # Example
//!
//! ```rust
//! use rasterkit_core::PixelBuffer;
//! use rasterkit_ops::filter::box_blur;
//!
//! let src = PixelBuffer::filled(16, 16, [40, 80, 120]);
//! let blurred = box_blur(&src, 2).unwrap();
//! assert_eq!(blurred, src);
//! ```

use crate::{OpsError, OpsResult};
use rasterkit_core::{PixelBuffer, CHANNELS};
use tracing::{debug, trace};

/// How [`box_blur_with`] evaluates the neighborhood sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlurStrategy {
    /// Sum every sample of the square directly.
    Naive,
    /// Sum rows first, then columns of row sums.
    #[default]
    Separable,
}

/// Validates a blur radius and converts it to `usize`.
pub(crate) fn checked_radius(radius: i32) -> OpsResult<usize> {
    if radius < 0 {
        return Err(OpsError::invalid_argument(
            "radius",
            format!("must be >= 0, got {}", radius),
        ));
    }
    Ok(radius as usize)
}

/// Number of samples in the square window, as the divisor for the mean.
#[inline]
pub(crate) fn window_area(radius: usize) -> u128 {
    let side = 2 * radius as u128 + 1;
    side * side
}

/// In-range part `[lo, hi]` of the window `center - radius ..= center + radius`.
#[inline]
pub(crate) fn window_span(center: usize, radius: usize, len: usize) -> (usize, usize) {
    (
        center.saturating_sub(radius),
        center.saturating_add(radius).min(len - 1),
    )
}

/// Taps falling off the low and high ends of the window. Clamping lands
/// them on the first and last sample respectively.
#[inline]
pub(crate) fn overhang(center: usize, radius: usize, len: usize) -> (usize, usize) {
    (
        radius.saturating_sub(center),
        center.saturating_add(radius).saturating_sub(len - 1),
    )
}

/// Number of window taps that clamp onto `sample`.
#[inline]
pub(crate) fn tap_count(sample: usize, len: usize, (below, above): (usize, usize)) -> u64 {
    let mut taps = 1;
    if sample == 0 {
        taps += below;
    }
    if sample == len - 1 {
        taps += above;
    }
    taps as u64
}

/// Box blur using the separable strategy.
///
/// # Errors
///
/// [`OpsError::InvalidArgument`] when `radius < 0`.
pub fn box_blur(src: &PixelBuffer, radius: i32) -> OpsResult<PixelBuffer> {
    box_blur_with(src, radius, BlurStrategy::Separable)
}

/// Box blur by direct neighborhood summation.
///
/// This is the reference definition; prefer [`box_blur`] for real images.
///
/// # Errors
///
/// [`OpsError::InvalidArgument`] when `radius < 0`.
pub fn box_blur_naive(src: &PixelBuffer, radius: i32) -> OpsResult<PixelBuffer> {
    box_blur_with(src, radius, BlurStrategy::Naive)
}

/// Box blur with an explicit strategy.
///
/// `radius == 0` and zero-area inputs return a copy of `src`.
pub fn box_blur_with(
    src: &PixelBuffer,
    radius: i32,
    strategy: BlurStrategy,
) -> OpsResult<PixelBuffer> {
    let radius = checked_radius(radius)?;
    let (width, height) = src.dimensions();
    trace!(width, height, radius, ?strategy, "box_blur");

    if radius == 0 || src.is_empty() {
        return Ok(src.clone());
    }

    debug!(window_side = 2 * radius as u64 + 1, "box blur window");

    let data = match strategy {
        BlurStrategy::Naive => blur_naive(src, radius),
        BlurStrategy::Separable => {
            let sums = horizontal_sums(src, radius);
            vertical_average(&sums, width as usize, height as usize, radius)
        }
    };

    Ok(PixelBuffer::from_raw(width, height, data)?)
}

/// Direct summation over each output pixel's clamped neighborhood.
///
/// Samples the window reaches more than once through clamping are weighted
/// by their tap count, so the loop visits each distinct sample once.
fn blur_naive(src: &PixelBuffer, radius: usize) -> Vec<u8> {
    let width = src.width() as usize;
    let height = src.height() as usize;
    let area = window_area(radius);
    let data = src.data();

    let mut dst = Vec::with_capacity(data.len());
    for y in 0..height {
        let (y_lo, y_hi) = window_span(y, radius, height);
        let y_over = overhang(y, radius, height);
        for x in 0..width {
            let (x_lo, x_hi) = window_span(x, radius, width);
            let x_over = overhang(x, radius, width);
            let mut sum = [0u128; CHANNELS];
            for sy in y_lo..=y_hi {
                let wy = tap_count(sy, height, y_over) as u128;
                for sx in x_lo..=x_hi {
                    let weight = wy * tap_count(sx, width, x_over) as u128;
                    let idx = (sy * width + sx) * CHANNELS;
                    for c in 0..CHANNELS {
                        sum[c] += weight * data[idx + c] as u128;
                    }
                }
            }
            for c in 0..CHANNELS {
                dst.push((sum[c] / area) as u8);
            }
        }
    }
    dst
}

/// Sums of `2r + 1` horizontally adjacent samples, per pixel and channel.
///
/// Each value is at most `255 * (2r + 1)`, which fits a `u64` for any
/// `i32` radius.
pub(crate) fn horizontal_sums(src: &PixelBuffer, radius: usize) -> Vec<u64> {
    let width = src.width() as usize;
    let mut sums = vec![0u64; src.data().len()];
    for (y, out) in sums.chunks_exact_mut(width * CHANNELS).enumerate() {
        horizontal_sums_row(src.row(y as u32), out, width, radius);
    }
    sums
}

/// One row of [`horizontal_sums`], from per-channel prefix sums plus the
/// clamped overhang on the edge samples.
pub(crate) fn horizontal_sums_row(row: &[u8], out: &mut [u64], width: usize, radius: usize) {
    let mut prefix = vec![0u64; width + 1];
    for c in 0..CHANNELS {
        for x in 0..width {
            prefix[x + 1] = prefix[x] + row[x * CHANNELS + c] as u64;
        }
        let first = row[c] as u64;
        let last = row[(width - 1) * CHANNELS + c] as u64;

        for x in 0..width {
            let (lo, hi) = window_span(x, radius, width);
            let (below, above) = overhang(x, radius, width);
            out[x * CHANNELS + c] =
                prefix[hi + 1] - prefix[lo] + below as u64 * first + above as u64 * last;
        }
    }
}

/// Sums `2r + 1` vertically adjacent row sums and divides by the window
/// area.
fn vertical_average(sums: &[u64], width: usize, height: usize, radius: usize) -> Vec<u8> {
    let stride = width * CHANNELS;
    let mut dst = vec![0u8; sums.len()];
    for (y, out) in dst.chunks_exact_mut(stride).enumerate() {
        vertical_average_row(sums, out, y, width, height, radius);
    }
    dst
}

/// One output row of [`vertical_average`].
///
/// The full window total reaches `255 * (2r + 1)^2`, past `u64` for large
/// radii, so it is accumulated in `u128`.
pub(crate) fn vertical_average_row(
    sums: &[u64],
    out: &mut [u8],
    y: usize,
    width: usize,
    height: usize,
    radius: usize,
) {
    let stride = width * CHANNELS;
    let area = window_area(radius);
    let (lo, hi) = window_span(y, radius, height);
    let over = overhang(y, radius, height);

    let mut acc = vec![0u128; stride];
    for sy in lo..=hi {
        let weight = tap_count(sy, height, over) as u128;
        for (a, s) in acc.iter_mut().zip(&sums[sy * stride..(sy + 1) * stride]) {
            *a += weight * *s as u128;
        }
    }
    for (o, a) in out.iter_mut().zip(&acc) {
        *o = (*a / area) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic pseudo-random image (xorshift).
    fn noise(width: u32, height: u32, seed: u32) -> PixelBuffer {
        let mut state = seed.max(1);
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state & 0xFF) as u8
        };
        PixelBuffer::from_fn(width, height, |_, _| [next(), next(), next()])
    }

    #[test]
    fn test_blur_radius_zero_is_identity() {
        let src = noise(7, 5, 3);
        assert_eq!(box_blur(&src, 0).unwrap(), src);
        assert_eq!(box_blur_naive(&src, 0).unwrap(), src);
    }

    #[test]
    fn test_blur_negative_radius() {
        let src = noise(4, 4, 1);
        let err = box_blur(&src, -1).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(box_blur_naive(&src, -7).is_err());
    }

    #[test]
    fn test_blur_uniform_unchanged() {
        for (w, h) in [(1, 1), (2, 3), (9, 4), (16, 16)] {
            let src = PixelBuffer::filled(w, h, [13, 200, 77]);
            assert_eq!(box_blur(&src, 1).unwrap(), src);
            assert_eq!(box_blur_naive(&src, 1).unwrap(), src);
        }
    }

    #[test]
    fn test_blur_edge_replication() {
        // 3x1: [0, 0, 90] in red; at x = 2 the window is {0, 90, 90} (clamped)
        let src = PixelBuffer::from_raw(3, 1, vec![0, 0, 0, 0, 0, 0, 90, 0, 0]).unwrap();
        let dst = box_blur_naive(&src, 1).unwrap();
        // rows clamp too: every sample is counted 3 times vertically
        assert_eq!(dst.pixel(0, 0)[0], 0);
        assert_eq!(dst.pixel(0, 1)[0], 30);
        assert_eq!(dst.pixel(0, 2)[0], 60);
    }

    #[test]
    fn test_blur_truncates() {
        // 2x1 with red 0 and 1: every 3x3 window holds 0s and 1s, mean < 1
        let src = PixelBuffer::from_raw(2, 1, vec![0, 0, 0, 1, 0, 0]).unwrap();
        let dst = box_blur_naive(&src, 1).unwrap();
        assert_eq!(dst.pixel(0, 0)[0], 0);
        assert_eq!(dst.pixel(0, 1)[0], 0);
    }

    #[test]
    fn test_blur_reads_source_only() {
        // A single bright pixel spreads symmetrically; a pass reading its own
        // output would skew the result toward later pixels.
        let mut src = PixelBuffer::new(5, 5);
        src.set_pixel(2, 2, [225, 225, 225]);
        let dst = box_blur(&src, 1).unwrap();
        for row in 1..=3 {
            for col in 1..=3 {
                assert_eq!(dst.pixel(row, col), [25, 25, 25]);
            }
        }
        assert_eq!(dst.pixel(0, 0), [0, 0, 0]);
        assert_eq!(src.pixel(2, 2), [225, 225, 225]);
    }

    #[test]
    fn test_separable_matches_naive() {
        for (w, h, seed) in [(1, 1, 9), (1, 6, 2), (6, 1, 5), (8, 5, 11), (13, 17, 42)] {
            let src = noise(w, h, seed);
            for radius in [1, 2, 3, 7, 20] {
                let naive = box_blur_naive(&src, radius).unwrap();
                let fast = box_blur(&src, radius).unwrap();
                assert_eq!(naive, fast, "{}x{} radius {}", w, h, radius);
            }
        }
    }

    #[test]
    fn test_blur_huge_radius_uniform() {
        let white = PixelBuffer::filled(1, 1, [255, 255, 255]);
        assert_eq!(box_blur(&white, 140_000_000).unwrap(), white);
        assert_eq!(box_blur_naive(&white, 140_000_000).unwrap(), white);

        let src = PixelBuffer::filled(3, 2, [255, 0, 77]);
        assert_eq!(box_blur(&src, i32::MAX).unwrap(), src);
        assert_eq!(box_blur_naive(&src, i32::MAX).unwrap(), src);
    }

    #[test]
    fn test_blur_huge_radius_weights_edges() {
        // 2x1 red [0, 90], r = 1e8. At x = 0 the window has r taps on 90,
        // at x = 1 it has r + 1; the mean straddles 45 from either side.
        let src = PixelBuffer::from_raw(2, 1, vec![0, 0, 0, 90, 0, 0]).unwrap();
        let radius = 100_000_000;
        let fast = box_blur(&src, radius).unwrap();
        assert_eq!(fast.pixel(0, 0)[0], 44);
        assert_eq!(fast.pixel(0, 1)[0], 45);
        assert_eq!(box_blur_naive(&src, radius).unwrap(), fast);
    }

    #[test]
    fn test_window_helpers() {
        assert_eq!(window_span(1, 2, 4), (0, 3));
        assert_eq!(overhang(1, 2, 4), (1, 0));
        assert_eq!(overhang(3, 2, 4), (0, 2));
        // every tap of a 5-wide window lands somewhere
        let over = overhang(0, 2, 2);
        let total: u64 = (0..2).map(|s| tap_count(s, 2, over)).sum();
        assert_eq!(total, 5);
        assert_eq!(window_area(i32::MAX as usize), (u32::MAX as u128).pow(2));
    }

    #[test]
    fn test_blur_zero_area() {
        let src = PixelBuffer::new(0, 4);
        assert_eq!(box_blur(&src, 3).unwrap().dimensions(), (0, 4));
    }

    #[test]
    fn test_blur_strategy_default() {
        assert_eq!(BlurStrategy::default(), BlurStrategy::Separable);
    }
}
