//! Geometric transformation operations.
//!
//! Axis-aligned, integer-pixel transforms only: quarter-turn rotation, flips
//! and mirrors.
//!
//! # Operations
//!
//! - [`rotate_90_cw`] - 90-degree clockwise rotation (swaps dimensions)
//! - [`rotate_quarter_turns`] - any number of clockwise quarter turns
//! - [`flip_horizontal`] - reverse row order (top <-> bottom)
//! - [`flip_vertical`] - reverse column order (left <-> right)
//! - [`mirror_top_to_bottom`] - reflect the top half over the bottom half
//! - [`mirror_left_to_right`] - reflect the left half over the right half
//!
//! Every public transform returns a new buffer and leaves its input alone.
//! The flips and mirrors run their pairwise algorithm on a private copy of
//! the source; the same algorithms are exported as `*_in_place` for callers
//! that own a buffer they no longer need.
//!
//! # Example
//!
//! ```rust
//! use rasterkit_core::PixelBuffer;
//! use rasterkit_ops::transform::{flip_horizontal, rotate_90_cw};
//!
//! let src = PixelBuffer::from_fn(4, 2, |row, col| [row as u8, col as u8, 0]);
//!
//! let rotated = rotate_90_cw(&src);
//! assert_eq!(rotated.dimensions(), (2, 4));
//!
//! let flipped = flip_horizontal(&src);
//! assert_eq!(flipped.pixel(0, 3), src.pixel(1, 3));
//! ```

use rasterkit_core::{PixelBuffer, CHANNELS};
use tracing::trace;

/// Axis selector for [`mirror`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MirrorAxis {
    /// Top half is reflected onto the bottom half.
    TopToBottom,
    /// Left half is reflected onto the right half.
    LeftToRight,
}

/// Rotates 90 degrees clockwise.
///
/// The result is `height x width`. Pixel `(row = i, col = j)` of `src` lands
/// at `(row = j, col = height - 1 - i)`.
///
/// # Example
///
/// ```rust
/// use rasterkit_core::PixelBuffer;
/// use rasterkit_ops::transform::rotate_90_cw;
///
/// // Top-left of a 3x2 source ends up top-right of the 2x3 result.
/// let mut src = PixelBuffer::new(3, 2);
/// src.set_pixel(0, 0, [255, 0, 0]);
/// let dst = rotate_90_cw(&src);
/// assert_eq!(dst.dimensions(), (2, 3));
/// assert_eq!(dst.pixel(0, 1), [255, 0, 0]);
/// ```
pub fn rotate_90_cw(src: &PixelBuffer) -> PixelBuffer {
    let (width, height) = src.dimensions();
    trace!(width, height, "rotate_90_cw");

    let mut dst = PixelBuffer::new(height, width);
    for i in 0..height {
        for j in 0..width {
            dst.set_pixel(j, height - 1 - i, src.pixel(i, j));
        }
    }
    dst
}

/// Rotates clockwise by `turns` quarter turns.
///
/// `turns` is taken modulo 4, so `-1` rotates by 270 degrees and `4`
/// returns an unrotated copy.
pub fn rotate_quarter_turns(src: &PixelBuffer, turns: i32) -> PixelBuffer {
    let turns = turns.rem_euclid(4);
    trace!(turns, "rotate_quarter_turns");

    let mut out = src.clone();
    for _ in 0..turns {
        out = rotate_90_cw(&out);
    }
    out
}

/// Reverses row order: `dst(i, j) = src(height - 1 - i, j)`.
pub fn flip_horizontal(src: &PixelBuffer) -> PixelBuffer {
    let mut dst = src.clone();
    flip_horizontal_in_place(&mut dst);
    dst
}

/// Swaps rows `i` and `height - 1 - i` for every `i < height / 2`.
///
/// The middle row of an odd height stays where it is.
pub fn flip_horizontal_in_place(buf: &mut PixelBuffer) {
    let (width, height) = buf.dimensions();
    trace!(width, height, "flip_horizontal");

    let stride = buf.stride();
    let data = buf.data_mut();
    for i in 0..(height as usize / 2) {
        let mirror = height as usize - 1 - i;
        let (top, bottom) = data.split_at_mut(mirror * stride);
        top[i * stride..(i + 1) * stride].swap_with_slice(&mut bottom[..stride]);
    }
}

/// Reverses column order: `dst(i, j) = src(i, width - 1 - j)`.
pub fn flip_vertical(src: &PixelBuffer) -> PixelBuffer {
    let mut dst = src.clone();
    flip_vertical_in_place(&mut dst);
    dst
}

/// Swaps columns `j` and `width - 1 - j` for every `j < width / 2`, row by
/// row.
pub fn flip_vertical_in_place(buf: &mut PixelBuffer) {
    let (width, height) = buf.dimensions();
    trace!(width, height, "flip_vertical");

    for row in 0..height {
        let line = buf.row_mut(row);
        for j in 0..(width as usize / 2) {
            let mirror = width as usize - 1 - j;
            for c in 0..CHANNELS {
                line.swap(j * CHANNELS + c, mirror * CHANNELS + c);
            }
        }
    }
}

/// Reflects the top half onto the bottom half.
///
/// Row `height - 1 - i` is overwritten with row `i` for every
/// `i < height / 2`; the original bottom half is discarded.
pub fn mirror_top_to_bottom(src: &PixelBuffer) -> PixelBuffer {
    let mut dst = src.clone();
    mirror_top_to_bottom_in_place(&mut dst);
    dst
}

/// In-place form of [`mirror_top_to_bottom`].
pub fn mirror_top_to_bottom_in_place(buf: &mut PixelBuffer) {
    let (width, height) = buf.dimensions();
    trace!(width, height, "mirror_top_to_bottom");

    let stride = buf.stride();
    let data = buf.data_mut();
    for i in 0..(height as usize / 2) {
        let mirror = height as usize - 1 - i;
        data.copy_within(i * stride..(i + 1) * stride, mirror * stride);
    }
}

/// Reflects the left half onto the right half.
///
/// Column `width - 1 - j` is overwritten with column `j` for every
/// `j < width / 2`; the original right half is discarded.
pub fn mirror_left_to_right(src: &PixelBuffer) -> PixelBuffer {
    let mut dst = src.clone();
    mirror_left_to_right_in_place(&mut dst);
    dst
}

/// In-place form of [`mirror_left_to_right`].
pub fn mirror_left_to_right_in_place(buf: &mut PixelBuffer) {
    let (width, height) = buf.dimensions();
    trace!(width, height, "mirror_left_to_right");

    for row in 0..height {
        let line = buf.row_mut(row);
        for j in 0..(width as usize / 2) {
            let mirror = width as usize - 1 - j;
            line.copy_within(j * CHANNELS..(j + 1) * CHANNELS, mirror * CHANNELS);
        }
    }
}

/// Mirrors along the given axis.
pub fn mirror(src: &PixelBuffer, axis: MirrorAxis) -> PixelBuffer {
    match axis {
        MirrorAxis::TopToBottom => mirror_top_to_bottom(src),
        MirrorAxis::LeftToRight => mirror_left_to_right(src),
    }
}
