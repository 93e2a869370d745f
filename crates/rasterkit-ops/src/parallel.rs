//! Row-parallel box blur using Rayon.
//!
//! Both separable passes split their destination into disjoint rows with
//! `par_chunks_mut`; the source (and the intermediate row sums) are shared
//! read-only. Output is identical to [`crate::filter::box_blur`].
//!
//! # Example
//!
//! ```rust
//! use rasterkit_core::PixelBuffer;
//! use rasterkit_ops::parallel;
//!
//! let src = PixelBuffer::filled(256, 256, [10, 20, 30]);
//! let blurred = parallel::box_blur(&src, 5).unwrap();
//! assert_eq!(blurred, src);
//! ```

use crate::filter::{checked_radius, horizontal_sums_row, vertical_average_row};
use crate::OpsResult;
use rasterkit_core::{PixelBuffer, CHANNELS};
use rayon::prelude::*;
use tracing::trace;

/// Parallel separable box blur.
///
/// # Errors
///
/// [`OpsError::InvalidArgument`](crate::OpsError::InvalidArgument) when
/// `radius < 0`.
pub fn box_blur(src: &PixelBuffer, radius: i32) -> OpsResult<PixelBuffer> {
    let radius = checked_radius(radius)?;
    let (width, height) = src.dimensions();
    trace!(width, height, radius, threads = rayon::current_num_threads(), "parallel::box_blur");

    if radius == 0 || src.is_empty() {
        return Ok(src.clone());
    }

    let w = width as usize;
    let h = height as usize;
    let stride = w * CHANNELS;

    let mut sums = vec![0u64; src.data().len()];
    sums.par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, out)| horizontal_sums_row(src.row(y as u32), out, w, radius));

    let mut dst = vec![0u8; src.data().len()];
    dst.par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, out)| vertical_average_row(&sums, out, y, w, h, radius));

    Ok(PixelBuffer::from_raw(width, height, dst)?)
}
