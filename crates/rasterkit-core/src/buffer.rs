//! The RGB8 raster buffer every transform reads and writes.
//!
//! # Memory Layout
//!
//! Pixels are stored in **row-major** order, top-to-bottom, with the three
//! channels interleaved:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- row 0
//!         [R G B R G B R G B ...]  <- row 1
//!         ...
//! ```
//!
//! # Addressing
//!
//! Pixels are addressed as `(row, col)`: `row` counts down from the top edge
//! (`0..height`), `col` counts right from the left edge (`0..width`).
//!
//! # Usage
//!
//! ```rust
//! use rasterkit_core::PixelBuffer;
//!
//! let mut buf = PixelBuffer::new(4, 3);
//! buf.set(2, 1, [255, 128, 0]).unwrap();
//! assert_eq!(buf.get(2, 1).unwrap(), [255, 128, 0]);
//! assert!(buf.get(3, 0).is_err());
//! ```

use crate::{Error, Result};
use std::sync::Arc;

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 3;

/// One pixel: `[red, green, blue]`.
pub type Rgb = [u8; CHANNELS];

/// Owned RGB8 raster buffer.
///
/// Channel values live in `u8`, so the `[0, 255]` range invariant holds by
/// construction. Grayscale images are stored in the same layout with equal
/// R, G and B.
///
/// # Memory Management
///
/// The pixel store sits in an [`Arc<Vec<u8>>`]:
/// - `clone()` shares the data instead of copying it
/// - the first mutation of a shared buffer copies it (copy-on-write)
///
/// A transform can therefore start from `src.clone()` and mutate the copy
/// without ever touching the caller's pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Interleaved RGB bytes
    data: Arc<Vec<u8>>,
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
}

impl PixelBuffer {
    /// Creates a black buffer.
    ///
    /// Zero-area buffers are allowed; every transform maps them to an
    /// equally empty output.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rasterkit_core::PixelBuffer;
    ///
    /// let buf = PixelBuffer::new(640, 480);
    /// assert_eq!(buf.dimensions(), (640, 480));
    /// assert_eq!(buf.pixel(0, 0), [0, 0, 0]);
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0; CHANNELS])
    }

    /// Creates a buffer where every pixel has the same color.
    pub fn filled(width: u32, height: u32, pixel: Rgb) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            data.extend_from_slice(&pixel);
        }
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Creates a buffer from existing interleaved RGB bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` is not
    /// `width * height * 3`, or if that product overflows.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rasterkit_core::PixelBuffer;
    ///
    /// let buf = PixelBuffer::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(buf.pixel(0, 1), [4, 5, 6]);
    /// assert!(PixelBuffer::from_raw(2, 2, vec![0; 3]).is_err());
    /// ```
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "byte count overflows"))?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
        })
    }

    /// Creates a buffer by evaluating `f(row, col)` for every pixel.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rasterkit_core::PixelBuffer;
    ///
    /// let ramp = PixelBuffer::from_fn(3, 2, |row, col| [col as u8, row as u8, 0]);
    /// assert_eq!(ramp.pixel(1, 2), [2, 1, 0]);
    /// ```
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> Rgb,
    {
        let mut data = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for row in 0..height {
            for col in 0..width {
                data.extend_from_slice(&f(row, col));
            }
        }
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Returns the width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the buffer has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the interleaved pixel bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the interleaved pixel bytes for mutation.
    ///
    /// Copies the data first if it is shared with another buffer.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Consumes the buffer and returns its bytes.
    pub fn into_raw(self) -> Vec<u8> {
        Arc::try_unwrap(self.data).unwrap_or_else(|shared| (*shared).clone())
    }

    #[inline]
    fn offset(&self, row: u32, col: u32) -> usize {
        (row as usize * self.width as usize + col as usize) * CHANNELS
    }

    #[inline]
    fn in_bounds(&self, row: u32, col: u32) -> bool {
        row < self.height && col < self.width
    }

    /// Returns the pixel at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] outside `[0, height) x [0, width)`.
    pub fn get(&self, row: u32, col: u32) -> Result<Rgb> {
        if !self.in_bounds(row, col) {
            return Err(Error::out_of_bounds(row, col, self.width, self.height));
        }
        Ok(self.pixel(row, col))
    }

    /// Stores a pixel at `(row, col)`.
    ///
    /// Values are stored as given; callers clamp wider intermediates before
    /// narrowing to `u8`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] outside `[0, height) x [0, width)`.
    pub fn set(&mut self, row: u32, col: u32, pixel: Rgb) -> Result<()> {
        if !self.in_bounds(row, col) {
            return Err(Error::out_of_bounds(row, col, self.width, self.height));
        }
        self.set_pixel(row, col, pixel);
        Ok(())
    }

    /// Returns the pixel at `(row, col)` without a bounds check in release
    /// builds.
    ///
    /// # Panics
    ///
    /// Panics if the computed offset falls outside the data.
    #[inline]
    pub fn pixel(&self, row: u32, col: u32) -> Rgb {
        debug_assert!(self.in_bounds(row, col), "pixel out of bounds");
        let offset = self.offset(row, col);
        [
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        ]
    }

    /// Stores a pixel at `(row, col)` without a bounds check in release
    /// builds.
    #[inline]
    pub fn set_pixel(&mut self, row: u32, col: u32, pixel: Rgb) {
        debug_assert!(self.in_bounds(row, col), "pixel out of bounds");
        let offset = self.offset(row, col);
        self.data_mut()[offset..offset + CHANNELS].copy_from_slice(&pixel);
    }

    /// Fills the whole buffer with one color.
    pub fn fill(&mut self, pixel: Rgb) {
        for chunk in self.data_mut().chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&pixel);
        }
    }

    /// Returns one row as interleaved bytes.
    ///
    /// # Panics
    ///
    /// Panics if `row >= height`.
    #[inline]
    pub fn row(&self, row: u32) -> &[u8] {
        assert!(row < self.height, "row out of bounds");
        let stride = self.stride();
        let start = row as usize * stride;
        &self.data[start..start + stride]
    }

    /// Returns one row as mutable interleaved bytes.
    ///
    /// # Panics
    ///
    /// Panics if `row >= height`.
    #[inline]
    pub fn row_mut(&mut self, row: u32) -> &mut [u8] {
        assert!(row < self.height, "row out of bounds");
        let stride = self.stride();
        let start = row as usize * stride;
        &mut self.data_mut()[start..start + stride]
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Iterates over all pixels as `(row, col, rgb)`, row-major.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rasterkit_core::PixelBuffer;
    ///
    /// let buf = PixelBuffer::filled(2, 2, [9, 9, 9]);
    /// assert!(buf.pixels().all(|(_, _, px)| px == [9, 9, 9]));
    /// ```
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Rgb)> + '_ {
        (0..self.height)
            .flat_map(move |row| (0..self.width).map(move |col| (row, col, self.pixel(row, col))))
    }

    /// Applies `f` to every pixel in place.
    pub fn map_pixels<F>(&mut self, f: F)
    where
        F: Fn(Rgb) -> Rgb,
    {
        for chunk in self.data_mut().chunks_exact_mut(CHANNELS) {
            let out = f([chunk[0], chunk[1], chunk[2]]);
            chunk.copy_from_slice(&out);
        }
    }

    /// Returns `true` if every pixel has R = G = B.
    pub fn is_grayscale(&self) -> bool {
        self.data
            .chunks_exact(CHANNELS)
            .all(|px| px[0] == px[1] && px[1] == px[2])
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &CHANNELS)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_new() {
        let buf = PixelBuffer::new(10, 4);
        assert_eq!(buf.width(), 10);
        assert_eq!(buf.height(), 4);
        assert_eq!(buf.pixel_count(), 40);
        assert_eq!(buf.data().len(), 120);
        assert!(buf.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_buffer_zero_area() {
        let buf = PixelBuffer::new(0, 5);
        assert!(buf.is_empty());
        assert_eq!(buf.data().len(), 0);
        assert_eq!(buf.pixels().count(), 0);
        assert!(buf.get(0, 0).is_err());
    }

    #[test]
    fn test_buffer_get_set() {
        let mut buf = PixelBuffer::new(3, 2);
        buf.set(1, 2, [10, 20, 30]).unwrap();
        assert_eq!(buf.get(1, 2).unwrap(), [10, 20, 30]);
        assert_eq!(buf.get(0, 0).unwrap(), [0, 0, 0]);
        // Row-major offset: (1 * 3 + 2) * 3
        assert_eq!(&buf.data()[15..18], &[10, 20, 30]);
    }

    #[test]
    fn test_buffer_out_of_bounds() {
        let mut buf = PixelBuffer::new(3, 2);
        let err = buf.get(2, 0).unwrap_err();
        assert_eq!(err, Error::out_of_bounds(2, 0, 3, 2));
        assert!(buf.get(0, 3).unwrap_err().is_bounds_error());
        assert!(buf.set(0, 3, [1, 1, 1]).unwrap_err().is_bounds_error());
        assert!(buf.set(5, 5, [1, 1, 1]).is_err());
    }

    #[test]
    fn test_buffer_from_raw() {
        let buf = PixelBuffer::from_raw(1, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(buf.pixel(0, 0), [1, 2, 3]);
        assert_eq!(buf.pixel(1, 0), [4, 5, 6]);
    }

    #[test]
    fn test_buffer_from_raw_wrong_size() {
        let err = PixelBuffer::from_raw(2, 2, vec![0; 11]).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { .. }));
    }

    #[test]
    fn test_buffer_from_fn() {
        let buf = PixelBuffer::from_fn(4, 3, |row, col| [row as u8, col as u8, 7]);
        for (row, col, px) in buf.pixels() {
            assert_eq!(px, [row as u8, col as u8, 7]);
        }
    }

    #[test]
    fn test_buffer_rows() {
        let mut buf = PixelBuffer::filled(2, 3, [1, 2, 3]);
        buf.row_mut(1).copy_from_slice(&[9, 9, 9, 8, 8, 8]);
        assert_eq!(buf.row(0), &[1, 2, 3, 1, 2, 3]);
        assert_eq!(buf.row(1), &[9, 9, 9, 8, 8, 8]);
        assert_eq!(buf.stride(), 6);
    }

    #[test]
    fn test_buffer_map_pixels() {
        let mut buf = PixelBuffer::filled(2, 2, [10, 20, 30]);
        buf.map_pixels(|[r, g, b]| [b, g, r]);
        assert_eq!(buf.pixel(1, 1), [30, 20, 10]);
    }

    #[test]
    fn test_buffer_clone_cow() {
        let a = PixelBuffer::filled(2, 2, [1, 1, 1]);
        let mut b = a.clone();
        b.set_pixel(0, 0, [2, 2, 2]);
        assert_eq!(a.pixel(0, 0), [1, 1, 1]);
        assert_eq!(b.pixel(0, 0), [2, 2, 2]);
    }

    #[test]
    fn test_buffer_is_grayscale() {
        let mut buf = PixelBuffer::filled(2, 2, [5, 5, 5]);
        assert!(buf.is_grayscale());
        buf.set_pixel(1, 0, [5, 6, 5]);
        assert!(!buf.is_grayscale());
    }

    #[test]
    fn test_buffer_into_raw_shared() {
        let a = PixelBuffer::filled(1, 1, [3, 4, 5]);
        let b = a.clone();
        assert_eq!(b.into_raw(), vec![3, 4, 5]);
        assert_eq!(a.into_raw(), vec![3, 4, 5]);
    }
}
