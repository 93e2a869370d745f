//! # rasterkit-io
//!
//! Reads and writes [`PixelBuffer`]s as PNG or JPEG files.
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | PNG    | 8/16-bit, gray, palette, alpha (dropped) | 8-bit RGB | `png` |
//! | JPEG   | RGB, L8, L16, CMYK | RGB, quality 1-100 | `jpeg` |
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use rasterkit_io::{read, write_with, WriteOptions};
//!
//! let image = read("input.png")?;
//! write_with("output.jpg", &image, &WriteOptions { quality: 75 })?;
//! ```
//!
//! Input format is detected from magic bytes with the file extension as a
//! fallback; output format always comes from the extension.

#![warn(missing_docs)]

mod error;
pub mod detect;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png")]
pub mod png;

pub use detect::Format;
pub use error::{IoError, IoResult};

#[cfg(feature = "jpeg")]
pub use jpeg::{decode as decode_jpeg, encode as encode_jpeg};
#[cfg(feature = "png")]
pub use png::{decode as decode_png, encode as encode_png};

use rasterkit_core::PixelBuffer;
use std::path::Path;
use tracing::debug;

/// Options for [`write_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// JPEG quality, `1..=100`. Ignored for PNG.
    pub quality: u8,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { quality: 90 }
    }
}

/// Reads an image file, detecting its format.
///
/// # Errors
///
/// - [`IoError::Io`] if the file cannot be opened
/// - [`IoError::UnsupportedFormat`] if neither the header nor the extension
///   names a supported format
/// - [`IoError::Decode`] if the data is malformed
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    debug!(path = %path.display(), format = format.name(), "read");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path),
        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path),
        _ => Err(unsupported(path)),
    }
}

/// Decodes an in-memory image, detecting its format from magic bytes.
pub fn decode(bytes: &[u8]) -> IoResult<PixelBuffer> {
    match Format::from_bytes(bytes) {
        #[cfg(feature = "png")]
        Format::Png => png::decode(bytes),
        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::decode(bytes),
        other => Err(IoError::UnsupportedFormat(other.name().to_string())),
    }
}

/// Writes an image file with default options.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    write_with(path, image, &WriteOptions::default())
}

/// Writes an image file, choosing the encoder from the extension.
///
/// # Errors
///
/// - [`IoError::UnsupportedFormat`] for unknown extensions
/// - [`IoError::InvalidDimensions`] for images the encoder cannot hold
/// - [`IoError::Encode`] or [`IoError::Io`] on encoder or file failure
pub fn write_with<P: AsRef<Path>>(
    path: P,
    image: &PixelBuffer,
    options: &WriteOptions,
) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    debug!(path = %path.display(), format = format.name(), "write");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::write(path, image),
        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::write(path, image, options.quality),
        _ => Err(unsupported(path)),
    }
}

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PixelBuffer {
        PixelBuffer::from_fn(6, 4, |row, col| [row as u8 * 60, col as u8 * 40, 17])
    }

    #[test]
    fn test_write_read_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.png");
        write(&path, &sample()).unwrap();
        assert_eq!(read(&path).unwrap(), sample());
    }

    #[test]
    fn test_write_read_jpeg_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.jpg", "b.JPEG"] {
            let path = dir.path().join(name);
            write_with(&path, &sample(), &WriteOptions { quality: 50 }).unwrap();
            assert_eq!(read(&path).unwrap().dimensions(), (6, 4));
        }
    }

    #[test]
    fn test_read_detects_mislabelled_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("really_png.jpg");
        std::fs::write(&path, encode_png(&sample()).unwrap()).unwrap();
        assert_eq!(read(&path).unwrap(), sample());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bmp");
        assert!(matches!(write(&path, &sample()), Err(IoError::UnsupportedFormat(_))));

        std::fs::write(&path, b"BM....").unwrap();
        assert!(matches!(read(&path), Err(IoError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(read("/nonexistent/rasterkit.png"), Err(IoError::Io(_))));
    }

    #[test]
    fn test_decode_dispatch() {
        let bytes = encode_jpeg(&sample(), 90).unwrap();
        assert_eq!(decode(&bytes).unwrap().dimensions(), (6, 4));
        assert!(matches!(decode(b"????"), Err(IoError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_default_quality() {
        assert_eq!(WriteOptions::default().quality, jpeg::DEFAULT_QUALITY);
    }
}
