//! Format detection utilities.
//!
//! Detects image formats from file extensions and magic bytes.

use crate::IoResult;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// PNG format.
    Png,
    /// JPEG format.
    Jpeg,
    /// Unknown/unsupported format.
    Unknown,
}

impl Format {
    /// Detects format from file path (magic bytes first, then extension).
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();

        let format = Self::from_magic_bytes(path)?;
        if format != Format::Unknown {
            return Ok(format);
        }

        Ok(Self::from_extension(path))
    }

    /// Detects format from file extension only.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("png") => Format::Png,
            Some("jpg") | Some("jpeg") | Some("jpe") => Format::Jpeg,
            _ => Format::Unknown,
        }
    }

    /// Detects format from the first bytes of a file.
    pub fn from_magic_bytes<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let mut file = File::open(path)?;
        let mut header = [0u8; 8];
        let bytes_read = file.read(&mut header)?;
        Ok(Self::from_bytes(&header[..bytes_read]))
    }

    /// Detects format from raw bytes (magic number check).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        // PNG: 0x89 'P' 'N' 'G' CR LF SUB LF
        if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Format::Png;
        }

        // JPEG: SOI marker followed by another marker
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Format::Jpeg;
        }

        Format::Unknown
    }

    /// Lowercase format name.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Jpeg => "jpeg",
            Format::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Format::from_extension("a.PNG"), Format::Png);
        assert_eq!(Format::from_extension("dir/b.jpeg"), Format::Jpeg);
        assert_eq!(Format::from_extension("c.JPG"), Format::Jpeg);
        assert_eq!(Format::from_extension("d.exr"), Format::Unknown);
        assert_eq!(Format::from_extension("noext"), Format::Unknown);
    }

    #[test]
    fn test_from_bytes() {
        assert_eq!(
            Format::from_bytes(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0]),
            Format::Png
        );
        assert_eq!(Format::from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]), Format::Jpeg);
        assert_eq!(Format::from_bytes(&[0xFF, 0xD8]), Format::Unknown);
        assert_eq!(Format::from_bytes(b"GIF89a"), Format::Unknown);
    }

    #[test]
    fn test_detect_prefers_magic_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actually_jpeg.png");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xDB, 0, 0]).unwrap();
        assert_eq!(Format::detect(&path).unwrap(), Format::Jpeg);
    }

    #[test]
    fn test_detect_missing_file() {
        assert!(Format::detect("/nonexistent/rasterkit/x.png").is_err());
    }
}
