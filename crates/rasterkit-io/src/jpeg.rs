//! JPEG format support via `jpeg-decoder` and `jpeg-encoder`.
//!
//! Decodes RGB, 8/16-bit grayscale and CMYK sources into RGB; encodes
//! baseline RGB at a configurable quality.

use crate::{IoError, IoResult};
use rasterkit_core::PixelBuffer;
use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, trace};

/// Default encoder quality.
pub const DEFAULT_QUALITY: u8 = 90;

/// Reads a JPEG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let file = fs::File::open(path.as_ref())?;
    decode_from(BufReader::new(file))
}

/// Decodes a JPEG held in memory.
pub fn decode(bytes: &[u8]) -> IoResult<PixelBuffer> {
    decode_from(bytes)
}

fn decode_from<R: Read>(reader: R) -> IoResult<PixelBuffer> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::Decode(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::Decode("missing JPEG info".into()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    if width == 0 || height == 0 {
        return Err(IoError::InvalidDimensions {
            width,
            height,
            reason: "JPEG has no pixels".into(),
        });
    }
    debug!(width, height, format = ?info.pixel_format, "jpeg decode");

    let rgb = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => pixels,
        jpeg_decoder::PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g]).collect(),
        // Big-endian samples; keep the high byte
        jpeg_decoder::PixelFormat::L16 => {
            pixels.chunks_exact(2).flat_map(|l| [l[0], l[0], l[0]]).collect()
        }
        jpeg_decoder::PixelFormat::CMYK32 => pixels.chunks_exact(4).flat_map(cmyk_to_rgb).collect(),
    };

    Ok(PixelBuffer::from_raw(width, height, rgb)?)
}

/// Approximate CMYK to RGB, `channel = (255 - ink) * (255 - k) / 255`.
fn cmyk_to_rgb(cmyk: &[u8]) -> [u8; 3] {
    let k = 255 - cmyk[3] as u32;
    let ch = |ink: u8| ((255 - ink as u32) * k / 255) as u8;
    [ch(cmyk[0]), ch(cmyk[1]), ch(cmyk[2])]
}

/// Writes a buffer to a JPEG file.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer, quality: u8) -> IoResult<()> {
    let bytes = encode(image, quality)?;
    fs::write(path.as_ref(), bytes)?;
    Ok(())
}

/// Encodes a buffer as an RGB JPEG in memory.
///
/// `quality` is clamped to `1..=100`.
pub fn encode(image: &PixelBuffer, quality: u8) -> IoResult<Vec<u8>> {
    use jpeg_encoder::{ColorType, Encoder};

    let (width, height) = image.dimensions();
    if image.is_empty() || width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(IoError::InvalidDimensions {
            width,
            height,
            reason: format!("JPEG needs 1..={} pixels per side", u16::MAX),
        });
    }
    let quality = quality.clamp(1, 100);
    trace!(width, height, quality, "jpeg encode");

    let mut buffer = Vec::new();
    let encoder = Encoder::new(&mut buffer, quality);
    encoder
        .encode(image.data(), width as u16, height as u16, ColorType::Rgb)
        .map_err(|e: jpeg_encoder::EncodingError| IoError::Encode(e.to_string()))?;

    Ok(buffer)
}
