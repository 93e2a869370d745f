//! PNG format support.
//!
//! Decoding accepts every PNG colour type. Palette and sub-byte images are
//! expanded by the decoder, 16-bit samples keep their high byte, alpha is
//! discarded and grayscale is replicated into all three channels.
//! Encoding always writes 8-bit RGB.
//!
//! # Example
//!
//! ```rust,ignore
//! use rasterkit_io::png;
//!
//! let image = png::read("input.png")?;
//! png::write("output.png", &image)?;
//! ```

use crate::{IoError, IoResult};
use rasterkit_core::{PixelBuffer, CHANNELS};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Seek, Write};
use std::path::Path;
use tracing::{debug, trace};

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let file = File::open(path.as_ref())?;
    decode_from(BufReader::new(file))
}

/// Decodes a PNG held in memory.
pub fn decode(bytes: &[u8]) -> IoResult<PixelBuffer> {
    decode_from(Cursor::new(bytes))
}

fn decode_from<R: BufRead + Seek>(reader: R) -> IoResult<PixelBuffer> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::Decode(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::Decode("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::Decode(e.to_string()))?;

    let (width, height) = (info.width, info.height);
    if width == 0 || height == 0 {
        return Err(IoError::InvalidDimensions {
            width,
            height,
            reason: "PNG has no pixels".into(),
        });
    }
    debug!(width, height, color = ?info.color_type, depth = ?info.bit_depth, "png decode");

    let samples = &buf[..info.buffer_size()];
    let rgb = match (info.color_type, info.bit_depth) {
        (png::ColorType::Rgb, png::BitDepth::Eight) => samples.to_vec(),
        (png::ColorType::Rgba, png::BitDepth::Eight) => drop_alpha(samples, 4, 1),
        (png::ColorType::Rgb, png::BitDepth::Sixteen) => high_bytes(samples),
        (png::ColorType::Rgba, png::BitDepth::Sixteen) => drop_alpha(samples, 4, 2),
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            samples.iter().flat_map(|&g| [g, g, g]).collect()
        }
        (png::ColorType::Grayscale, png::BitDepth::Sixteen) => {
            samples.chunks_exact(2).flat_map(|g| [g[0], g[0], g[0]]).collect()
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => {
            samples.chunks_exact(2).flat_map(|ga| [ga[0], ga[0], ga[0]]).collect()
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Sixteen) => {
            samples.chunks_exact(4).flat_map(|ga| [ga[0], ga[0], ga[0]]).collect()
        }
        (color_type, bit_depth) => {
            return Err(IoError::Decode(format!(
                "unsupported PNG layout: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    Ok(PixelBuffer::from_raw(width, height, rgb)?)
}

/// Writes a buffer to a PNG file.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    encode_to(BufWriter::new(file), image)
}

/// Encodes a buffer as an 8-bit RGB PNG in memory.
pub fn encode(image: &PixelBuffer) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    encode_to(&mut out, image)?;
    Ok(out)
}

fn encode_to<W: Write>(writer: W, image: &PixelBuffer) -> IoResult<()> {
    let (width, height) = image.dimensions();
    if image.is_empty() {
        return Err(IoError::InvalidDimensions {
            width,
            height,
            reason: "cannot encode an empty image".into(),
        });
    }
    trace!(width, height, "png encode");

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::Encode(e.to_string()))?;
    png_writer
        .write_image_data(image.data())
        .map_err(|e| IoError::Encode(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::Encode(e.to_string()))?;

    Ok(())
}

/// Keeps the first three samples of each pixel, taking the high byte of
/// `bytes_per_sample`-wide big-endian samples.
fn drop_alpha(samples: &[u8], channels: usize, bytes_per_sample: usize) -> Vec<u8> {
    samples
        .chunks_exact(channels * bytes_per_sample)
        .flat_map(|px| (0..CHANNELS).map(move |c| px[c * bytes_per_sample]))
        .collect()
}

/// High byte of each big-endian 16-bit sample.
fn high_bytes(samples: &[u8]) -> Vec<u8> {
    samples.chunks_exact(2).map(|s| s[0]).collect()
}
