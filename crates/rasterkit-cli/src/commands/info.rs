//! Image info command.
//!
//! Prints dimensions and format; `--pixels` additionally dumps every pixel
//! as a packed `0xAARRGGBB` value (alpha always opaque) read as a signed
//! 32-bit integer, one image row per line.

use crate::InfoArgs;
use anyhow::{Context, Result};
use rasterkit_core::{PixelBuffer, Rgb};
use rasterkit_io::Format;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Runs the info command for each input.
pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for (i, path) in args.input.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        let file_size = fs::metadata(path)
            .with_context(|| format!("Failed to stat: {}", path.display()))?
            .len();
        let format = Format::detect(path).unwrap_or(Format::Unknown);
        let image = super::load_image(path)?;
        debug!(path = %path.display(), format = format.name(), "info");

        print_summary(&mut out, path, &image, file_size, format, verbose)?;
        if args.pixels {
            dump_pixels(&mut out, &image)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn print_summary<W: Write>(
    out: &mut W,
    path: &Path,
    image: &PixelBuffer,
    file_size: u64,
    format: Format,
    verbose: u8,
) -> io::Result<()> {
    writeln!(out, "{}", path.display())?;
    writeln!(out, "  Resolution: {}x{}", image.width(), image.height())?;
    writeln!(out, "  Format:     {}", format.name())?;
    writeln!(out, "  Pixels:     {}", image.pixel_count())?;
    writeln!(out, "  File size:  {}", super::format_size(file_size))?;
    if verbose > 0 {
        writeln!(out, "  Grayscale:  {}", image.is_grayscale())?;
    }
    Ok(())
}

/// Writes one line per row of space-separated packed pixels.
fn dump_pixels<W: Write>(out: &mut W, image: &PixelBuffer) -> io::Result<()> {
    for row in 0..image.height() {
        for col in 0..image.width() {
            if col > 0 {
                out.write_all(b" ")?;
            }
            write!(out, "{}", packed_argb(image.pixel(row, col)))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Opaque `0xAARRGGBB` as a signed integer.
fn packed_argb([r, g, b]: Rgb) -> i32 {
    (0xFF00_0000u32 | (r as u32) << 16 | (g as u32) << 8 | b as u32) as i32
}
