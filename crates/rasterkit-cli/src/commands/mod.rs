//! CLI command implementations

pub mod info;
pub mod transform;
pub mod view;

use anyhow::{Context, Result};
use rasterkit_core::PixelBuffer;
use rasterkit_io::WriteOptions;
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    rasterkit_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &PixelBuffer, quality: u8) -> Result<()> {
    rasterkit_io::write_with(path, image, &WriteOptions { quality })
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
