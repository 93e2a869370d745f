//! Transform command - load, apply one operation, save.

use super::{load_image, save_image, view};
use crate::OutputArgs;
use anyhow::{Context, Result};
use rasterkit_ops::Operation;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Runs `op` on `input` and writes the result per `output`.
pub fn run(op: Operation, input: &Path, output: &OutputArgs, verbose: u8) -> Result<()> {
    if verbose > 0 {
        println!("Loading: {}", input.display());
    }
    let image = load_image(input)?;
    debug!(width = image.width(), height = image.height(), "loaded");

    let start = Instant::now();
    let result = op
        .apply(&image)
        .with_context(|| format!("Failed to apply {}", op))?;
    info!(op = %op, elapsed_ms = start.elapsed().as_millis() as u64, "applied");

    if verbose > 0 {
        println!("Operation: {}", op);
        if op.changes_dimensions() {
            println!("New size: {}x{}", result.width(), result.height());
        }
    }

    save_image(&output.output, &result, output.quality)?;
    info!(path = %output.output.display(), "saved");

    if verbose > 0 {
        println!("Saved: {}", output.output.display());
    }

    if output.open {
        view::open(&output.output)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterkit_core::PixelBuffer;
    use std::path::PathBuf;

    fn output_to(path: PathBuf) -> OutputArgs {
        OutputArgs { output: path, quality: 90, open: false }
    }

    #[test]
    fn test_run_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let src = PixelBuffer::from_fn(4, 2, |row, col| [row as u8 * 100, col as u8 * 60, 5]);
        rasterkit_io::write(&input, &src).unwrap();

        let out = dir.path().join("out.png");
        run(Operation::Rotate { quarter_turns: 1 }, &input, &output_to(out.clone()), 0).unwrap();

        let written = rasterkit_io::read(&out).unwrap();
        assert_eq!(written, Operation::Rotate { quarter_turns: 1 }.apply(&src).unwrap());
    }

    #[test]
    fn test_run_invalid_argument() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        rasterkit_io::write(&input, &PixelBuffer::new(2, 2)).unwrap();

        let out = dir.path().join("out.png");
        let err = run(Operation::Posterize { levels: 0 }, &input, &output_to(out.clone()), 0)
            .unwrap_err();
        assert!(err.to_string().contains("posterize"));
        assert!(!out.exists());
    }
}
