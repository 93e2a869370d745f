//! Hands a written image to the platform's default viewer.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Launches the default application for `path` without waiting for it.
pub fn open(path: &Path) -> Result<()> {
    let mut cmd = viewer_command(path);
    debug!(?cmd, "open viewer");
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to open viewer for: {}", path.display()))?;
    Ok(())
}

#[cfg(target_os = "windows")]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    // Empty title argument so a quoted path is not taken as the window title
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(target_os = "macos")]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}
