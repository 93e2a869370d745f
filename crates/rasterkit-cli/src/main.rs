//! rasterkit - apply one pixel transform to an image
//!
//! Decodes the input, runs a single operation and writes the result
//! (JPEG by default), optionally opening it in the system viewer.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rasterkit_ops::{MirrorAxis, Operation};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "rasterkit")]
#[command(author, version, about = "Simple raster image transforms")]
#[command(long_about = "
Applies one transform to an RGB image and writes the result.

Examples:
  rasterkit grayscale photo.png                  # writes output.jpeg
  rasterkit brightness photo.jpg --percent -25 -o dark.png
  rasterkit rotate photo.jpg --turns 3 --open
  rasterkit mirror photo.png --axis left-to-right
  rasterkit -j 4 blur photo.png --radius 8 -o soft.jpg --quality 80
  rasterkit info photo.png --pixels
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    #[command(flatten)]
    output: OutputArgs,
}

/// Where and how the transformed image is written.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output image; format taken from the extension
    #[arg(short, long, global = true, default_value = "output.jpeg")]
    pub output: PathBuf,

    /// JPEG quality (1-100)
    #[arg(long, global = true, default_value = "90",
          value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Open the result in the default image viewer
    #[arg(long, global = true)]
    pub open: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Reverse the order of rows (top becomes bottom)
    #[command(name = "flip-h")]
    FlipH(InputArgs),

    /// Reverse the order of columns (left becomes right)
    #[command(name = "flip-v")]
    FlipV(InputArgs),

    /// Convert to BT.601 grayscale
    #[command(visible_alias = "gray")]
    Grayscale(InputArgs),

    /// Scale every channel by a percentage
    Brightness(BrightnessArgs),

    /// Rotate clockwise in 90 degree steps
    Rotate(RotateArgs),

    /// Reflect one half of the image onto the other
    Mirror(MirrorArgs),

    /// Box blur with edge-replicated sampling
    Blur(BlurArgs),

    /// Invert every channel
    #[command(visible_alias = "invert")]
    Negative(InputArgs),

    /// Reduce each channel to a number of levels
    Posterize(PosterizeArgs),

    /// Show image dimensions, optionally dumping every pixel
    #[command(visible_alias = "i")]
    Info(InfoArgs),
}

/// Arguments shared by parameterless transforms.
#[derive(Args)]
struct InputArgs {
    /// Input image
    input: PathBuf,
}

#[derive(Args)]
struct BrightnessArgs {
    /// Input image
    input: PathBuf,

    /// Percent change; negative darkens
    #[arg(short, long, allow_hyphen_values = true)]
    percent: i32,
}

#[derive(Args)]
struct RotateArgs {
    /// Input image
    input: PathBuf,

    /// Clockwise quarter turns (negative turns counter-clockwise)
    #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
    turns: i32,
}

#[derive(Args)]
struct MirrorArgs {
    /// Input image
    input: PathBuf,

    /// Which half is kept and reflected
    #[arg(short, long, value_enum, default_value = "top-to-bottom")]
    axis: AxisArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum AxisArg {
    /// Top half reflected onto the bottom
    TopToBottom,
    /// Left half reflected onto the right
    LeftToRight,
}

impl From<AxisArg> for MirrorAxis {
    fn from(axis: AxisArg) -> Self {
        match axis {
            AxisArg::TopToBottom => MirrorAxis::TopToBottom,
            AxisArg::LeftToRight => MirrorAxis::LeftToRight,
        }
    }
}

#[derive(Args)]
struct BlurArgs {
    /// Input image
    input: PathBuf,

    /// Neighborhood radius in pixels
    #[arg(short, long, default_value = "1")]
    radius: i32,
}

#[derive(Args)]
struct PosterizeArgs {
    /// Input image
    input: PathBuf,

    /// Levels per channel (1-256)
    #[arg(short, long, default_value = "4")]
    levels: i32,
}

/// Arguments for the `info` command.
#[derive(Args)]
pub struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    pub input: Vec<PathBuf>,

    /// Print every pixel as a packed ARGB integer, one row per line
    #[arg(long)]
    pub pixels: bool,
}

impl Commands {
    /// The transform and input path, or `None` for non-transform commands.
    fn operation(&self) -> Option<(Operation, &PathBuf)> {
        let op = match self {
            Commands::FlipH(a) => (Operation::FlipHorizontal, &a.input),
            Commands::FlipV(a) => (Operation::FlipVertical, &a.input),
            Commands::Grayscale(a) => (Operation::Grayscale, &a.input),
            Commands::Brightness(a) => (Operation::Brightness { percent: a.percent }, &a.input),
            Commands::Rotate(a) => (Operation::Rotate { quarter_turns: a.turns }, &a.input),
            Commands::Mirror(a) => (Operation::Mirror { axis: a.axis.into() }, &a.input),
            Commands::Blur(a) => (Operation::Blur { radius: a.radius }, &a.input),
            Commands::Negative(a) => (Operation::Negative, &a.input),
            Commands::Posterize(a) => (Operation::Posterize { levels: a.levels }, &a.input),
            Commands::Info(_) => return None,
        };
        Some(op)
    }
}

/// Installs the fmt subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    if let Some((op, input)) = cli.command.operation() {
        return commands::transform::run(op, input, &cli.output, cli.verbose);
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("rasterkit").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["grayscale", "in.png"]);
        assert_eq!(cli.output.output, PathBuf::from("output.jpeg"));
        assert_eq!(cli.output.quality, 90);
        assert!(!cli.output.open);
        assert_eq!(cli.verbose, 0);
        let (op, input) = cli.command.operation().unwrap();
        assert_eq!(op, Operation::Grayscale);
        assert_eq!(input, &PathBuf::from("in.png"));
    }

    #[test]
    fn test_parameterized_operations() {
        let cli = parse(&["brightness", "a.jpg", "--percent", "-30", "-o", "b.png", "-vv"]);
        assert_eq!(cli.command.operation().unwrap().0, Operation::Brightness { percent: -30 });
        assert_eq!(cli.output.output, PathBuf::from("b.png"));
        assert_eq!(cli.verbose, 2);

        let cli = parse(&["rotate", "a.jpg", "--turns", "-1"]);
        assert_eq!(cli.command.operation().unwrap().0, Operation::Rotate { quarter_turns: -1 });

        let cli = parse(&["mirror", "a.jpg", "--axis", "left-to-right"]);
        assert_eq!(
            cli.command.operation().unwrap().0,
            Operation::Mirror { axis: MirrorAxis::LeftToRight }
        );

        let cli = parse(&["posterize", "a.jpg", "-l", "8"]);
        assert_eq!(cli.command.operation().unwrap().0, Operation::Posterize { levels: 8 });
    }

    #[test]
    fn test_quality_range() {
        let bad = Cli::try_parse_from(["rasterkit", "negative", "a.png", "--quality", "0"]);
        assert!(bad.is_err());
        let cli = parse(&["negative", "a.png", "--quality", "100"]);
        assert_eq!(cli.output.quality, 100);
    }

    #[test]
    fn test_info_is_not_a_transform() {
        let cli = parse(&["info", "a.png", "b.png", "--pixels"]);
        assert!(cli.command.operation().is_none());
    }
}
