//! # rasterkit-core
//!
//! Core types for the rasterkit image transform library.
//!
//! - [`PixelBuffer`] - row-major RGB8 raster with checked and unchecked
//!   pixel access
//! - [`Error`], [`Result`] - bounds, argument and dimension errors
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. The other crates build on it:
//!
//! ```text
//! rasterkit-core (this crate)
//!    ^
//!    |
//!    +-- rasterkit-ops (transforms)
//!    +-- rasterkit-io  (PNG/JPEG decode and encode)
//!    +-- rasterkit-cli (command line front end)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;

pub use buffer::{PixelBuffer, Rgb, CHANNELS};
pub use error::{Error, Result};
