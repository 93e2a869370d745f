//! # rasterkit-ops
//!
//! Pixel-addressing transforms over [`rasterkit_core::PixelBuffer`].
//!
//! # Modules
//!
//! - [`color_math`] - clamp, percent scaling, inversion, quantization, luma
//! - [`transform`] - quarter-turn rotation, flips, mirrors
//! - [`color`] - grayscale, brightness, negative, posterize
//! - [`filter`] - box blur with edge-replicated sampling
//! - [`operation`] - [`Operation`] enum dispatching to all of the above
//! - `parallel` - row-parallel box blur (feature `parallel`, on by default)
//!
//! Every transform is a pure function: it borrows its input and returns a
//! freshly owned buffer.
//!
//! # Common Operations
//!
//! ## Rotate / Flip
//!
//! ```rust
//! use rasterkit_core::PixelBuffer;
//! use rasterkit_ops::transform::{flip_vertical, rotate_quarter_turns};
//!
//! let img = PixelBuffer::new(640, 480);
//! let upright = rotate_quarter_turns(&img, 3);
//! assert_eq!(upright.dimensions(), (480, 640));
//! let mirrored = flip_vertical(&img);
//! ```
//!
//! ## Blur
//!
//! ```rust
//! use rasterkit_core::PixelBuffer;
//! use rasterkit_ops::filter::box_blur;
//!
//! let img = PixelBuffer::filled(32, 32, [10, 10, 10]);
//! let soft = box_blur(&img, 3)?;
//! # Ok::<(), rasterkit_ops::OpsError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod color;
pub mod color_math;
pub mod filter;
pub mod operation;
pub mod transform;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use error::{OpsError, OpsResult};
pub use filter::BlurStrategy;
pub use operation::Operation;
pub use transform::MirrorAxis;
