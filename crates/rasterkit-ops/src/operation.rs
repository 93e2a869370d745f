//! One enum naming every transform together with its parameters.
//!
//! Front ends gather parameters however they like (command line, config,
//! UI) and build an [`Operation`]; [`Operation::apply`] is the only place
//! that maps an operation to its transform.
//!
//! # Example
//!
//! ```rust
//! use rasterkit_core::PixelBuffer;
//! use rasterkit_ops::Operation;
//!
//! let src = PixelBuffer::filled(4, 2, [100, 100, 100]);
//! let out = Operation::Brightness { percent: 50 }.apply(&src).unwrap();
//! assert_eq!(out.pixel(0, 0), [150, 150, 150]);
//!
//! let out = Operation::Rotate { quarter_turns: 1 }.apply(&src).unwrap();
//! assert_eq!(out.dimensions(), (2, 4));
//! ```

use crate::transform::MirrorAxis;
use crate::{color, transform, OpsResult};
use rasterkit_core::PixelBuffer;
use std::fmt;
use tracing::debug;

/// A transform plus its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Reverse row order.
    FlipHorizontal,
    /// Reverse column order.
    FlipVertical,
    /// BT.601 grayscale.
    Grayscale,
    /// Scale channels by a percentage.
    Brightness {
        /// Percent change; negative darkens
        percent: i32,
    },
    /// Clockwise quarter turns (taken modulo 4).
    Rotate {
        /// Number of 90-degree clockwise turns
        quarter_turns: i32,
    },
    /// Reflect one half over the other.
    Mirror {
        /// Which half is kept
        axis: MirrorAxis,
    },
    /// Box blur.
    Blur {
        /// Neighborhood radius in pixels
        radius: i32,
    },
    /// Invert channels.
    Negative,
    /// Quantize channels.
    Posterize {
        /// Number of levels per channel, `1..=256`
        levels: i32,
    },
}

impl Operation {
    /// Short kebab-case name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FlipHorizontal => "flip-h",
            Self::FlipVertical => "flip-v",
            Self::Grayscale => "grayscale",
            Self::Brightness { .. } => "brightness",
            Self::Rotate { .. } => "rotate",
            Self::Mirror { .. } => "mirror",
            Self::Blur { .. } => "blur",
            Self::Negative => "negative",
            Self::Posterize { .. } => "posterize",
        }
    }

    /// Returns `true` if the output can differ in size from the input.
    pub fn changes_dimensions(&self) -> bool {
        matches!(self, Self::Rotate { quarter_turns } if quarter_turns.rem_euclid(2) == 1)
    }

    /// Runs the transform and returns a new buffer.
    ///
    /// # Errors
    ///
    /// Propagates argument errors from [`color::posterize`] and
    /// [`crate::filter::box_blur`].
    pub fn apply(&self, src: &PixelBuffer) -> OpsResult<PixelBuffer> {
        debug!(op = %self, width = src.width(), height = src.height(), "apply");
        let out = match *self {
            Self::FlipHorizontal => transform::flip_horizontal(src),
            Self::FlipVertical => transform::flip_vertical(src),
            Self::Grayscale => color::grayscale(src),
            Self::Brightness { percent } => color::brightness(src, percent),
            Self::Rotate { quarter_turns } => transform::rotate_quarter_turns(src, quarter_turns),
            Self::Mirror { axis } => transform::mirror(src, axis),
            Self::Blur { radius } => blur(src, radius)?,
            Self::Negative => color::negative(src),
            Self::Posterize { levels } => color::posterize(src, levels)?,
        };
        Ok(out)
    }
}

#[cfg(feature = "parallel")]
fn blur(src: &PixelBuffer, radius: i32) -> OpsResult<PixelBuffer> {
    crate::parallel::box_blur(src, radius)
}

#[cfg(not(feature = "parallel"))]
fn blur(src: &PixelBuffer, radius: i32) -> OpsResult<PixelBuffer> {
    crate::filter::box_blur(src, radius)
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brightness { percent } => write!(f, "brightness({:+}%)", percent),
            Self::Rotate { quarter_turns } => {
                write!(f, "rotate({} deg cw)", quarter_turns.rem_euclid(4) * 90)
            }
            Self::Mirror { axis } => write!(f, "mirror({:?})", axis),
            Self::Blur { radius } => write!(f, "blur(r={})", radius),
            Self::Posterize { levels } => write!(f, "posterize({} levels)", levels),
            other => f.write_str(other.name()),
        }
    }
}
