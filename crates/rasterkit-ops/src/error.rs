//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OpsError {
    /// Parameter value outside its legal range.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Parameter name
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Error raised by the pixel buffer itself.
    #[error(transparent)]
    Core(#[from] rasterkit_core::Error),
}

impl OpsError {
    /// Creates an [`OpsError::InvalidArgument`] error.
    #[inline]
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Returns `true` for argument errors.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_are_not_argument_errors() {
        let err = OpsError::from(rasterkit_core::Error::out_of_bounds(9, 0, 4, 4));
        assert!(!err.is_invalid_argument());
        assert!(err.to_string().contains("4x4"));
        assert!(OpsError::invalid_argument("radius", "must be >= 0").is_invalid_argument());
    }
}
