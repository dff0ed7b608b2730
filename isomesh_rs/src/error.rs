//! Error types for isomesh_rs operations.
//!
//! Provides specific error variants for field construction, grid access and
//! extraction failures.

use thiserror::Error;

/// Errors that can occur during isomesh_rs operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IsoError {
    /// A construction argument was rejected.
    #[error("invalid parameter `{name}`: {message}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        message: String,
    },

    /// Grid access outside the allocated extents.
    #[error("grid index ({x}, {y}, {z}) out of range for extents {extents:?}")]
    IndexOutOfRange {
        /// Requested X index.
        x: usize,
        /// Requested Y index.
        y: usize,
        /// Requested Z index.
        z: usize,
        /// Extents of the field.
        extents: [usize; 3],
    },

    /// A post-extraction invariant was violated.
    #[error("invalid extraction state: {message}")]
    InvalidState {
        /// Description of the violated invariant.
        message: String,
    },
}

impl IsoError {
    /// Shorthand for an [`IsoError::InvalidParameter`].
    pub(crate) fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        IsoError::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

/// Result type alias for isomesh_rs operations.
pub type Result<T> = core::result::Result<T, IsoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IsoError::invalid_parameter("resolution", "must be positive, got 0");
        assert_eq!(
            format!("{}", err),
            "invalid parameter `resolution`: must be positive, got 0"
        );

        let err = IsoError::IndexOutOfRange {
            x: 3,
            y: 0,
            z: 1,
            extents: [3, 3, 3],
        };
        assert_eq!(
            format!("{}", err),
            "grid index (3, 0, 1) out of range for extents [3, 3, 3]"
        );

        let err = IsoError::InvalidState {
            message: "vertex count 4 is not a multiple of 3".to_string(),
        };
        assert!(format!("{}", err).contains("vertex count 4"));
    }

    #[test]
    fn test_error_equality() {
        let a = IsoError::invalid_parameter("isovalue", "must be finite");
        let b = IsoError::invalid_parameter("isovalue", "must be finite");
        let c = IsoError::invalid_parameter("origin", "must be finite");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
