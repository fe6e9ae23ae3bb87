//! Error types for lanewise operations.
//!
//! Only the checked, slice-facing entry points return errors. Lane-level
//! operations on vectors have no failure channel: integer division by zero
//! panics, and out-of-range lane indices panic.

use std::fmt;

/// Errors that can occur during lanewise operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanewiseError {
    /// A slice did not hold the number of lanes the vector needs.
    LaneCountMismatch {
        /// Lanes required by the operation.
        expected: usize,
        /// Elements actually supplied.
        actual: usize,
    },
    /// A pointer did not satisfy the alignment of an aligned access.
    Misaligned {
        /// Address of the first element.
        address: usize,
        /// Required alignment in bytes.
        alignment: usize,
    },
    /// Input validation error.
    ValidationError {
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for LanewiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanewiseError::LaneCountMismatch { expected, actual } => write!(
                f,
                "Lane count mismatch: expected {} elements, got {}",
                expected, actual
            ),
            LanewiseError::Misaligned { address, alignment } => write!(
                f,
                "Misaligned access: address {:#x} is not {} byte aligned",
                address, alignment
            ),
            LanewiseError::ValidationError { message } => {
                write!(f, "Validation error: {}", message)
            }
        }
    }
}

impl std::error::Error for LanewiseError {}

/// Result type alias for lanewise operations.
pub type Result<T> = std::result::Result<T, LanewiseError>;

/// Creates a lane count error.
pub fn lane_count_error(expected: usize, actual: usize) -> LanewiseError {
    LanewiseError::LaneCountMismatch { expected, actual }
}

/// Creates a misalignment error for `ptr`.
pub fn misaligned_error<T>(ptr: *const T, alignment: usize) -> LanewiseError {
    LanewiseError::Misaligned {
        address: ptr as usize,
        alignment,
    }
}

/// Creates a validation error.
pub fn validation_error(message: impl Into<String>) -> LanewiseError {
    LanewiseError::ValidationError {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_count_error_display() {
        let error = lane_count_error(8, 5);
        let display = format!("{}", error);
        assert!(display.contains("Lane count mismatch"));
        assert!(display.contains("expected 8"));
        assert!(display.contains("got 5"));
    }

    #[test]
    fn test_misaligned_error_display() {
        let error = misaligned_error(0x1004 as *const f32, 32);
        let display = format!("{}", error);
        assert!(display.contains("Misaligned access"));
        assert!(display.contains("0x1004"));
        assert!(display.contains("32 byte aligned"));
    }

    #[test]
    fn test_validation_error_display() {
        let error = validation_error("input slices must have same length");
        let display = format!("{}", error);
        assert!(display.contains("Validation error"));
        assert!(display.contains("input slices must have same length"));
    }

    #[test]
    fn test_error_equality() {
        let error1 = lane_count_error(4, 3);
        let error2 = lane_count_error(4, 3);
        let error3 = lane_count_error(4, 2);

        assert_eq!(error1, error2);
        assert_ne!(error1, error3);
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = validation_error("test error");

        let _: &dyn std::error::Error = &error;

        assert!(std::error::Error::source(&error).is_none());
    }
}
