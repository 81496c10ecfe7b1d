//! Error handling for HAGhost5
//!
//! Provides error types for the layers of the preview pipeline:
//! - G-Code errors (tokenizing/interpretation under strict parsing)
//! - JSON errors (parse options, geometry export)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// G-Code error type
///
/// Represents errors raised while interpreting a G-code document.
/// The default lenient parse never produces these; they surface only
/// when strict parsing is enabled.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GcodeError {
    /// Invalid parameter value
    #[error("Invalid parameter '{param}' at line {line_number}: {reason}")]
    InvalidParameter {
        /// The 1-based line number where the invalid parameter was found.
        line_number: u32,
        /// The parameter token as written.
        param: String,
        /// The reason the parameter is invalid.
        reason: String,
    },

    /// Invalid G-Code syntax
    #[error("Invalid syntax at line {line_number}: {reason}")]
    InvalidSyntax {
        /// The 1-based line number where the syntax error occurred.
        line_number: u32,
        /// The reason for the syntax error.
        reason: String,
    },
}

/// Main error type for HAGhost5
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// G-Code error
    #[error(transparent)]
    Gcode(#[from] GcodeError),

    /// JSON encoding or decoding failed (parse options, geometry export)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check if this is a G-Code error
    pub fn is_gcode_error(&self) -> bool {
        matches!(self, Error::Gcode(_))
    }

    /// Check if this is a JSON error
    pub fn is_json_error(&self) -> bool {
        matches!(self, Error::Json(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
