//! Command code decoding
//!
//! Only the motion subset needed for preview geometry is recognized; every
//! other code decodes to [`Command::Other`] and is ignored by the interpreter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Decoded command code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// G0 / G1 linear move (`rapid` is true for G0)
    LinearMove { rapid: bool },
    /// G90 absolute positioning
    Absolute,
    /// G91 relative positioning
    Relative,
    /// G92 set current position
    SetPosition,
    /// Empty line or unsupported code
    Other,
}

impl Command {
    /// Decode an upper-cased command code such as "G1" or "G01"
    pub fn from_code(code: &str) -> Self {
        match extract_gcode_num(code) {
            Some(0) => Self::LinearMove { rapid: true },
            Some(1) => Self::LinearMove { rapid: false },
            Some(90) => Self::Absolute,
            Some(91) => Self::Relative,
            Some(92) => Self::SetPosition,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LinearMove { rapid: true } => write!(f, "G0"),
            Self::LinearMove { rapid: false } => write!(f, "G1"),
            Self::Absolute => write!(f, "G90"),
            Self::Relative => write!(f, "G91"),
            Self::SetPosition => write!(f, "G92"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Extract the G number from a code (e.g., "G01" -> Some(1)).
/// The remainder must be one or two digits, so "G1.1", "G28X" and
/// "G092" do not match.
fn extract_gcode_num(code: &str) -> Option<u32> {
    let digits = code.strip_prefix('G')?;
    if !(1..=2).contains(&digits.len()) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok()
}
