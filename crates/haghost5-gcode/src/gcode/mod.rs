//! G-Code tokenizing and interpretation
//!
//! This module provides:
//! - Comment stripping and line tokenizing
//! - Command code decoding for the motion subset (G0, G1, G90, G91, G92)
//! - Machine state tracking
//! - The motion state machine that emits segments into layers

pub mod command;
pub mod interpreter;
pub mod state;
pub mod tokenizer;

pub use command::Command;
pub use interpreter::{MotionInterpreter, ParseStats};
pub use state::{MachineState, Segment};
pub use tokenizer::{parse_number_prefix, strip_comment, tokenize, tokenize_line, Instruction};
