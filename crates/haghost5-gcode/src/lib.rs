//! # HAGhost5 G-Code
//!
//! Converts a 3D printer G-code document into line geometry for the
//! dashboard preview.
//!
//! ## Architecture
//!
//! ```text
//! text ── tokenizer ── MotionInterpreter ── LayerAggregator ── GcodeGeometry
//!          (lines,       (MachineState,       (layers by Z,       (line-list
//!           params)       G0/G1/G90/G91/G92)   extruding/travel)   buffers)
//! ```
//!
//! Only G0, G1, G90, G91 and G92 affect the result; every other code is
//! ignored. Malformed numbers become NaN and propagate into the geometry
//! unless [`ParseOptions::strict`] is set.
//!
//! ## Usage
//!
//! ```rust
//! use haghost5_gcode::{parse_gcode, ParseOptions, SegmentKind};
//!
//! let gcode = "G90\nG1 X10 Y0 Z0.2 E1\nG1 X20 E2\nG0 Z5\n";
//! let geometry = parse_gcode(gcode, &ParseOptions::default()).unwrap();
//! assert_eq!(geometry.segment_count(SegmentKind::Extruding), 2);
//! assert_eq!(geometry.segment_count(SegmentKind::Travel), 1);
//! ```

pub mod gcode;
pub mod loader;
pub mod options;
pub mod preview;

pub use gcode::{
    tokenize, tokenize_line, Command, Instruction, MachineState, MotionInterpreter, ParseStats,
    Segment,
};
pub use loader::{parse_gcode, parse_layers, GcodeLoader, ParseResult};
pub use options::ParseOptions;
pub use preview::{GcodeGeometry, Layer, LayerAggregator, SegmentKind, VertexGroup, GEOMETRY_NAME};
