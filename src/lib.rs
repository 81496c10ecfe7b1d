//! # HAGhost5
//!
//! G-code preview geometry for the HAGhost5 Home Assistant dashboard.
//!
//! ## Architecture
//!
//! HAGhost5 is organized as a workspace with multiple crates:
//!
//! 1. **haghost5-core** - Point/bounds models and error types
//! 2. **haghost5-gcode** - Tokenizer, motion state machine, layer aggregation
//!    and line-list geometry
//! 3. **haghost5** - This facade, re-exporting the public API and providing
//!    logging setup for hosts
//!
//! The geometry is in machine space (Z up). Y-up renderers apply a -90
//! degree rotation about X, available as
//! [`GcodeGeometry::rotate_to_y_up`].

pub use haghost5_core::{data, Bounds3D, Error, GcodeError, Point3D, Result};

pub use haghost5_gcode::{
    gcode, parse_gcode, parse_layers, preview, Command, GcodeGeometry, GcodeLoader, Instruction,
    Layer, LayerAggregator, MachineState, MotionInterpreter, ParseOptions, ParseResult,
    ParseStats, Segment, SegmentKind, VertexGroup, GEOMETRY_NAME,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
