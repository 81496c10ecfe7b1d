//! Preview geometry
//!
//! Layer aggregation and the flat line-list buffers handed to the renderer.

pub mod geometry;
pub mod layers;

pub use geometry::{GcodeGeometry, SegmentKind, VertexGroup, GEOMETRY_NAME};
pub use layers::{Layer, LayerAggregator};
