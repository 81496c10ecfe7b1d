//! Layer aggregation
//!
//! Collects motion segments into layers keyed by the Z height at which
//! extrusion happened, keeping printing and travel vertices apart.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::gcode::Segment;

/// Geometry sharing one Z height.
///
/// Vertex buffers are flat `x, y, z` triples; every two consecutive
/// triples form one segment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layer {
    pub z: f64,
    pub extruding_vertices: Vec<f64>,
    pub travel_vertices: Vec<f64>,
}

impl Layer {
    pub fn new(z: f64) -> Self {
        Self {
            z,
            ..Self::default()
        }
    }

    pub fn extruding_segment_count(&self) -> usize {
        self.extruding_vertices.len() / 6
    }

    pub fn travel_segment_count(&self) -> usize {
        self.travel_vertices.len() / 6
    }

    pub fn is_empty(&self) -> bool {
        self.extruding_vertices.is_empty() && self.travel_vertices.is_empty()
    }

    fn push(&mut self, segment: &Segment) {
        let buffer = if segment.extruding {
            &mut self.extruding_vertices
        } else {
            &mut self.travel_vertices
        };
        buffer.extend_from_slice(&[
            segment.start.x,
            segment.start.y,
            segment.start.z,
            segment.end.x,
            segment.end.y,
            segment.end.z,
        ]);
    }
}

/// Ordered layer list plus the "current layer" cursor.
///
/// The current layer is always the last one opened. A layer is never
/// looked up by Z, so revisiting an earlier height opens a new entry.
#[derive(Debug, Clone, Default)]
pub struct LayerAggregator {
    layers: Vec<Layer>,
}

impl LayerAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new layer at `z` and make it current.
    pub fn open_layer(&mut self, z: f64) {
        trace!("Opening layer {} at z={}", self.layers.len(), z);
        self.layers.push(Layer::new(z));
    }

    pub fn current(&self) -> Option<&Layer> {
        self.layers.last()
    }

    /// True when extrusion at `z` requires a new layer: nothing is open yet
    /// or the open layer sits at a different height. NaN heights always
    /// compare unequal.
    pub fn needs_layer_at(&self, z: f64) -> bool {
        self.current().is_none_or(|layer| layer.z != z)
    }

    /// File a segment on the current layer, lazily opening one at the
    /// segment's starting Z.
    pub fn record_segment(&mut self, segment: &Segment) {
        if self.layers.is_empty() {
            self.open_layer(segment.start.z);
        }
        if let Some(layer) = self.layers.last_mut() {
            layer.push(segment);
        }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn into_layers(self) -> Vec<Layer> {
        self.layers
    }
}
