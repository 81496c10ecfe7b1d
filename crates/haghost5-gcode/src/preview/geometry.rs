//! Renderer-facing geometry
//!
//! Flattens layers into line-list vertex buffers: every two consecutive
//! `x, y, z` triples form one independent segment, never a polyline.

use haghost5_core::{Bounds3D, Point3D};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::Layer;

/// Name given to the geometry container
pub const GEOMETRY_NAME: &str = "gcode";

/// Classification of a vertex group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Material is deposited along these segments
    Extruding,
    /// Positioning moves and retractions
    Travel,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extruding => write!(f, "extruding"),
            Self::Travel => write!(f, "travel"),
        }
    }
}

/// One drawable line-list buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexGroup {
    pub kind: SegmentKind,
    /// Source layer index; `None` for groups merged across all layers
    pub layer: Option<usize>,
    /// Flat `x, y, z` positions. JSON has no NaN, so non-finite values are
    /// written as `null` and read back as NaN.
    #[serde(deserialize_with = "deserialize_positions")]
    pub positions: Vec<f32>,
}

fn deserialize_positions<'de, D>(deserializer: D) -> Result<Vec<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Option<f32>>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|v| v.unwrap_or(f32::NAN)).collect())
}

impl VertexGroup {
    fn from_vertices(kind: SegmentKind, layer: Option<usize>, vertices: &[f64]) -> Self {
        Self {
            kind,
            layer,
            positions: vertices.iter().map(|&v| v as f32).collect(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn segment_count(&self) -> usize {
        self.positions.len() / 6
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate `(start, end)` pairs
    pub fn segments(&self) -> impl Iterator<Item = (Point3D, Point3D)> + '_ {
        self.positions.chunks_exact(6).map(|c| {
            (
                Point3D::from([c[0], c[1], c[2]]),
                Point3D::from([c[3], c[4], c[5]]),
            )
        })
    }
}

/// Named container of drawable groups produced from one parse.
///
/// Positions are in machine space (Z up). Renderers with a Y-up convention
/// must rotate by -90 degrees about X to match the reference preview; see
/// [`GcodeGeometry::rotate_to_y_up`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GcodeGeometry {
    pub name: String,
    pub split_layer: bool,
    pub groups: Vec<VertexGroup>,
}

impl GcodeGeometry {
    /// Assemble groups from parsed layers.
    ///
    /// With `split_layer` each layer yields an extruding and a travel group
    /// (in that order). Otherwise exactly two groups are produced, each the
    /// concatenation of every layer's buffer in layer order.
    pub fn from_layers(layers: &[Layer], split_layer: bool) -> Self {
        let groups = if split_layer {
            layers
                .iter()
                .enumerate()
                .flat_map(|(idx, layer)| {
                    [
                        VertexGroup::from_vertices(
                            SegmentKind::Extruding,
                            Some(idx),
                            &layer.extruding_vertices,
                        ),
                        VertexGroup::from_vertices(
                            SegmentKind::Travel,
                            Some(idx),
                            &layer.travel_vertices,
                        ),
                    ]
                })
                .collect()
        } else {
            let extruding: Vec<f64> = layers
                .iter()
                .flat_map(|l| l.extruding_vertices.iter().copied())
                .collect();
            let travel: Vec<f64> = layers
                .iter()
                .flat_map(|l| l.travel_vertices.iter().copied())
                .collect();
            vec![
                VertexGroup::from_vertices(SegmentKind::Extruding, None, &extruding),
                VertexGroup::from_vertices(SegmentKind::Travel, None, &travel),
            ]
        };

        Self {
            name: GEOMETRY_NAME.to_string(),
            split_layer,
            groups,
        }
    }

    pub fn groups_of(&self, kind: SegmentKind) -> impl Iterator<Item = &VertexGroup> {
        self.groups.iter().filter(move |g| g.kind == kind)
    }

    pub fn segment_count(&self, kind: SegmentKind) -> usize {
        self.groups_of(kind).map(VertexGroup::segment_count).sum()
    }

    /// Bounds over all finite vertices, `None` when nothing was drawn
    pub fn bounds(&self) -> Option<Bounds3D> {
        let mut bounds = Bounds3D::new();
        for group in &self.groups {
            for v in group.positions.chunks_exact(3) {
                bounds.update(v[0], v[1], v[2]);
            }
        }
        bounds.is_valid().then_some(bounds)
    }

    /// Rotate -90 degrees about X: `(x, y, z) -> (x, z, -y)`.
    ///
    /// Never applied during parsing.
    pub fn rotate_to_y_up(&mut self) {
        for group in &mut self.groups {
            for v in group.positions.chunks_exact_mut(3) {
                let (y, z) = (v[1], v[2]);
                v[1] = z;
                v[2] = -y;
            }
        }
    }

    /// Serialize for hand-off to a JavaScript renderer.
    ///
    /// NaN vertices from a lenient parse become `null`; consumers must treat
    /// `null` as NaN rather than zero.
    pub fn to_json(&self) -> haghost5_core::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Read geometry produced by [`GcodeGeometry::to_json`]
    pub fn from_json(json: &str) -> haghost5_core::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
