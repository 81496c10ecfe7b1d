//! Parse configuration

use haghost5_core::Result;
use serde::{Deserialize, Serialize};

/// Options fixed before a parse begins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Emit one extruding/travel group pair per layer instead of one merged
    /// pair for the whole object
    pub split_layer: bool,
    /// Reject malformed parameter tokens instead of letting NaN propagate
    /// into the geometry
    pub strict: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_split_layer(mut self, split_layer: bool) -> Self {
        self.split_layer = split_layer;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Load options from JSON, e.g. `{"split_layer": true}`; missing keys
    /// take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
