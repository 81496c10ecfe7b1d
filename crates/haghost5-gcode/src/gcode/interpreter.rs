//! Motion state machine
//!
//! Interprets tokenized instructions one at a time against a
//! [`MachineState`] and files the resulting segments into layers.

use serde::{Deserialize, Serialize};

use super::{Command, Instruction, MachineState, Segment};
use crate::preview::{Layer, LayerAggregator};

/// Counters gathered during one interpretation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    pub lines: usize,
    pub extruding_segments: usize,
    pub travel_segments: usize,
    pub ignored_commands: usize,
    /// Summed length of extruding segments; segments with a NaN endpoint
    /// are left out
    pub extruded_distance: f64,
    pub travel_distance: f64,
}

impl ParseStats {
    pub fn total_segments(&self) -> usize {
        self.extruding_segments + self.travel_segments
    }
}

/// Single-use interpreter owning the machine state and layer list of one
/// parse.
#[derive(Debug, Default)]
pub struct MotionInterpreter {
    state: MachineState,
    layers: LayerAggregator,
    stats: ParseStats,
}

impl MotionInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    pub fn layers(&self) -> &[Layer] {
        self.layers.layers()
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Apply one instruction. Returns the segment it emitted, if any.
    pub fn execute(&mut self, instruction: &Instruction) -> Option<Segment> {
        self.stats.lines += 1;
        if instruction.is_empty() {
            return None;
        }

        match Command::from_code(&instruction.command) {
            Command::LinearMove { .. } => return Some(self.linear_move(instruction)),
            Command::Absolute => self.state.relative = false,
            Command::Relative => self.state.relative = true,
            Command::SetPosition => self.state.set_position(instruction),
            Command::Other => self.stats.ignored_commands += 1,
        }
        None
    }

    fn linear_move(&mut self, instruction: &Instruction) -> Segment {
        let target = self.state.target(instruction);
        let delta = self.state.extrusion_delta(instruction, &target);

        // The flag is set before the segment is emitted, so the move that
        // starts extrusion is itself an extruding segment.
        self.state.extruding = delta > 0.0;
        if self.state.extruding && self.layers.needs_layer_at(target.z) {
            self.layers.open_layer(target.z);
        }

        let segment = Segment::new(self.state.position(), target.position(), self.state.extruding);
        self.layers.record_segment(&segment);
        let length = segment.length();
        let length = if length.is_finite() { length } else { 0.0 };
        if segment.extruding {
            self.stats.extruding_segments += 1;
            self.stats.extruded_distance += length;
        } else {
            self.stats.travel_segments += 1;
            self.stats.travel_distance += length;
        }

        self.state = MachineState {
            extruding: self.state.extruding,
            ..target
        };
        segment
    }

    /// Consume the interpreter, returning layers in the order they were
    /// opened.
    pub fn finish(self) -> (Vec<Layer>, ParseStats) {
        (self.layers.into_layers(), self.stats)
    }
}
