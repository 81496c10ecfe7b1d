//! Machine state and motion segments

use haghost5_core::Point3D;
use serde::{Deserialize, Serialize};

use super::Instruction;

/// Live machine state tracked while interpreting a document.
///
/// Defaults to the origin, absolute positioning, not extruding.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MachineState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Filament axis position
    pub e: f64,
    /// Feed rate
    pub f: f64,
    /// Whether the last linear move deposited material
    pub extruding: bool,
    /// G91 relative positioning active
    pub relative: bool,
}

impl MachineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Point3D {
        Point3D::new(self.x, self.y, self.z)
    }

    /// Resolve a parameter against the current axis value using the active
    /// distance mode.
    fn resolve(&self, current: f64, value: Option<f64>) -> f64 {
        match value {
            Some(v) if self.relative => current + v,
            Some(v) => v,
            None => current,
        }
    }

    /// Compute the state a G0/G1 instruction moves to.
    ///
    /// Feed rate follows the same distance mode as the axes. Flags are
    /// carried over unchanged.
    pub fn target(&self, instruction: &Instruction) -> MachineState {
        MachineState {
            x: self.resolve(self.x, instruction.get('x')),
            y: self.resolve(self.y, instruction.get('y')),
            z: self.resolve(self.z, instruction.get('z')),
            e: self.resolve(self.e, instruction.get('e')),
            f: self.resolve(self.f, instruction.get('f')),
            ..*self
        }
    }

    /// Filament advanced by `instruction` when moving to `target`.
    ///
    /// In relative mode this is the E word exactly as written (zero when
    /// absent), otherwise the difference between target and current E.
    pub fn extrusion_delta(&self, instruction: &Instruction, target: &MachineState) -> f64 {
        if self.relative {
            instruction.get('e').unwrap_or(0.0)
        } else {
            target.e - self.e
        }
    }

    /// G92: overwrite the given axes without any mode transformation.
    /// Feed rate is not affected.
    pub fn set_position(&mut self, instruction: &Instruction) {
        if let Some(x) = instruction.get('x') {
            self.x = x;
        }
        if let Some(y) = instruction.get('y') {
            self.y = y;
        }
        if let Some(z) = instruction.get('z') {
            self.z = z;
        }
        if let Some(e) = instruction.get('e') {
            self.e = e;
        }
    }
}

/// A straight line between two positions, tagged with the extrusion state
/// it was generated under.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point3D,
    pub end: Point3D,
    pub extruding: bool,
}

impl Segment {
    pub fn new(start: Point3D, end: Point3D, extruding: bool) -> Self {
        Self {
            start,
            end,
            extruding,
        }
    }

    pub fn length(&self) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let dz = self.end.z - self.start.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}
