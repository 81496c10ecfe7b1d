//! # HAGhost5 Core
//!
//! Core types shared by the HAGhost5 crates.
//! Provides the 3D point and bounds models used by the G-code preview
//! geometry, and the error types for every layer of the workspace.

pub mod data;
pub mod error;

pub use data::{Bounds3D, Point3D};
pub use error::{Error, GcodeError, Result};
