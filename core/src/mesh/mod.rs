//! CPU-side mesh data and generators.
//!
//! This module provides the GPU-agnostic mesh representation consumed by the
//! graphics crate:
//!
//! - [`MeshData`] - Validated triangle-mesh arrays, one array per vertex
//!   attribute plus `u32` triangle indices
//! - Generators for the demo shapes (quad, cube)
//!
//! Vertex attributes are kept as separate arrays on purpose: each attribute
//! becomes its own GPU vertex-buffer stream.

mod data;
pub mod generators;

pub use data::MeshData;
