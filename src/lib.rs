//! scene-ngin
//!
//! The CPU-side asset model for a real-time renderer: loaded textures,
//! meshes, materials, scene instances and hierarchical keyframe animation,
//! held in a form ready for upload to a graphics device. File parsing, GPU
//! resource creation and the render pipeline live in collaborating crates;
//! this one owns the numeric contracts they rely on: packed vertex and
//! texture encodings, subresource addressing and transform evaluation.
//!
//! High-level modules
//! - `data_structures`: engine data models (vertices, textures, materials,
//!   meshes, instances, scene hierarchy)
//! - `animation`: keyframe tracks, clip playback state
//! - `scene`: the owning aggregate and per-frame animation driver
//!

pub mod animation;
pub mod data_structures;
pub mod scene;

/// Sentinel for unset mesh/material/animation-node/BLAS indices.
pub const INVALID_INDEX: u32 = u32::MAX;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use wgpu::TextureFormat;
