//! Engine data structures: vertices, textures, materials, meshes, instances
//! and the scene hierarchy.
//!
//! This module contains the core data types for scene representation:
//!
//! - `vertex` holds the packed GPU vertex record and its pack/unpack codec
//! - `texture` describes loaded textures and their subresource geometry
//! - `material` holds texture-map indices and alpha-mode queries
//! - `mesh` covers buffer ranges, bounding boxes and transient primitives
//! - `instance` holds per-instance dual-buffered transform data
//! - `scene_graph` enables hierarchical transform composition

pub mod instance;
pub mod material;
pub mod mesh;
pub mod scene_graph;
pub mod texture;
pub mod vertex;
