//! Scene instances with dual-buffered transforms.
//!
//! Instances reference a mesh and a material by index and carry their
//! world transform twice: the pose written this frame and the pose of the
//! frame before. Temporal consumers (motion vectors, reprojection) read
//! both; the composer swaps them in a fixed order each frame.

use cgmath::{Matrix4, SquareMatrix, Vector3, Vector4};

use crate::INVALID_INDEX;

/// One placed occurrence of a mesh in the scene.
///
/// `rotation` holds the world orientation (3x3 block, scale folded in by
/// the composer), `position` the world translation in double precision so
/// large scenes keep sub-millimeter accuracy. The `*_prev` pair is the
/// previous frame's pose.
#[derive(Clone, Debug)]
pub struct Instance {
    pub rotation: Matrix4<f32>,
    pub rotation_prev: Matrix4<f32>,
    pub position: Vector3<f64>,
    pub position_prev: Vector3<f64>,
    pub scale: Vector3<f32>,
    pub mesh_index: u32,
    pub material_index: u32,
    /// When false the instance is merged into the monolithic static
    /// acceleration structure; when true it lives in the rebuildable
    /// dynamic one and may move every frame.
    pub allow_update: bool,
}

impl Default for Instance {
    fn default() -> Self {
        Self {
            rotation: Matrix4::identity(),
            rotation_prev: Matrix4::identity(),
            position: Vector3::new(0.0, 0.0, 0.0),
            position_prev: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            mesh_index: INVALID_INDEX,
            material_index: INVALID_INDEX,
            allow_update: false,
        }
    }
}

impl Instance {
    /// Apply a freshly composed world transform.
    ///
    /// Fixed order for motion-vector continuity: the current pose is
    /// copied into the previous-frame slots first, then the new rotation
    /// block and translation are written.
    pub fn set_world_transform(&mut self, world: &Matrix4<f32>) {
        self.rotation_prev = self.rotation;
        self.position_prev = self.position;

        let mut rotation = *world;
        rotation.w = Vector4::unit_w();
        self.rotation = rotation;
        self.position = Vector3::new(
            f64::from(world.w.x),
            f64::from(world.w.y),
            f64::from(world.w.z),
        );
    }

    /// Single-precision position for GPU upload.
    pub fn position_f32(&self) -> Vector3<f32> {
        Vector3::new(
            self.position.x as f32,
            self.position.y as f32,
            self.position.z as f32,
        )
    }
}
