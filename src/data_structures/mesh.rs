//! Meshes, bounding boxes and transient per-triangle data.

use cgmath::Vector3;

use crate::INVALID_INDEX;

/// Element type of the shared index buffer.
pub type Index = u16;

/// Axis-aligned bounding box.
///
/// Starts inverted so the first [`extend`](Self::extend) sets both corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Default for Aabb {
    fn default() -> Self {
        Self {
            min: Vector3::new(f32::MAX, f32::MAX, f32::MAX),
            max: Vector3::new(f32::MIN, f32::MIN, f32::MIN),
        }
    }
}

impl Aabb {
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    pub fn extend(&mut self, point: Vector3<f32>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    pub fn union(&mut self, other: &Aabb) {
        if other.is_valid() {
            self.extend(other.min);
            self.extend(other.max);
        }
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Bounds of a point cloud, typically a mesh's unpacked positions.
    pub fn from_points(points: impl IntoIterator<Item = Vector3<f32>>) -> Self {
        let mut aabb = Self::default();
        for point in points {
            aabb.extend(point);
        }
        aabb
    }
}

/// A range of the scene's shared vertex/index buffers plus bounds.
///
/// The AABB is in object space and must be adjusted by the instance's
/// scale before culling against it.
#[derive(Clone, Copy, Debug)]
pub struct Mesh {
    pub aabb: Aabb,
    pub vertex_offset: u32,
    pub index_offset: u32,
    pub index_num: u32,
    pub vertex_num: u32,
    /// Slot in the user-controlled dynamic BLAS array, `INVALID_INDEX`
    /// for geometry folded into the static structure.
    pub blas_index: u32,
}

impl Default for Mesh {
    fn default() -> Self {
        Self {
            aabb: Aabb::default(),
            vertex_offset: 0,
            index_offset: 0,
            index_num: 0,
            vertex_num: 0,
            blas_index: INVALID_INDEX,
        }
    }
}

/// Per-triangle shading data, transient like the vertex streams.
#[derive(Clone, Copy, Debug, Default)]
pub struct Primitive {
    pub world_to_uv_units: f32,
    pub curvature: f32,
}
