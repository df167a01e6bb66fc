//! The scene aggregate: owner of all asset arrays and playback driver.
//!
//! A [`Scene`] owns the transient upload data (textures, packed and
//! unpacked vertices, indices, primitives, all droppable once the GPU holds
//! copies) and the persistent data (materials, instances, meshes,
//! animations). [`Scene::animate`] advances one clip and walks its
//! hierarchies, leaving the instances' dual-buffered transforms and the
//! camera transform valid for the frame. Evaluation is single-threaded
//! and synchronous; `&mut self` is the concurrency contract.

use anyhow::{Result, ensure};
use cgmath::{Matrix4, SquareMatrix};
use log::warn;

use crate::INVALID_INDEX;
use crate::animation::Animation;
use crate::data_structures::{
    instance::Instance,
    material::Material,
    mesh::{Aabb, Index, Mesh, Primitive},
    scene_graph::NodeTree,
    texture::Texture,
    vertex::{UnpackedVertex, Vertex},
};

/// Everything the renderer needs from one loaded scene.
pub struct Scene {
    // Transient: released after GPU upload via the unload_* methods.
    pub textures: Vec<Texture>,
    pub vertices: Vec<Vertex>,
    pub unpacked_vertices: Vec<UnpackedVertex>,
    pub indices: Vec<Index>,
    pub primitives: Vec<Primitive>,

    // Persistent.
    pub materials: Vec<Material>,
    pub instances: Vec<Instance>,
    pub meshes: Vec<Mesh>,
    pub animations: Vec<Animation>,
    pub scene_to_world: Matrix4<f32>,
    pub aabb: Aabb,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            textures: Vec::new(),
            vertices: Vec::new(),
            unpacked_vertices: Vec::new(),
            indices: Vec::new(),
            primitives: Vec::new(),
            materials: Vec::new(),
            instances: Vec::new(),
            meshes: Vec::new(),
            animations: Vec::new(),
            scene_to_world: Matrix4::identity(),
            aabb: Aabb::default(),
        }
    }

    /// Advance the selected clip and recompose all affected transforms.
    ///
    /// `elapsed_time` is in seconds, `animation_progress` in milliseconds
    /// and persisted by the caller across frames. Playback ping-pongs:
    /// overshoot past either bound reflects back and flips the direction
    /// sign instead of wrapping. A zero-duration clip is a static pose at
    /// time 0.
    ///
    /// After the clip's nodes are evaluated, the geometry root updates
    /// every driven instance (previous pose first, then current) and the
    /// camera root writes into `out_camera_transform`, both seeded with
    /// `scene_to_world` as parent transform.
    pub fn animate(
        &mut self,
        animation_speed: f32,
        elapsed_time: f32,
        animation_progress: &mut f32,
        animation_index: u32,
        mut out_camera_transform: Option<&mut Matrix4<f32>>,
    ) {
        let Some(animation) = self.animations.get_mut(animation_index as usize) else {
            warn!(
                "Animation {} requested but the scene only has {}.",
                animation_index,
                self.animations.len()
            );
            return;
        };

        let duration = animation.duration_ms;
        let mut progress = *animation_progress;
        if duration > 0.0 {
            progress += elapsed_time * 1000.0 * animation_speed * animation.sign;
            if progress > duration {
                progress = 2.0 * duration - progress;
                animation.sign = -1.0;
            } else if progress < 0.0 {
                progress = -progress;
                animation.sign = 1.0;
            }
            // A single reflection handles any realistic frame delta, but a
            // huge one could still land outside the range.
            progress = progress.clamp(0.0, duration);
        } else {
            progress = 0.0;
        }

        *animation_progress = progress;
        animation.animation_progress = progress;
        animation.normalized_time = if duration > 0.0 { progress / duration } else { 0.0 };

        for node in &mut animation.animation_nodes {
            node.update(progress);
        }

        let animation = &self.animations[animation_index as usize];
        animation.root_node.animate(
            &mut self.instances,
            &animation.animation_nodes,
            &self.scene_to_world,
            None,
        );

        if let Some(out) = out_camera_transform.as_deref_mut() {
            animation.camera_node.animate(
                &mut self.instances,
                &animation.animation_nodes,
                &self.scene_to_world,
                Some(out),
            );
        }
    }

    /// Find an already-loaded texture by content hash, for deduplication
    /// at load time.
    pub fn find_texture_by_hash(&self, hash: u64) -> Option<u32> {
        self.textures
            .iter()
            .position(|texture| texture.hash == hash)
            .map(|index| index as u32)
    }

    /// Release all texture pixel data.
    ///
    /// Call once the GPU owns copies; the descriptors are gone afterwards
    /// and the data cannot be read again without reloading.
    pub fn unload_texture_data(&mut self) {
        self.textures.clear();
        self.textures.shrink_to_fit();
    }

    /// Release the CPU-side geometry streams after GPU upload.
    pub fn unload_geometry_data(&mut self) {
        self.vertices.clear();
        self.vertices.shrink_to_fit();

        self.unpacked_vertices.clear();
        self.unpacked_vertices.shrink_to_fit();

        self.indices.clear();
        self.indices.shrink_to_fit();

        self.primitives.clear();
        self.primitives.shrink_to_fit();
    }

    /// Check the cross-array index invariant after assembly.
    ///
    /// Loaders call this once before upload; transient arrays that were
    /// already unloaded are skipped. Runtime evaluation does not
    /// re-validate, out-of-range indices there are programming errors.
    pub fn validate(&self) -> Result<()> {
        for (i, instance) in self.instances.iter().enumerate() {
            ensure!(
                (instance.mesh_index as usize) < self.meshes.len(),
                "instance {} references mesh {} of {}",
                i,
                instance.mesh_index,
                self.meshes.len()
            );
            ensure!(
                (instance.material_index as usize) < self.materials.len(),
                "instance {} references material {} of {}",
                i,
                instance.material_index,
                self.materials.len()
            );
        }

        if !self.textures.is_empty() {
            for (i, material) in self.materials.iter().enumerate() {
                ensure!(
                    !material.has_dangling_maps(self.textures.len()),
                    "material {} references a texture out of range ({} textures)",
                    i,
                    self.textures.len()
                );
            }
            for (i, texture) in self.textures.iter().enumerate() {
                ensure!(
                    texture.mip_num >= 1 && texture.array_size >= 1,
                    "texture {} ('{}') has an empty mip chain",
                    i,
                    texture.name
                );
                ensure!(
                    texture.mips.len()
                        == texture.mip_num as usize * texture.array_size as usize,
                    "texture {} ('{}') stores {} buffers for {} mips x {} slices",
                    i,
                    texture.name,
                    texture.mips.len(),
                    texture.mip_num,
                    texture.array_size
                );
            }
        }

        if !self.vertices.is_empty() {
            for (i, mesh) in self.meshes.iter().enumerate() {
                ensure!(
                    mesh.vertex_offset as usize + mesh.vertex_num as usize
                        <= self.vertices.len(),
                    "mesh {} vertex range exceeds the vertex buffer",
                    i
                );
                ensure!(
                    mesh.index_offset as usize + mesh.index_num as usize <= self.indices.len(),
                    "mesh {} index range exceeds the index buffer",
                    i
                );
            }
        }

        for (i, animation) in self.animations.iter().enumerate() {
            check_tree(
                &animation.root_node,
                self.instances.len(),
                animation.animation_nodes.len(),
                i,
            )?;
            check_tree(
                &animation.camera_node,
                self.instances.len(),
                animation.animation_nodes.len(),
                i,
            )?;
        }

        Ok(())
    }
}

fn check_tree(
    tree: &NodeTree,
    instance_num: usize,
    node_num: usize,
    animation_index: usize,
) -> Result<()> {
    ensure!(
        tree.animation_node_index == INVALID_INDEX
            || (tree.animation_node_index as usize) < node_num,
        "animation {} has a tree node referencing animation node {} of {}",
        animation_index,
        tree.animation_node_index,
        node_num
    );
    for &index in &tree.instances {
        ensure!(
            (index as usize) < instance_num,
            "animation {} has a tree node referencing instance {} of {}",
            animation_index,
            index,
            instance_num
        );
    }
    for child in &tree.children {
        check_tree(child, instance_num, node_num, animation_index)?;
    }
    Ok(())
}
