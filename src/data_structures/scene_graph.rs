//! Hierarchical transform composition.
//!
//! [`NodeTree`] is the scene hierarchy: each node owns its children by
//! value and references its animation node and driven instances by plain
//! index into the owning animation's and scene's arrays. Keeping the links
//! as indices instead of live references avoids lifetime coupling between
//! the tree and the scene; they are resolved at evaluation time.

use cgmath::{Matrix4, SquareMatrix};
use log::warn;

use crate::INVALID_INDEX;
use crate::animation::AnimationNode;
use crate::data_structures::instance::Instance;

/// One node of the transform hierarchy.
#[derive(Clone, Debug)]
pub struct NodeTree {
    pub children: Vec<NodeTree>,
    /// Indices into the scene's instance array driven by this node.
    pub instances: Vec<u32>,
    /// Static local transform, composed with the animated one if present.
    pub transform: Matrix4<f32>,
    pub hash: u64,
    /// Index into the animation's node table, `INVALID_INDEX` if the node
    /// is not animated.
    pub animation_node_index: u32,
}

impl Default for NodeTree {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            instances: Vec::new(),
            transform: Matrix4::identity(),
            hash: 0,
            animation_node_index: INVALID_INDEX,
        }
    }
}

impl NodeTree {
    /// Compose world transforms down the tree and propagate them.
    ///
    /// The local transform is the evaluated animation-node transform (if
    /// one is linked) times the static transform; the world transform is
    /// `parent_transform * local`. Every owned instance gets the world
    /// transform written through its dual-buffer swap, then children are
    /// visited in stored order so previous-frame buffering stays
    /// reproducible.
    ///
    /// `out_transform` is written before recursing, so for a camera chain
    /// (which owns no instances) the deepest node provides the final
    /// transform.
    pub fn animate(
        &self,
        instances: &mut [Instance],
        animation_nodes: &[AnimationNode],
        parent_transform: &Matrix4<f32>,
        mut out_transform: Option<&mut Matrix4<f32>>,
    ) {
        let local = match animation_nodes.get(self.animation_node_index as usize) {
            Some(node) => node.transform * self.transform,
            None => self.transform,
        };
        let world = parent_transform * local;

        for &index in &self.instances {
            match instances.get_mut(index as usize) {
                Some(instance) => instance.set_world_transform(&world),
                None => warn!(
                    "Node references instance {} but the scene only has {}.",
                    index,
                    instances.len()
                ),
            }
        }

        if let Some(out) = out_transform.as_deref_mut() {
            *out = world;
        }

        for child in &self.children {
            child.animate(instances, animation_nodes, &world, out_transform.as_deref_mut());
        }
    }

    /// Recursively mark every instance reachable from this node as
    /// updatable (or not).
    ///
    /// Used when a subtree is animated: its geometry then belongs in the
    /// per-frame rebuildable acceleration structure instead of the static
    /// monolithic one.
    pub fn set_allow_update(&self, instances: &mut [Instance], allow_update: bool) {
        for &index in &self.instances {
            match instances.get_mut(index as usize) {
                Some(instance) => instance.allow_update = allow_update,
                None => warn!(
                    "Node references instance {} but the scene only has {}.",
                    index,
                    instances.len()
                ),
            }
        }
        for child in &self.children {
            child.set_allow_update(instances, allow_update);
        }
    }
}
