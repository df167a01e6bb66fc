//! Keyframe tracks and clip playback state.
//!
//! An [`AnimationNode`] holds the sparse position/rotation/scale tracks of
//! one hierarchy node and caches the local transform evaluated for the
//! current time. An [`Animation`] owns all nodes of one clip plus the two
//! tree roots (scene geometry and camera) and the ping-pong playback
//! state. Tracks may be partially specified: a missing or single-key track
//! degrades to a constant, never an error.

use cgmath::{InnerSpace, Matrix4, One, Quaternion, SquareMatrix, Vector3, VectorSpace};
use log::warn;

use crate::data_structures::scene_graph::NodeTree;

/// Locate the keyframe pair bracketing `time` and interpolate.
///
/// Keys are ascending. Before the first key the first value is returned,
/// at or after the last key the last value; in between `interpolate` is
/// called with the bracketing values and the normalized fraction.
/// Mismatched key/value lengths are tolerated over the common prefix.
fn sample_track<T: Copy>(
    keys: &[f32],
    values: &[T],
    time: f32,
    interpolate: impl FnOnce(T, T, f32) -> T,
) -> Option<T> {
    if keys.len() != values.len() {
        warn!(
            "Track has {} keys but {} values, evaluating the common prefix.",
            keys.len(),
            values.len()
        );
    }
    let len = keys.len().min(values.len());
    if len == 0 {
        return None;
    }
    let keys = &keys[..len];
    let values = &values[..len];

    if time <= keys[0] {
        return Some(values[0]);
    }
    if time >= keys[len - 1] {
        return Some(values[len - 1]);
    }

    // First key strictly greater than `time`; the checks above guarantee
    // 1 <= next < len.
    let next = keys.partition_point(|&key| key <= time);
    let prev = next - 1;
    let span = keys[next] - keys[prev];
    let fraction = if span > 0.0 {
        (time - keys[prev]) / span
    } else {
        0.0
    };

    Some(interpolate(values[prev], values[next], fraction))
}

/// Independent keyframe tracks of one hierarchy node.
///
/// Keys are milliseconds in ascending order, parallel to their value
/// arrays. `transform` caches the result of the last [`update`](Self::update).
#[derive(Clone, Debug)]
pub struct AnimationNode {
    pub position_keys: Vec<f32>,
    pub position_values: Vec<Vector3<f64>>,
    pub rotation_keys: Vec<f32>,
    pub rotation_values: Vec<Quaternion<f32>>,
    pub scale_keys: Vec<f32>,
    pub scale_values: Vec<Vector3<f32>>,
    pub transform: Matrix4<f32>,
}

impl Default for AnimationNode {
    fn default() -> Self {
        Self {
            position_keys: Vec::new(),
            position_values: Vec::new(),
            rotation_keys: Vec::new(),
            rotation_values: Vec::new(),
            scale_keys: Vec::new(),
            scale_values: Vec::new(),
            transform: Matrix4::identity(),
        }
    }
}

impl AnimationNode {
    /// Evaluate the three tracks at `time` (milliseconds, already wrapped
    /// into the clip's duration) and cache the composed local transform.
    ///
    /// Position and scale interpolate linearly, rotation spherically along
    /// the shortest arc. Empty tracks fall back to identity components.
    pub fn update(&mut self, time: f32) {
        let position = sample_track(&self.position_keys, &self.position_values, time, |a, b, f| {
            a.lerp(b, f64::from(f))
        })
        .unwrap_or_else(|| Vector3::new(0.0, 0.0, 0.0));

        let rotation = sample_track(&self.rotation_keys, &self.rotation_values, time, |a, b, f| {
            // Flip to the same hemisphere first, otherwise the
            // interpolation unwinds the long way around.
            let b = if a.dot(b) < 0.0 { -b } else { b };
            a.slerp(b, f)
        })
        .unwrap_or_else(Quaternion::one);

        let scale = sample_track(&self.scale_keys, &self.scale_values, time, |a, b, f| {
            a.lerp(b, f)
        })
        .unwrap_or_else(|| Vector3::new(1.0, 1.0, 1.0));

        let translation = Vector3::new(
            position.x as f32,
            position.y as f32,
            position.z as f32,
        );
        self.transform = Matrix4::from_translation(translation)
            * Matrix4::from(rotation)
            * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z);
    }
}

/// One animation clip: its node table, tree roots and playback state.
#[derive(Clone, Debug)]
pub struct Animation {
    pub animation_nodes: Vec<AnimationNode>,
    /// Hierarchy driving the scene's instances.
    pub root_node: NodeTree,
    /// Separate hierarchy for the camera; owns no instances.
    pub camera_node: NodeTree,
    pub name: String,
    pub duration_ms: f32,
    /// Current playback position in milliseconds, `[0, duration_ms]`.
    pub animation_progress: f32,
    /// Ping-pong direction, +1 forward, -1 backward.
    pub sign: f32,
    pub normalized_time: f32,
    pub has_camera_animation: bool,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            animation_nodes: Vec::new(),
            root_node: NodeTree::default(),
            camera_node: NodeTree::default(),
            name: String::new(),
            duration_ms: 0.0,
            animation_progress: 0.0,
            sign: 1.0,
            normalized_time: 0.0,
            has_camera_animation: false,
        }
    }
}
