//! Animation clips and their channels

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// What a channel does outside its key range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimBehaviour {
    /// Use the node's own transform
    #[default]
    Default,
    /// Hold the nearest key
    Constant,
    /// Extrapolate from the two nearest keys
    Linear,
    /// Loop the key range
    Repeat,
    Other(u32),
}

impl AnimBehaviour {
    pub fn from_raw(code: u32) -> Self {
        match code {
            0 => Self::Default,
            1 => Self::Constant,
            2 => Self::Linear,
            3 => Self::Repeat,
            other => Self::Other(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VectorKey {
    pub time: f64,
    pub value: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuatKey {
    pub time: f64,
    pub value: Quat,
}

/// Key selecting an entry of a mesh's anim-mesh list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshKey {
    pub time: f64,
    pub value: u32,
}

/// One morph target and its weight at a key
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MorphTarget {
    pub value: u32,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshMorphKey {
    pub time: f64,
    pub targets: Vec<MorphTarget>,
}

/// Transform track for a single node, matched by name
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeAnim {
    pub node_name: String,
    #[serde(default)]
    pub pre_state: AnimBehaviour,
    #[serde(default)]
    pub post_state: AnimBehaviour,
    #[serde(default)]
    pub position_keys: Vec<VectorKey>,
    #[serde(default)]
    pub rotation_keys: Vec<QuatKey>,
    #[serde(default)]
    pub scaling_keys: Vec<VectorKey>,
}

/// Vertex-buffer swap track for a mesh
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshAnim {
    pub name: String,
    #[serde(default)]
    pub keys: Vec<MeshKey>,
}

/// Morph-weight track for a mesh
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshMorphAnim {
    pub name: String,
    #[serde(default)]
    pub keys: Vec<MeshMorphKey>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Animation {
    #[serde(default)]
    pub name: String,
    /// Length in ticks
    #[serde(default)]
    pub duration: f64,
    /// 0 when the source format did not say
    #[serde(default)]
    pub ticks_per_second: f64,
    #[serde(default)]
    pub channels: Vec<NodeAnim>,
    #[serde(default)]
    pub mesh_channels: Vec<MeshAnim>,
    #[serde(default)]
    pub morph_mesh_channels: Vec<MeshMorphAnim>,
}
