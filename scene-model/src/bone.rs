//! Skinning bones and skeletons
//!
//! Bones name the node they follow but the name is not resolved against the
//! hierarchy here; consumers match names themselves.

use glam::Mat4;
use serde::{Deserialize, Serialize};

/// Influence of a bone on one vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexWeight {
    pub vertex_id: u32,
    pub weight: f32,
}

impl VertexWeight {
    pub fn new(vertex_id: u32, weight: f32) -> Self {
        Self { vertex_id, weight }
    }
}

/// Per-mesh skinning bone
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Bone {
    pub name: String,
    /// Mesh space to bone space
    #[serde(default)]
    pub offset_matrix: Mat4,
    #[serde(default)]
    pub weights: Vec<VertexWeight>,
}

/// Standalone skeleton
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Skeleton {
    #[serde(default)]
    pub name: String,
    pub bones: Vec<SkeletonBone>,
}

/// Bone inside a [`Skeleton`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkeletonBone {
    /// Index of the parent bone in the same skeleton, -1 for a root bone
    #[serde(default = "root_parent")]
    pub parent: i32,
    #[serde(default)]
    pub local_matrix: Mat4,
    #[serde(default)]
    pub offset_matrix: Mat4,
    #[serde(default)]
    pub weights: Vec<VertexWeight>,
}

fn root_parent() -> i32 {
    SkeletonBone::ROOT_PARENT
}

impl SkeletonBone {
    pub const ROOT_PARENT: i32 = -1;

    pub fn is_root(&self) -> bool {
        self.parent < 0
    }
}

impl Default for SkeletonBone {
    fn default() -> Self {
        Self {
            parent: Self::ROOT_PARENT,
            local_matrix: Mat4::IDENTITY,
            offset_matrix: Mat4::IDENTITY,
            weights: Vec::new(),
        }
    }
}
