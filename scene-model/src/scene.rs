//! Scene root

use serde::{Deserialize, Serialize};

use crate::animation::Animation;
use crate::bone::Skeleton;
use crate::light::{Camera, Light};
use crate::material::Material;
use crate::mesh::Mesh;
use crate::metadata::Metadata;
use crate::node::Node;
use crate::texture::Texture;

bitflags::bitflags! {
    /// Scene-wide status flags set by the import stage
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct SceneFlags: u32 {
        const INCOMPLETE = 0x1;
        const VALIDATED = 0x2;
        const VALIDATION_WARNING = 0x4;
        const NON_VERBOSE_FORMAT = 0x8;
        const TERRAIN = 0x10;
        const ALLOW_SHARED = 0x20;
    }
}

impl Default for SceneFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// A whole imported asset.
///
/// Meshes, materials, textures, animations and skeletons are flat lists;
/// everything else refers to them by position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub flags: SceneFlags,
    pub root: Node,
    #[serde(default)]
    pub meshes: Vec<Mesh>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub textures: Vec<Texture>,
    #[serde(default)]
    pub animations: Vec<Animation>,
    #[serde(default)]
    pub skeletons: Vec<Skeleton>,
    #[serde(default)]
    pub lights: Vec<Light>,
    #[serde(default)]
    pub cameras: Vec<Camera>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Scene {
    /// Create an otherwise empty scene around a root node
    pub fn new(name: impl Into<String>, root: Node) -> Self {
        Self {
            name: name.into(),
            root,
            ..Default::default()
        }
    }

    /// Number of nodes in the hierarchy
    pub fn node_count(&self) -> usize {
        self.root.subtree_len()
    }
}
