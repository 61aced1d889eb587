//! Renderable geometry

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::bone::Bone;
use crate::color::Color4;

bitflags::bitflags! {
    /// Primitive kinds present in a mesh
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct PrimitiveTypes: u32 {
        const POINT = 0x1;
        const LINE = 0x2;
        const TRIANGLE = 0x4;
        const POLYGON = 0x8;
        /// Polygons were split into triangles with an n-gon marker
        const NGON_ENCODING = 0x10;
    }
}

impl Default for PrimitiveTypes {
    fn default() -> Self {
        Self::TRIANGLE
    }
}

/// How morph targets are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MorphMethod {
    #[default]
    Unknown,
    VertexBlend,
    MorphNormalized,
    MorphRelative,
    /// Code not known to this crate
    Other(u32),
}

impl MorphMethod {
    pub fn from_raw(code: u32) -> Self {
        match code {
            0 => Self::Unknown,
            1 => Self::VertexBlend,
            2 => Self::MorphNormalized,
            3 => Self::MorphRelative,
            other => Self::Other(other),
        }
    }

    /// Numeric code as stored by the import stage
    pub fn code(self) -> u32 {
        match self {
            Self::Unknown => 0,
            Self::VertexBlend => 1,
            Self::MorphNormalized => 2,
            Self::MorphRelative => 3,
            Self::Other(code) => code,
        }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or the zero box for no points
    pub fn from_points(points: &[Vec3]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        points.iter().fold(Self::new(*first, *first), |aabb, p| {
            Self::new(aabb.min.min(*p), aabb.max.max(*p))
        })
    }
}

/// A polygon as an ordered list of vertex indices
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Face {
    pub indices: Vec<u32>,
}

impl Face {
    pub fn new(indices: impl Into<Vec<u32>>) -> Self {
        Self {
            indices: indices.into(),
        }
    }

    pub fn triangle(a: u32, b: u32, c: u32) -> Self {
        Self::new([a, b, c])
    }
}

/// One texture coordinate channel
///
/// Coordinates are always stored as 3-vectors; `components` says how many of
/// them are meaningful (2 for ordinary UVs, 3 for volume textures).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvChannel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "default_uv_components")]
    pub components: u32,
    pub coords: Vec<Vec3>,
}

fn default_uv_components() -> u32 {
    2
}

impl UvChannel {
    pub fn new(coords: Vec<Vec3>) -> Self {
        Self {
            name: None,
            components: default_uv_components(),
            coords,
        }
    }

    pub fn named(name: impl Into<String>, coords: Vec<Vec3>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(coords)
        }
    }
}

/// Renderable geometry with optional per-vertex channels.
///
/// `colors` and `texture_coords` are indexed by channel; a `None` entry marks
/// a channel slot with no data while later slots may still be filled.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mesh {
    pub name: String,
    #[serde(default)]
    pub aabb: Aabb,
    #[serde(default)]
    pub primitive_types: PrimitiveTypes,
    pub vertices: Vec<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normals: Option<Vec<Vec3>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tangents: Option<Vec<Vec3>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitangents: Option<Vec<Vec3>>,
    #[serde(default)]
    pub colors: Vec<Option<Vec<Color4>>>,
    #[serde(default)]
    pub texture_coords: Vec<Option<UvChannel>>,
    #[serde(default)]
    pub faces: Vec<Face>,
    #[serde(default)]
    pub bones: Vec<Bone>,
    #[serde(default)]
    pub anim_meshes: Vec<AnimMesh>,
    #[serde(default)]
    pub material_index: u32,
    #[serde(default)]
    pub morph_method: MorphMethod,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of color channel slots that hold data
    pub fn color_channel_count(&self) -> usize {
        self.colors.iter().filter(|c| c.is_some()).count()
    }

    /// Number of UV channel slots that hold data
    pub fn uv_channel_count(&self) -> usize {
        self.texture_coords.iter().filter(|c| c.is_some()).count()
    }
}

/// Morph target: replacement vertex data blended onto its mesh
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimMesh {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub weight: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertices: Option<Vec<Vec3>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normals: Option<Vec<Vec3>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tangents: Option<Vec<Vec3>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitangents: Option<Vec<Vec3>>,
    #[serde(default)]
    pub colors: Vec<Option<Vec<Color4>>>,
    #[serde(default)]
    pub texture_coords: Vec<Option<UvChannel>>,
}
