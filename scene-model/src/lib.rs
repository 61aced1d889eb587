//! Scene graph types for the Lua scene exporter
//!
//! This crate holds the data handed over by an import stage:
//! - `lua-export` (encoder) reads these types and never mutates them
//! - import front-ends build them, or deserialize them from JSON
//!
//! # Modules
//!
//! - [`scene`] - Scene root and scene flags
//! - [`node`] - Transform hierarchy
//! - [`mesh`] - Geometry, faces, morph targets
//! - [`bone`] - Skinning bones and skeletons
//! - [`material`] - Materials and typed material properties
//! - [`texture`] - Embedded textures
//! - [`animation`] - Animation clips and channels
//! - [`metadata`] - Recursive key/value metadata
//! - [`color`] - RGB/RGBA colors
//! - [`validate`] - Precondition checks run before export

pub mod animation;
pub mod bone;
pub mod color;
pub mod light;
pub mod material;
pub mod mesh;
pub mod metadata;
pub mod node;
pub mod scene;
pub mod texture;
pub mod validate;

// Math types used throughout the model
pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3};

pub use animation::{
    AnimBehaviour, Animation, MeshAnim, MeshKey, MeshMorphAnim, MeshMorphKey, MorphTarget,
    NodeAnim, QuatKey, VectorKey,
};
pub use bone::{Bone, Skeleton, SkeletonBone, VertexWeight};
pub use color::{Color3, Color4};
pub use light::{Camera, Light};
pub use material::{Material, MaterialProperty, PropertyType, TextureSemantic};
pub use mesh::{Aabb, AnimMesh, Face, Mesh, MorphMethod, PrimitiveTypes, UvChannel};
pub use metadata::{Metadata, MetadataEntry, MetadataKind, MetadataValue};
pub use node::Node;
pub use scene::{Scene, SceneFlags};
pub use texture::{Texture, TexturePayload};
pub use validate::ModelError;
