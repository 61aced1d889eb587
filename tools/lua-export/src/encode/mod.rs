//! Per-entity encoders
//!
//! Every entity kind implements [`ToLua`](crate::lua::ToLua) in the module
//! named after it. Nodes are the exception: they need the flattened tree to
//! turn parent and child links into indices, so they go through
//! [`write_node`].
//!
//! # Modules
//!
//! - [`primitives`] - Vectors, matrices, quaternions, colors, bounding boxes
//! - [`scene`] - Scene root, scene flags and the node list
//! - [`mesh`] - Meshes, morph targets, faces, channel lists
//! - [`material`] - Materials and their typed properties
//! - [`texture`] - Embedded textures
//! - [`animation`] - Animation clips and channels
//! - [`skeleton`] - Skinning bones and skeletons
//! - [`metadata`] - Recursive key/value metadata
//! - [`light`] - Placeholders for lights and cameras

pub mod animation;
pub mod light;
pub mod material;
pub mod mesh;
pub mod metadata;
pub mod primitives;
pub mod scene;
pub mod skeleton;
pub mod texture;

pub use animation::behaviour_token;
pub use material::{property_type_token, texture_semantic_token};
pub use scene::write_node;
