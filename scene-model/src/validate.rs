//! Precondition checks
//!
//! The exporter trusts its input. These checks catch the references an
//! import stage can get wrong (indices into flat lists, per-vertex array
//! lengths) before anything is written.

use thiserror::Error;

use crate::mesh::{AnimMesh, Mesh, UvChannel};
use crate::metadata::{Metadata, MetadataKind, MetadataValue};
use crate::node::Node;
use crate::scene::Scene;
use crate::texture::TexturePayload;
use crate::Color4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Node '{node}' references mesh {index}, but the scene has {mesh_count} meshes")]
    DanglingMeshIndex {
        node: String,
        index: u32,
        mesh_count: usize,
    },

    #[error("Mesh '{mesh}' references material {index}, but the scene has {material_count} materials")]
    DanglingMaterialIndex {
        mesh: String,
        index: u32,
        material_count: usize,
    },

    #[error("Mesh '{mesh}': {array} has {actual} entries, expected {expected}")]
    VertexArrayLength {
        mesh: String,
        array: String,
        expected: usize,
        actual: usize,
    },

    #[error("Mesh '{mesh}': face {face} uses vertex {index}, but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        mesh: String,
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("Skeleton '{skeleton}': bone {bone} has parent {parent}, which is not another bone of the skeleton")]
    InvalidBoneParent {
        skeleton: String,
        bone: usize,
        parent: i32,
    },

    #[error("Texture '{texture}' declares {expected} pixels but holds {actual}")]
    TexturePixelCount {
        texture: String,
        expected: usize,
        actual: usize,
    },

    #[error("Metadata entry '{key}' is tagged {declared:?} but holds a {actual:?} value")]
    MetadataKindMismatch {
        key: String,
        declared: MetadataKind,
        actual: MetadataKind,
    },
}

impl Scene {
    /// Check every cross-reference and array length the exporter relies on.
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut stack: Vec<&Node> = vec![&self.root];
        while let Some(node) = stack.pop() {
            if let Some(&index) = node.meshes.iter().find(|&&i| i as usize >= self.meshes.len()) {
                return Err(ModelError::DanglingMeshIndex {
                    node: node.name.clone(),
                    index,
                    mesh_count: self.meshes.len(),
                });
            }
            if let Some(metadata) = &node.metadata {
                validate_metadata(metadata)?;
            }
            stack.extend(node.children.iter());
        }

        if let Some(metadata) = &self.metadata {
            validate_metadata(metadata)?;
        }

        for mesh in &self.meshes {
            if !self.materials.is_empty() && mesh.material_index as usize >= self.materials.len() {
                return Err(ModelError::DanglingMaterialIndex {
                    mesh: mesh.name.clone(),
                    index: mesh.material_index,
                    material_count: self.materials.len(),
                });
            }
            validate_mesh(mesh)?;
        }

        for skeleton in &self.skeletons {
            let bone_count = skeleton.bones.len() as i64;
            for (i, bone) in skeleton.bones.iter().enumerate() {
                let parent = i64::from(bone.parent);
                if parent < -1 || parent >= bone_count || parent == i as i64 {
                    return Err(ModelError::InvalidBoneParent {
                        skeleton: skeleton.name.clone(),
                        bone: i,
                        parent: bone.parent,
                    });
                }
            }
        }

        for texture in &self.textures {
            if let TexturePayload::Uncompressed {
                width,
                height,
                pixels,
            } = &texture.payload
            {
                let expected = *width as usize * *height as usize;
                if pixels.len() != expected {
                    return Err(ModelError::TexturePixelCount {
                        texture: texture.filename.clone(),
                        expected,
                        actual: pixels.len(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Every present value must match its declared tag, nested blocks included
fn validate_metadata(metadata: &Metadata) -> Result<(), ModelError> {
    let mut blocks = vec![metadata];
    while let Some(block) = blocks.pop() {
        for entry in &block.entries {
            let Some(value) = &entry.value else {
                continue;
            };
            if value.kind() != entry.kind {
                return Err(ModelError::MetadataKindMismatch {
                    key: entry.key.clone(),
                    declared: entry.kind,
                    actual: value.kind(),
                });
            }
            if let MetadataValue::Metadata(inner) = value {
                blocks.push(inner);
            }
        }
    }
    Ok(())
}

fn validate_mesh(mesh: &Mesh) -> Result<(), ModelError> {
    let vertex_count = mesh.vertices.len();
    let check = |array: &str, actual: usize| -> Result<(), ModelError> {
        if actual != vertex_count {
            return Err(ModelError::VertexArrayLength {
                mesh: mesh.name.clone(),
                array: array.to_owned(),
                expected: vertex_count,
                actual,
            });
        }
        Ok(())
    };

    check_optional_arrays(
        &check,
        "",
        [
            ("normals", mesh.normals.as_ref()),
            ("tangents", mesh.tangents.as_ref()),
            ("bitangents", mesh.bitangents.as_ref()),
        ],
    )?;
    check_channels(&check, "", &mesh.colors, &mesh.texture_coords)?;

    for (face_index, face) in mesh.faces.iter().enumerate() {
        if let Some(&index) = face.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(ModelError::FaceIndexOutOfRange {
                mesh: mesh.name.clone(),
                face: face_index,
                index,
                vertex_count,
            });
        }
    }

    for (i, anim_mesh) in mesh.anim_meshes.iter().enumerate() {
        validate_anim_mesh(&check, i, anim_mesh)?;
    }

    Ok(())
}

fn validate_anim_mesh<F>(check: &F, index: usize, anim_mesh: &AnimMesh) -> Result<(), ModelError>
where
    F: Fn(&str, usize) -> Result<(), ModelError>,
{
    let prefix = format!("anim_meshes[{index}].");
    check_optional_arrays(
        check,
        &prefix,
        [
            ("vertices", anim_mesh.vertices.as_ref()),
            ("normals", anim_mesh.normals.as_ref()),
            ("tangents", anim_mesh.tangents.as_ref()),
            ("bitangents", anim_mesh.bitangents.as_ref()),
        ],
    )?;
    check_channels(check, &prefix, &anim_mesh.colors, &anim_mesh.texture_coords)
}

fn check_optional_arrays<'a, F, T: 'a>(
    check: &F,
    prefix: &str,
    arrays: impl IntoIterator<Item = (&'static str, Option<&'a Vec<T>>)>,
) -> Result<(), ModelError>
where
    F: Fn(&str, usize) -> Result<(), ModelError>,
{
    for (name, array) in arrays {
        if let Some(array) = array {
            check(&format!("{prefix}{name}"), array.len())?;
        }
    }
    Ok(())
}

fn check_channels<F>(
    check: &F,
    prefix: &str,
    colors: &[Option<Vec<Color4>>],
    texture_coords: &[Option<UvChannel>],
) -> Result<(), ModelError>
where
    F: Fn(&str, usize) -> Result<(), ModelError>,
{
    for (i, channel) in colors.iter().enumerate() {
        if let Some(channel) = channel {
            check(&format!("{prefix}colors[{i}]"), channel.len())?;
        }
    }
    for (i, channel) in texture_coords.iter().enumerate() {
        if let Some(channel) = channel {
            check(&format!("{prefix}texture_coords[{i}]"), channel.coords.len())?;
        }
    }
    Ok(())
}
