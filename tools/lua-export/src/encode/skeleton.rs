//! Bone and skeleton encoding
//!
//! Vertex weights are written as two parallel inline arrays: vertex indices
//! and weights.

use std::io::{self, Write};

use scene_model::{Bone, Skeleton, SkeletonBone};

use crate::lua::{LuaWriter, ToLua};

impl ToLua for Bone {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.open_block()?;
        w.field("name", &self.name)?;
        w.field("offset", &self.offset_matrix)?;
        w.inline_field("weight_idxs", self.weights.iter().map(|v| v.vertex_id))?;
        w.inline_field("weights", self.weights.iter().map(|v| v.weight))?;
        w.close_block()
    }
}

impl ToLua for Skeleton {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.open_block()?;
        w.field("name", &self.name)?;
        w.list_field("bones", &self.bones)?;
        w.close_block()
    }
}

impl ToLua for SkeletonBone {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.open_block()?;
        w.field("parent", &self.parent)?;
        w.field("matrix", &self.local_matrix)?;
        w.field("offset", &self.offset_matrix)?;
        w.inline_field("vertex_ids", self.weights.iter().map(|v| v.vertex_id))?;
        w.inline_field("weights", self.weights.iter().map(|v| v.weight))?;
        w.close_block()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lua::render;
    use scene_model::{Mat4, Vec3, VertexWeight};

    const IDENTITY: &str = "{1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1}";

    #[test]
    fn test_mesh_bone() {
        let bone = Bone {
            name: "spine".into(),
            offset_matrix: Mat4::IDENTITY,
            weights: vec![VertexWeight::new(0, 0.5), VertexWeight::new(7, 1.0)],
        };
        assert_eq!(
            render(&bone),
            format!(
                "{{\nname=\"spine\";\noffset={IDENTITY};\nweight_idxs={{0, 7}};\nweights={{0.5, 1}};\n}}"
            )
        );
    }

    #[test]
    fn test_skeleton_bones_keep_parent_indices() {
        let skeleton = Skeleton {
            name: "rig".into(),
            bones: vec![
                SkeletonBone::default(),
                SkeletonBone {
                    parent: 0,
                    local_matrix: Mat4::from_translation(Vec3::Y),
                    ..Default::default()
                },
            ],
        };
        let text = render(&skeleton);
        assert!(text.starts_with("{\nname=\"rig\";\nbones={\n{\nparent=-1;\n"));
        assert!(text.contains("parent=0;\nmatrix={1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 1, 0, 0, 0, 0, 1};\n"));
        assert!(text.contains("vertex_ids={};\nweights={};\n"));
    }
}
