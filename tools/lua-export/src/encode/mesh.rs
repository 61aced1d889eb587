//! Mesh encoding
//!
//! Channel lists (vertex colors, texture coordinates) keep one entry per
//! channel slot. Empty slots are written as `false` so the position of every
//! filled slot still matches its channel number.

use std::io::{self, Write};

use scene_model::{AnimMesh, Color4, Face, Mesh, PrimitiveTypes, UvChannel, Vec3};

use crate::lua::{LuaWriter, ToLua};

impl ToLua for Mesh {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.open_block()?;
        w.field("name", &self.name)?;
        w.field("aabb", &self.aabb)?;
        w.field("primitives", &self.primitive_types)?;
        if !self.anim_meshes.is_empty() {
            w.list_field("anim_meshes", &self.anim_meshes)?;
        }
        if !self.bones.is_empty() {
            w.list_field("bones", &self.bones)?;
        }
        if !self.colors.is_empty() {
            color_channels_field(w, &self.colors)?;
        }
        w.list_field("faces", &self.faces)?;
        w.field("material_index", &self.material_index)?;
        w.field("morph_method", &self.morph_method.code())?;
        optional_vectors_field(w, "normals", self.normals.as_deref())?;
        optional_vectors_field(w, "tangents", self.tangents.as_deref())?;
        optional_vectors_field(w, "bitangents", self.bitangents.as_deref())?;
        if !self.texture_coords.is_empty() {
            uv_channels_field(w, &self.texture_coords)?;
        }
        w.list_field("vertices", &self.vertices)?;
        w.close_block()
    }
}

/// Morph target; every array is optional
impl ToLua for AnimMesh {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.open_block()?;
        w.field("name", &self.name)?;
        w.field("weight", &self.weight)?;
        if !self.colors.is_empty() {
            color_channels_field(w, &self.colors)?;
        }
        optional_vectors_field(w, "normals", self.normals.as_deref())?;
        optional_vectors_field(w, "tangents", self.tangents.as_deref())?;
        optional_vectors_field(w, "bitangents", self.bitangents.as_deref())?;
        if !self.texture_coords.is_empty() {
            uv_channels_field(w, &self.texture_coords)?;
        }
        optional_vectors_field(w, "vertices", self.vertices.as_deref())?;
        w.close_block()
    }
}

/// `{i, j, k}`
impl ToLua for Face {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.inline_list(&self.indices)
    }
}

impl ToLua for PrimitiveTypes {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.open_block()?;
        w.field("point", &self.contains(Self::POINT))?;
        w.field("line", &self.contains(Self::LINE))?;
        w.field("triangle", &self.contains(Self::TRIANGLE))?;
        w.field("polygon", &self.contains(Self::POLYGON))?;
        w.field("ngon_encoded", &self.contains(Self::NGON_ENCODING))?;
        w.close_block()
    }
}

/// Optional name and component count, then one coordinate per vertex
impl ToLua for UvChannel {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.open_block()?;
        if let Some(name) = &self.name {
            w.field("name", name)?;
        }
        w.field("components", &self.components)?;
        for coord in &self.coords {
            if self.components <= 2 {
                w.value(&coord.truncate())?;
            } else {
                w.value(coord)?;
            }
            w.end_item()?;
        }
        w.close_block()
    }
}

fn optional_vectors_field<W: Write>(
    w: &mut LuaWriter<W>,
    name: &str,
    vectors: Option<&[Vec3]>,
) -> io::Result<()> {
    match vectors {
        Some(vectors) => w.list_field(name, vectors),
        None => Ok(()),
    }
}

/// Write one block entry per slot, `false` for empty slots
fn channel_slots<W, T>(
    w: &mut LuaWriter<W>,
    name: &str,
    slots: &[Option<T>],
    mut write_slot: impl FnMut(&mut LuaWriter<W>, &T) -> io::Result<()>,
) -> io::Result<()>
where
    W: Write,
{
    w.key(name)?;
    w.open_block()?;
    for slot in slots {
        match slot {
            Some(channel) => write_slot(w, channel)?,
            None => w.boolean(false)?,
        }
        w.end_item()?;
    }
    w.close_block()?;
    w.end_field()
}

fn color_channels_field<W: Write>(
    w: &mut LuaWriter<W>,
    channels: &[Option<Vec<Color4>>],
) -> io::Result<()> {
    channel_slots(w, "color_channels", channels, |w, colors| {
        w.block_list(colors)
    })
}

fn uv_channels_field<W: Write>(
    w: &mut LuaWriter<W>,
    channels: &[Option<UvChannel>],
) -> io::Result<()> {
    channel_slots(w, "texture_coords", channels, |w, channel| w.value(channel))
}
