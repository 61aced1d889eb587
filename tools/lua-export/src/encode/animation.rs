//! Animation encoding
//!
//! Key tracks are split into a time list and a value list of equal length,
//! e.g. `position_times` and `position_keys`.

use std::io::{self, Write};

use scene_model::{AnimBehaviour, Animation, MeshAnim, MeshMorphAnim, NodeAnim};

use crate::lua::{LuaWriter, ToLua};

/// Token for out-of-range behaviour
pub fn behaviour_token(behaviour: AnimBehaviour) -> &'static str {
    match behaviour {
        AnimBehaviour::Default => "default",
        AnimBehaviour::Constant => "constant",
        AnimBehaviour::Linear => "linear",
        AnimBehaviour::Repeat => "repeat",
        AnimBehaviour::Other(code) => {
            tracing::warn!("Unknown animation behaviour {}, writing as default", code);
            "default"
        }
    }
}

impl ToLua for Animation {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.open_block()?;
        w.field("name", &self.name)?;
        w.field("duration", &self.duration)?;
        w.field("fps", &self.ticks_per_second)?;
        w.list_field("node_anims", &self.channels)?;
        w.list_field("mesh_anims", &self.mesh_channels)?;
        w.list_field("morph_mesh_anims", &self.morph_mesh_channels)?;
        w.close_block()
    }
}

impl ToLua for NodeAnim {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.open_block()?;
        w.field("node_name", &self.node_name)?;
        w.field("pre_state", behaviour_token(self.pre_state))?;
        w.field("post_state", behaviour_token(self.post_state))?;
        w.list_field("position_times", self.position_keys.iter().map(|k| k.time))?;
        w.list_field("position_keys", self.position_keys.iter().map(|k| k.value))?;
        w.list_field("rotation_times", self.rotation_keys.iter().map(|k| k.time))?;
        w.list_field("rotation_keys", self.rotation_keys.iter().map(|k| k.value))?;
        w.list_field("scale_times", self.scaling_keys.iter().map(|k| k.time))?;
        w.list_field("scale_keys", self.scaling_keys.iter().map(|k| k.value))?;
        w.close_block()
    }
}

impl ToLua for MeshAnim {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.open_block()?;
        w.field("mesh_name", &self.name)?;
        w.list_field("times", self.keys.iter().map(|k| k.time))?;
        w.list_field("keys", self.keys.iter().map(|k| k.value))?;
        w.close_block()
    }
}

/// Each key lists a variable number of targets, so values and weights are
/// written as one inline array per key.
impl ToLua for MeshMorphAnim {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.open_block()?;
        w.field("mesh_name", &self.name)?;
        w.list_field("times", self.keys.iter().map(|k| k.time))?;

        w.key("value_keys")?;
        w.open_block()?;
        for key in &self.keys {
            w.inline_list(key.targets.iter().map(|t| t.value))?;
            w.end_item()?;
        }
        w.close_block()?;
        w.end_field()?;

        w.key("weight_keys")?;
        w.open_block()?;
        for key in &self.keys {
            w.inline_list(key.targets.iter().map(|t| t.weight))?;
            w.end_item()?;
        }
        w.close_block()?;
        w.end_field()?;

        w.close_block()
    }
}
