//! Scene root and node list
//!
//! The node hierarchy is flattened first. Nodes are then written in
//! breadth-first order with `parent` and `children` given as positions in
//! that list; every other entity list keeps the scene's own order, so mesh
//! and material indices stay valid unchanged.

use std::io::{self, Write};

use scene_model::{Scene, SceneFlags};

use crate::flatten::FlattenedTree;
use crate::lua::{LuaWriter, ToLua};

impl ToLua for SceneFlags {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.open_block()?;
        w.field("incomplete", &self.contains(Self::INCOMPLETE))?;
        w.field("validated", &self.contains(Self::VALIDATED))?;
        w.field("warning", &self.contains(Self::VALIDATION_WARNING))?;
        w.field("nonverbose", &self.contains(Self::NON_VERBOSE_FORMAT))?;
        w.field("terrain", &self.contains(Self::TERRAIN))?;
        w.field("allow_shared", &self.contains(Self::ALLOW_SHARED))?;
        w.close_block()
    }
}

/// Write node `i` of `tree`
pub fn write_node<W: Write>(w: &mut LuaWriter<W>, tree: &FlattenedTree, i: usize) -> io::Result<()> {
    let node = tree.node(i);
    w.open_block()?;
    w.field("name", &node.name)?;
    w.field("transform", &node.transform)?;
    if let Some(metadata) = &node.metadata {
        w.field("metadata", metadata)?;
    }
    w.inline_field("meshes", &node.meshes)?;
    if let Some(parent) = tree.parent(i) {
        w.field("parent", &parent)?;
    }
    w.inline_field("children", tree.children(i))?;
    w.close_block()
}

impl ToLua for Scene {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        let tree = FlattenedTree::new(&self.root);
        tracing::debug!(
            "Encoding scene {:?}: {} nodes, {} meshes, {} materials, {} textures, {} animations, {} skeletons",
            self.name,
            tree.len(),
            self.meshes.len(),
            self.materials.len(),
            self.textures.len(),
            self.animations.len(),
            self.skeletons.len()
        );
        if !self.lights.is_empty() || !self.cameras.is_empty() {
            tracing::warn!(
                "Scene {:?} has {} lights and {} cameras; writing unsupported placeholders",
                self.name,
                self.lights.len(),
                self.cameras.len()
            );
        }

        w.open_block()?;
        w.field("name", &self.name)?;
        w.field("flags", &self.flags)?;

        w.key("nodes")?;
        w.open_block()?;
        for i in 0..tree.len() {
            write_node(w, &tree, i)?;
            w.end_item()?;
        }
        w.close_block()?;
        w.end_field()?;

        w.list_field("meshes", &self.meshes)?;
        w.list_field("materials", &self.materials)?;
        w.list_field("textures", &self.textures)?;
        w.list_field("skeletons", &self.skeletons)?;
        w.list_field("animations", &self.animations)?;
        w.list_field("lights", &self.lights)?;
        w.list_field("cameras", &self.cameras)?;
        if let Some(metadata) = &self.metadata {
            w.field("metadata", metadata)?;
        }
        w.close_block()
    }
}
