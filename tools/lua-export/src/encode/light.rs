//! Lights and cameras
//!
//! Only a named placeholder is written so consumers can tell that the source
//! had these entities without a schema being invented for them.

use std::io::{self, Write};

use scene_model::{Camera, Light};

use crate::lua::{LuaWriter, ToLua};

fn write_placeholder<W: Write>(w: &mut LuaWriter<W>, name: &str) -> io::Result<()> {
    w.open_block()?;
    w.field("name", name)?;
    w.field("unsupported", &true)?;
    w.close_block()
}

impl ToLua for Light {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        write_placeholder(w, &self.name)
    }
}

impl ToLua for Camera {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        write_placeholder(w, &self.name)
    }
}
