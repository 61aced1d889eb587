//! lua-export library
//!
//! Writes a [`Scene`] as a single Lua document: `return ` followed by one
//! table constructor holding the whole scene. Loading the file with any Lua
//! interpreter yields the scene as nested tables; nothing else is executed.
//!
//! # Modules
//!
//! - [`flatten`] - Breadth-first node indexing
//! - [`encode`] - One encoder per entity kind
//! - [`lua`] - Output writer, number and string literals, document reader
//! - [`config`] - Export settings loaded from TOML
//! - [`error`] - Error types

pub mod config;
pub mod encode;
pub mod error;
pub mod flatten;
pub mod lua;

use std::io::Write;

use scene_model::Scene;

pub use config::ExportConfig;
pub use error::{ConfigError, ExportError};
pub use flatten::FlattenedTree;
pub use lua::reader::{parse_document, LuaTable, LuaValue, ParseError};
pub use lua::{LuaWriter, ToLua};

/// Text written before the scene table
pub const DOCUMENT_PREFIX: &str = "return ";

/// Export `scene` into `sink` and hand the sink back once flushed.
///
/// On error the sink may hold a partial document.
pub fn export_scene<W: Write>(
    sink: W,
    scene: &Scene,
    config: &ExportConfig,
) -> Result<W, ExportError> {
    if config.validate {
        scene.validate()?;
    }

    let mut w = LuaWriter::new(sink, config);
    w.raw(DOCUMENT_PREFIX)?;
    w.value(scene)?;
    w.raw("\n")?;
    w.flush()?;
    Ok(w.into_inner())
}

/// Export `scene` into a new buffer
pub fn export_scene_to_vec(scene: &Scene, config: &ExportConfig) -> Result<Vec<u8>, ExportError> {
    let out = export_scene(Vec::new(), scene, config)?;
    tracing::debug!("Exported scene {:?} ({} bytes)", scene.name, out.len());
    Ok(out)
}
