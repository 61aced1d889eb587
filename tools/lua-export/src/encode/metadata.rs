//! Metadata encoding
//!
//! A metadata block becomes a table keyed by `["key"]=`. Nested blocks recurse
//! through the same encoder, so very deep nesting uses proportional stack.

use std::io::{self, Write};

use scene_model::{Metadata, MetadataValue};

use crate::lua::{LuaWriter, ToLua};

impl ToLua for Metadata {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.open_block()?;
        for entry in &self.entries {
            w.string_key(&entry.key)?;
            // An entry without a payload is written as nil
            w.value(&entry.value)?;
            w.end_field()?;
        }
        w.close_block()
    }
}

impl ToLua for MetadataValue {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        match self {
            Self::Bool(v) => w.boolean(*v),
            Self::Int32(v) => w.integer(*v),
            Self::UInt64(v) => w.integer(*v),
            Self::Float(v) => w.number(f64::from(*v)),
            Self::Double(v) => w.number(*v),
            Self::String(v) => w.string(v),
            Self::Vector3(v) => w.value(v),
            Self::Metadata(inner) => w.value(inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lua::render;
    use scene_model::{MetadataKind, Vec3};

    #[test]
    fn test_every_value_kind() {
        let meta = Metadata::new()
            .with("flag", MetadataValue::Bool(true))
            .with("up", MetadataValue::Int32(-1))
            .with("frames", MetadataValue::UInt64(u64::MAX))
            .with("scale", MetadataValue::Float(0.5))
            .with("unit", MetadataValue::Double(0.01))
            .with("author", MetadataValue::from("a \"quoted\" name"))
            .with("origin", MetadataValue::Vector3(Vec3::new(1.0, 2.0, 3.0)));
        let expected = "{\n\
            [\"flag\"]=true;\n\
            [\"up\"]=-1;\n\
            [\"frames\"]=18446744073709551615;\n\
            [\"scale\"]=0.5;\n\
            [\"unit\"]=0.01;\n\
            [\"author\"]=\"a \\\"quoted\\\" name\";\n\
            [\"origin\"]={1, 2, 3};\n\
            }";
        assert_eq!(render(&meta), expected);
    }

    #[test]
    fn test_missing_payload_is_nil_for_every_tag() {
        let kinds = [
            MetadataKind::Bool,
            MetadataKind::Int32,
            MetadataKind::UInt64,
            MetadataKind::Float,
            MetadataKind::Double,
            MetadataKind::String,
            MetadataKind::Vector3,
            MetadataKind::Metadata,
        ];
        for kind in kinds {
            let meta = Metadata::new().with_null("x", kind);
            assert_eq!(render(&meta), "{\n[\"x\"]=nil;\n}", "{kind:?}");
        }
    }

    #[test]
    fn test_nested_metadata() {
        let inner = Metadata::new().with("k", MetadataValue::Int32(2));
        let meta = Metadata::new().with("inner", MetadataValue::Metadata(inner));
        assert_eq!(render(&meta), "{\n[\"inner\"]={\n[\"k\"]=2;\n};\n}");
    }

    #[test]
    fn test_empty_metadata() {
        assert_eq!(render(&Metadata::new()), "{\n}");
    }
}
