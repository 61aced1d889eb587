//! Material encoding
//!
//! A material is written as a key lookup followed by the properties
//! themselves: `["$clr.diffuse"]=0;` lines map each key to its 0-based
//! position in the positional part of the same table. When a key occurs
//! twice the later position wins, as with any repeated table key.

use std::io::{self, Write};

use scene_model::{Material, MaterialProperty, PropertyType, TextureSemantic};

use crate::lua::{LuaWriter, ToLua};

/// How consumers should decode a property's bytes
pub fn property_type_token(property_type: PropertyType) -> &'static str {
    match property_type {
        PropertyType::Float | PropertyType::Double | PropertyType::Integer => "number",
        PropertyType::String => "string",
        PropertyType::Buffer => "raw",
        PropertyType::Other(code) => {
            tracing::warn!("Unknown material property type {}, writing as raw", code);
            "raw"
        }
    }
}

pub fn texture_semantic_token(semantic: TextureSemantic) -> &'static str {
    match semantic {
        TextureSemantic::None => "none",
        TextureSemantic::Diffuse => "diffuse",
        TextureSemantic::Specular => "specular",
        TextureSemantic::Ambient => "ambient",
        TextureSemantic::Emissive => "emissive",
        TextureSemantic::Height => "height",
        TextureSemantic::Normals => "normals",
        TextureSemantic::Shininess => "shininess",
        TextureSemantic::Opacity => "opacity",
        TextureSemantic::Displacement => "displacement",
        TextureSemantic::Lightmap => "lightmap",
        TextureSemantic::Reflection => "reflection",
        TextureSemantic::BaseColor => "base_color",
        TextureSemantic::NormalCamera => "normal_camera",
        TextureSemantic::EmissionColor => "emission_color",
        TextureSemantic::Metalness => "metalness",
        TextureSemantic::DiffuseRoughness => "diffuse_roughness",
        TextureSemantic::AmbientOcclusion => "ambient_occlusion",
        TextureSemantic::Unknown => "unknown",
        TextureSemantic::Sheen => "sheen",
        TextureSemantic::Clearcoat => "clearcoat",
        TextureSemantic::Transmission => "transmission",
        TextureSemantic::Other(code) => {
            tracing::warn!("Unknown texture semantic {}, writing as none", code);
            "none"
        }
    }
}

impl ToLua for Material {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.open_block()?;
        for (i, property) in self.properties.iter().enumerate() {
            w.string_key(&property.key)?;
            w.value(&i)?;
            w.end_field()?;
        }
        for property in &self.properties {
            w.value(property)?;
            w.end_item()?;
        }
        w.close_block()
    }
}

impl ToLua for MaterialProperty {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.open_block()?;
        w.field("name", &self.key)?;
        w.field("index", &self.index)?;
        w.field("type", property_type_token(self.property_type))?;
        w.field("texture_type", texture_semantic_token(self.semantic))?;
        if !self.data.is_empty() {
            w.payload_fields(&self.data)?;
        }
        w.close_block()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lua::{render, render_bytes};

    #[test]
    fn test_type_tokens() {
        assert_eq!(property_type_token(PropertyType::Float), "number");
        assert_eq!(property_type_token(PropertyType::Double), "number");
        assert_eq!(property_type_token(PropertyType::Integer), "number");
        assert_eq!(property_type_token(PropertyType::String), "string");
        assert_eq!(property_type_token(PropertyType::Buffer), "raw");
        assert_eq!(property_type_token(PropertyType::Other(77)), "raw");
    }

    #[test]
    fn test_semantic_tokens() {
        assert_eq!(texture_semantic_token(TextureSemantic::BaseColor), "base_color");
        assert_eq!(
            texture_semantic_token(TextureSemantic::DiffuseRoughness),
            "diffuse_roughness"
        );
        assert_eq!(texture_semantic_token(TextureSemantic::Unknown), "unknown");
        assert_eq!(texture_semantic_token(TextureSemantic::Other(40)), "none");
        for code in 0..=21 {
            let token = texture_semantic_token(TextureSemantic::from_raw(code));
            assert_eq!(token == "none", code == 0, "code {code} -> {token}");
        }
    }

    #[test]
    fn test_single_float_property() {
        let material = Material::new(vec![MaterialProperty::floats("diffuseColor", &[1.0])]);
        let mut expected = b"{\n[\"diffuseColor\"]=0;\n\
            {\nname=\"diffuseColor\";\nindex=0;\ntype=\"number\";\ntexture_type=\"none\";\n\
            data_length=4;\ndata=[========["
            .to_vec();
        expected.extend_from_slice(&1.0f32.to_le_bytes());
        expected.extend_from_slice(b"]========];\n},\n}");
        assert_eq!(render_bytes(&material), expected);
    }

    #[test]
    fn test_lookup_precedes_properties() {
        let material = Material::new(vec![
            MaterialProperty::string("?mat.name", "steel"),
            MaterialProperty::floats("$mat.shininess", &[32.0]),
        ]);
        let text = render(&material);
        let lookup = text.find("[\"$mat.shininess\"]=1;").unwrap();
        let first_block = text.find("{\nname=").unwrap();
        assert!(text.starts_with("{\n[\"?mat.name\"]=0;\n"));
        assert!(lookup < first_block);
    }

    #[test]
    fn test_empty_data_has_no_payload() {
        let property = MaterialProperty::new("$tex.file", PropertyType::String, Vec::new());
        let text = render(&property);
        assert!(!text.contains("data_length"));
        assert!(!text.contains("data="));
    }
}
