//! Materials as ordered lists of typed properties

use serde::{Deserialize, Serialize};

/// Declared type of a material property's raw bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    Float,
    Double,
    String,
    Integer,
    Buffer,
    Other(u32),
}

impl PropertyType {
    pub fn from_raw(code: u32) -> Self {
        match code {
            1 => Self::Float,
            2 => Self::Double,
            3 => Self::String,
            4 => Self::Integer,
            5 => Self::Buffer,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> u32 {
        match self {
            Self::Float => 1,
            Self::Double => 2,
            Self::String => 3,
            Self::Integer => 4,
            Self::Buffer => 5,
            Self::Other(code) => code,
        }
    }
}

/// Texture slot a property belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextureSemantic {
    #[default]
    None,
    Diffuse,
    Specular,
    Ambient,
    Emissive,
    Height,
    Normals,
    Shininess,
    Opacity,
    Displacement,
    Lightmap,
    Reflection,
    BaseColor,
    NormalCamera,
    EmissionColor,
    Metalness,
    DiffuseRoughness,
    AmbientOcclusion,
    Unknown,
    Sheen,
    Clearcoat,
    Transmission,
    Other(u32),
}

impl TextureSemantic {
    const BY_CODE: [Self; 22] = [
        Self::None,
        Self::Diffuse,
        Self::Specular,
        Self::Ambient,
        Self::Emissive,
        Self::Height,
        Self::Normals,
        Self::Shininess,
        Self::Opacity,
        Self::Displacement,
        Self::Lightmap,
        Self::Reflection,
        Self::BaseColor,
        Self::NormalCamera,
        Self::EmissionColor,
        Self::Metalness,
        Self::DiffuseRoughness,
        Self::AmbientOcclusion,
        Self::Unknown,
        Self::Sheen,
        Self::Clearcoat,
        Self::Transmission,
    ];

    pub fn from_raw(code: u32) -> Self {
        Self::BY_CODE
            .get(code as usize)
            .copied()
            .unwrap_or(Self::Other(code))
    }

    pub fn code(self) -> u32 {
        match self {
            Self::Other(code) => code,
            known => Self::BY_CODE
                .iter()
                .position(|s| *s == known)
                .map(|p| p as u32)
                .unwrap_or_default(),
        }
    }
}

/// One material parameter.
///
/// `data` holds the value exactly as the import stage stored it; the encoder
/// never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperty {
    pub key: String,
    /// Texture index for texture-related properties, 0 otherwise
    #[serde(default)]
    pub index: u32,
    pub property_type: PropertyType,
    #[serde(default)]
    pub semantic: TextureSemantic,
    #[serde(default)]
    pub data: Vec<u8>,
}

impl MaterialProperty {
    pub fn new(key: impl Into<String>, property_type: PropertyType, data: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            index: 0,
            property_type,
            semantic: TextureSemantic::None,
            data,
        }
    }

    /// Float property stored as little-endian f32s
    pub fn floats(key: impl Into<String>, values: &[f32]) -> Self {
        let data = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        Self::new(key, PropertyType::Float, data)
    }

    /// String property stored as raw UTF-8 bytes
    pub fn string(key: impl Into<String>, value: &str) -> Self {
        Self::new(key, PropertyType::String, value.as_bytes().to_vec())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Material {
    pub properties: Vec<MaterialProperty>,
}

impl Material {
    pub fn new(properties: Vec<MaterialProperty>) -> Self {
        Self { properties }
    }

    /// Position of the last property with this key
    ///
    /// Matches what a table lookup built in property order would return.
    pub fn property_index(&self, key: &str) -> Option<usize> {
        self.properties.iter().rposition(|p| p.key == key)
    }

    pub fn property(&self, key: &str) -> Option<&MaterialProperty> {
        self.property_index(key).map(|i| &self.properties[i])
    }
}
