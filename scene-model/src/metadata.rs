//! Generic key/value metadata
//!
//! Values may themselves be metadata blocks. Nesting is by value, so a block
//! can never contain itself.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Type tag of a metadata value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetadataKind {
    Bool,
    Int32,
    UInt64,
    Float,
    Double,
    String,
    Vector3,
    Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetadataValue {
    Bool(bool),
    Int32(i32),
    UInt64(u64),
    Float(f32),
    Double(f64),
    String(String),
    Vector3(Vec3),
    Metadata(Metadata),
}

impl MetadataValue {
    pub fn kind(&self) -> MetadataKind {
        match self {
            Self::Bool(_) => MetadataKind::Bool,
            Self::Int32(_) => MetadataKind::Int32,
            Self::UInt64(_) => MetadataKind::UInt64,
            Self::Float(_) => MetadataKind::Float,
            Self::Double(_) => MetadataKind::Double,
            Self::String(_) => MetadataKind::String,
            Self::Vector3(_) => MetadataKind::Vector3,
            Self::Metadata(_) => MetadataKind::Metadata,
        }
    }
}

/// Key, declared type and value; `value` is `None` when the producer stored
/// no payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub key: String,
    pub kind: MetadataKind,
    pub value: Option<MetadataValue>,
}

/// Ordered metadata block. Keys are expected to be unique but this is not
/// enforced.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metadata {
    pub entries: Vec<MetadataEntry>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, builder style. The type tag follows the value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        let value = value.into();
        self.entries.push(MetadataEntry {
            key: key.into(),
            kind: value.kind(),
            value: Some(value),
        });
        self
    }

    /// Append an entry that declares a type but carries no payload
    pub fn with_null(mut self, key: impl Into<String>, kind: MetadataKind) -> Self {
        self.entries.push(MetadataEntry {
            key: key.into(),
            kind,
            value: None,
        });
        self
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .and_then(|e| e.value.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<bool> for MetadataValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for MetadataValue {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<u64> for MetadataValue {
    fn from(v: u64) -> Self {
        Self::UInt64(v)
    }
}

impl From<f32> for MetadataValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for MetadataValue {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for MetadataValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for MetadataValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec3> for MetadataValue {
    fn from(v: Vec3) -> Self {
        Self::Vector3(v)
    }
}

impl From<Metadata> for MetadataValue {
    fn from(v: Metadata) -> Self {
        Self::Metadata(v)
    }
}
