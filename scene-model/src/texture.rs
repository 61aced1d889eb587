//! Embedded textures

use serde::{Deserialize, Serialize};

/// Pixel data of an embedded texture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TexturePayload {
    /// Decoded RGBA8 image, `width × height` pixels in row order
    Uncompressed {
        width: u32,
        height: u32,
        pixels: Vec<[u8; 4]>,
    },
    /// Still-encoded file contents (e.g. "png", "jpg")
    Compressed { format_hint: String, data: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Texture {
    /// Original file name, may be empty for purely embedded textures
    #[serde(default)]
    pub filename: String,
    pub payload: TexturePayload,
}

impl Texture {
    pub fn rgba8(filename: impl Into<String>, width: u32, height: u32, pixels: Vec<[u8; 4]>) -> Self {
        Self {
            filename: filename.into(),
            payload: TexturePayload::Uncompressed {
                width,
                height,
                pixels,
            },
        }
    }

    pub fn compressed(
        filename: impl Into<String>,
        format_hint: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            payload: TexturePayload::Compressed {
                format_hint: format_hint.into(),
                data,
            },
        }
    }
}

