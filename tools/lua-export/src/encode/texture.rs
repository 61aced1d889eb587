//! Embedded texture encoding
//!
//! Decoded textures are written as packed RGBA8 bytes with their size;
//! still-compressed textures carry the file bytes and the format hint only.

use std::io::{self, Write};

use scene_model::{Texture, TexturePayload};

use crate::lua::{LuaWriter, ToLua};

impl ToLua for Texture {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.open_block()?;
        w.field("filename", &self.filename)?;
        match &self.payload {
            TexturePayload::Uncompressed {
                width,
                height,
                pixels,
            } => {
                w.field("format", "rgba8")?;
                w.field("width", width)?;
                w.field("height", height)?;
                w.payload_fields(pixels.as_flattened())?;
            }
            TexturePayload::Compressed { format_hint, data } => {
                w.field("format", format_hint)?;
                w.payload_fields(data)?;
            }
        }
        w.close_block()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lua::{render, render_bytes};

    #[test]
    fn test_compressed_texture() {
        let texture = Texture::compressed("", "png", b"0123456789ab".to_vec());
        assert_eq!(
            render(&texture),
            "{\nfilename=\"\";\nformat=\"png\";\ndata_length=12;\ndata=[========[0123456789ab]========];\n}"
        );
    }

    #[test]
    fn test_rgba_texture_packs_pixels() {
        let texture = Texture::rgba8("tex.png", 2, 1, vec![[255, 0, 0, 255], [0, 0, 255, 128]]);
        let mut expected = b"{\nfilename=\"tex.png\";\nformat=\"rgba8\";\nwidth=2;\nheight=1;\ndata_length=8;\ndata=[========[".to_vec();
        expected.extend_from_slice(&[255, 0, 0, 255, 0, 0, 255, 128]);
        expected.extend_from_slice(b"]========];\n}");
        assert_eq!(render_bytes(&texture), expected);
    }

    #[test]
    fn test_compressed_texture_has_no_size() {
        let text = render(&Texture::compressed("a.jpg", "jpg", vec![1, 2, 3]));
        assert!(!text.contains("width="));
        assert!(!text.contains("height="));
    }

    #[test]
    fn test_payload_with_closing_delimiter() {
        let texture = Texture::compressed("x", "bin", b"a]========]b".to_vec());
        let text = render(&texture);
        assert!(text.contains("data=[=========[a]========]b]=========];"));
    }
}
