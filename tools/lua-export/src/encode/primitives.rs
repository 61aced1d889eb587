//! Math and color values as inline numeric arrays
//!
//! Matrices are written row by row (`a1, a2, a3, a4, b1, ...`), the order
//! consumers index them in, even though glam stores columns.

use std::io::{self, Write};

use scene_model::{Aabb, Color3, Color4, Mat3, Mat4, Quat, Vec2, Vec3};

use crate::lua::{LuaWriter, ToLua};

impl ToLua for Mat4 {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.inline_list((0..4).flat_map(|r| self.row(r).to_array()))
    }
}

impl ToLua for Mat3 {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.inline_list((0..3).flat_map(|r| self.row(r).to_array()))
    }
}

impl ToLua for Vec2 {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.inline_list(self.to_array())
    }
}

impl ToLua for Vec3 {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.inline_list(self.to_array())
    }
}

/// `{x, y, z, w}`
impl ToLua for Quat {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.inline_list([self.x, self.y, self.z, self.w])
    }
}

impl ToLua for Color3 {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.inline_list([self.r, self.g, self.b])
    }
}

impl ToLua for Color4 {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.inline_list([self.r, self.g, self.b, self.a])
    }
}

impl ToLua for Aabb {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.open_block()?;
        w.field("min", &self.min)?;
        w.field("max", &self.max)?;
        w.close_block()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lua::render;

    #[test]
    fn test_mat4_is_row_major() {
        let m = Mat4::from_cols_array_2d(&[
            [1.0, 5.0, 9.0, 13.0],
            [2.0, 6.0, 10.0, 14.0],
            [3.0, 7.0, 11.0, 15.0],
            [4.0, 8.0, 12.0, 16.0],
        ]);
        assert_eq!(
            render(&m),
            "{1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16}"
        );
    }

    #[test]
    fn test_translation_lands_in_last_column() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(
            render(&m),
            "{1, 0, 0, 1, 0, 1, 0, 2, 0, 0, 1, 3, 0, 0, 0, 1}"
        );
    }

    #[test]
    fn test_mat3_is_row_major() {
        let m = Mat3::from_cols_array(&[1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.0]);
        assert_eq!(render(&m), "{1, 2, 3, 4, 5, 6, 7, 8, 9}");
    }

    #[test]
    fn test_vectors_and_colors() {
        assert_eq!(render(&Vec2::new(0.5, -1.0)), "{0.5, -1}");
        assert_eq!(render(&Vec3::new(1.0, 2.5, -0.25)), "{1, 2.5, -0.25}");
        assert_eq!(render(&Quat::IDENTITY), "{0, 0, 0, 1}");
        assert_eq!(render(&Color3::new(1.0, 0.5, 0.0)), "{1, 0.5, 0}");
        assert_eq!(render(&Color4::WHITE), "{1, 1, 1, 1}");
    }

    #[test]
    fn test_f32_components_use_full_precision() {
        assert_eq!(render(&Vec3::new(0.1, 0.0, 0.0)), "{0.100000001490116, 0, 0}");
    }

    #[test]
    fn test_aabb() {
        let aabb = Aabb::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(render(&aabb), "{\nmin={-1, -2, -3};\nmax={1, 2, 3};\n}");
    }
}
