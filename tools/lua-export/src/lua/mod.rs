//! Lua table-literal output
//!
//! [`LuaWriter`] owns the output sink and is passed by `&mut` through every
//! encoder; nothing is buffered beyond what the sink itself buffers, so a
//! document is produced in one forward pass.
//!
//! Layout conventions used by all encoders:
//! - record blocks are `{` newline, then `key=value;` lines, then `}`
//! - sequences of records are `{` newline, then `value,` lines, then `}`
//! - short numeric sequences are inline: `{1, 2, 3}`

pub mod literal;
pub mod number;
pub mod reader;

use std::io::{self, Write};

use crate::config::ExportConfig;
use literal::{quote, LongBracket};

const NL: &str = "\n";

/// Types that can be written as a table-literal value
pub trait ToLua {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()>;
}

/// Forward-only writer for table-literal documents
pub struct LuaWriter<W: Write> {
    sink: W,
    precision: usize,
    long_bracket_level: usize,
}

impl<W: Write> LuaWriter<W> {
    pub fn new(sink: W, config: &ExportConfig) -> Self {
        Self {
            sink,
            precision: config.precision(),
            long_bracket_level: config.long_bracket_level,
        }
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }

    /// Write text as-is
    pub fn raw(&mut self, text: &str) -> io::Result<()> {
        self.sink.write_all(text.as_bytes())
    }

    pub fn open_block(&mut self) -> io::Result<()> {
        self.raw("{")?;
        self.raw(NL)
    }

    pub fn close_block(&mut self) -> io::Result<()> {
        self.raw("}")
    }

    /// `name=`; `name` must be a valid identifier
    pub fn key(&mut self, name: &str) -> io::Result<()> {
        self.raw(name)?;
        self.raw("=")
    }

    /// `["any text"]=`
    pub fn string_key(&mut self, key: &str) -> io::Result<()> {
        self.raw("[")?;
        self.string(key)?;
        self.raw("]=")
    }

    pub fn end_field(&mut self) -> io::Result<()> {
        self.raw(";")?;
        self.raw(NL)
    }

    pub fn end_item(&mut self) -> io::Result<()> {
        self.raw(",")?;
        self.raw(NL)
    }

    pub fn nil(&mut self) -> io::Result<()> {
        self.raw("nil")
    }

    pub fn boolean(&mut self, value: bool) -> io::Result<()> {
        self.raw(if value { "true" } else { "false" })
    }

    pub fn integer(&mut self, value: impl Into<i128>) -> io::Result<()> {
        write!(self.sink, "{}", value.into())
    }

    pub fn number(&mut self, value: f64) -> io::Result<()> {
        let text = number::format_float(value, self.precision);
        self.raw(&text)
    }

    pub fn string(&mut self, value: &str) -> io::Result<()> {
        self.sink.write_all(&quote(value.as_bytes()))
    }

    /// Raw bytes inside a long bracket
    pub fn long_string(&mut self, payload: &[u8]) -> io::Result<()> {
        let bracket = LongBracket::for_payload(payload, self.long_bracket_level);
        if bracket.level != self.long_bracket_level {
            tracing::debug!(
                "Raised long bracket level to {} for a {}-byte payload",
                bracket.level,
                payload.len()
            );
        }
        self.sink.write_all(&bracket.open())?;
        self.sink.write_all(LongBracket::leading_padding(payload))?;
        self.sink.write_all(payload)?;
        self.sink.write_all(&bracket.close())
    }

    pub fn value<T: ToLua + ?Sized>(&mut self, value: &T) -> io::Result<()> {
        value.write_lua(self)
    }

    /// `name=value;`
    pub fn field<T: ToLua + ?Sized>(&mut self, name: &str, value: &T) -> io::Result<()> {
        self.key(name)?;
        value.write_lua(self)?;
        self.end_field()
    }

    /// `data_length=N;` followed by `data=[==[...]==];`
    pub fn payload_fields(&mut self, payload: &[u8]) -> io::Result<()> {
        self.field("data_length", &payload.len())?;
        self.key("data")?;
        self.long_string(payload)?;
        self.end_field()
    }

    /// `{a, b, c}`
    pub fn inline_list<I>(&mut self, items: I) -> io::Result<()>
    where
        I: IntoIterator,
        I::Item: ToLua,
    {
        self.raw("{")?;
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.raw(", ")?;
            }
            item.write_lua(self)?;
        }
        self.raw("}")
    }

    /// One item per line
    pub fn block_list<I>(&mut self, items: I) -> io::Result<()>
    where
        I: IntoIterator,
        I::Item: ToLua,
    {
        self.open_block()?;
        for item in items {
            item.write_lua(self)?;
            self.end_item()?;
        }
        self.close_block()
    }

    pub fn inline_field<I>(&mut self, name: &str, items: I) -> io::Result<()>
    where
        I: IntoIterator,
        I::Item: ToLua,
    {
        self.key(name)?;
        self.inline_list(items)?;
        self.end_field()
    }

    pub fn list_field<I>(&mut self, name: &str, items: I) -> io::Result<()>
    where
        I: IntoIterator,
        I::Item: ToLua,
    {
        self.key(name)?;
        self.block_list(items)?;
        self.end_field()
    }
}

impl<T: ToLua + ?Sized> ToLua for &T {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        (**self).write_lua(w)
    }
}

/// `None` is written as `nil`
impl<T: ToLua> ToLua for Option<T> {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        match self {
            Some(value) => value.write_lua(w),
            None => w.nil(),
        }
    }
}

impl ToLua for bool {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.boolean(*self)
    }
}

impl ToLua for str {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.string(self)
    }
}

impl ToLua for String {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.string(self)
    }
}

impl ToLua for f32 {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.number(f64::from(*self))
    }
}

impl ToLua for f64 {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        w.number(*self)
    }
}

macro_rules! impl_to_lua_integer {
    ($($ty:ty),*) => {
        $(
            impl ToLua for $ty {
                fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
                    w.integer(*self)
                }
            }
        )*
    };
}

impl_to_lua_integer!(u8, u16, u32, u64, i32, i64);

// usize has no Into<i128>, so it stays out of the macro
impl ToLua for usize {
    fn write_lua<W: Write>(&self, w: &mut LuaWriter<W>) -> io::Result<()> {
        write!(w.sink, "{self}")
    }
}

#[cfg(test)]
pub(crate) fn render_bytes<T: ToLua + ?Sized>(value: &T) -> Vec<u8> {
    let mut w = LuaWriter::new(Vec::new(), &ExportConfig::default());
    value.write_lua(&mut w).unwrap();
    w.into_inner()
}

#[cfg(test)]
pub(crate) fn render<T: ToLua + ?Sized>(value: &T) -> String {
    String::from_utf8(render_bytes(value)).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(render(&true), "true");
        assert_eq!(render(&42u32), "42");
        assert_eq!(render(&-7i32), "-7");
        assert_eq!(render(&u64::MAX), "18446744073709551615");
        assert_eq!(render(&0.5f32), "0.5");
        assert_eq!(render("a\"b"), "\"a\\\"b\"");
        assert_eq!(render(&None::<u32>), "nil");
        assert_eq!(render(&Some(3usize)), "3");
    }

    #[test]
    fn test_lists() {
        let mut w = LuaWriter::new(Vec::new(), &ExportConfig::default());
        w.inline_field("children", [1usize, 2]).unwrap();
        w.inline_field("meshes", Vec::<u32>::new()).unwrap();
        w.list_field("times", [0.0f64, 1.5]).unwrap();
        let text = String::from_utf8(w.into_inner()).unwrap();
        assert_eq!(text, "children={1, 2};\nmeshes={};\ntimes={\n0,\n1.5,\n};\n");
    }

    #[test]
    fn test_payload_fields() {
        let mut w = LuaWriter::new(Vec::new(), &ExportConfig::default());
        w.payload_fields(b"\x00\xffab").unwrap();
        let bytes = w.into_inner();
        assert_eq!(bytes, b"data_length=4;\ndata=[========[\x00\xffab]========];\n");
    }

    #[test]
    fn test_precision_from_config() {
        let config = ExportConfig {
            float_precision: 17,
            ..Default::default()
        };
        let mut w = LuaWriter::new(Vec::new(), &config);
        w.number(0.1).unwrap();
        assert_eq!(w.into_inner(), b"0.10000000000000001");
    }
}
