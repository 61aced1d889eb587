//! Reader for table-literal documents
//!
//! Parses the constructor subset the exporter writes: one optional `return`,
//! then a single expression made of tables, strings, numbers, booleans, `nil`
//! and parenthesized constant divisions such as `(1/0)`. It is used to check
//! exported files and in round-trip tests; it is not a general interpreter.
//!
//! Long-bracket strings are read the way Lua reads them: the first line break
//! after the opener is dropped, and every `\n`, `\r`, `\r\n` or `\n\r` in the
//! body becomes a single `\n`. Payloads holding `\r` bytes therefore do not
//! come back unchanged, here or in any Lua consumer.

use hashbrown::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("Unexpected {found:?} at byte {offset}, expected {expected}")]
    Unexpected {
        offset: usize,
        found: char,
        expected: &'static str,
    },

    #[error("Unterminated string starting at byte {offset}")]
    UnterminatedString { offset: usize },

    #[error("Unterminated long bracket starting at byte {offset}")]
    UnterminatedLongBracket { offset: usize },

    #[error("Invalid escape sequence at byte {offset}")]
    InvalidEscape { offset: usize },

    #[error("Malformed number '{text}' at byte {offset}")]
    InvalidNumber { offset: usize, text: String },

    #[error("Only string keys are supported in brackets (byte {offset})")]
    UnsupportedKey { offset: usize },

    #[error("Trailing input at byte {offset}")]
    TrailingInput { offset: usize },
}

/// A parsed value
#[derive(Debug, Clone, PartialEq)]
pub enum LuaValue {
    Nil,
    Bool(bool),
    Integer(i64),
    Number(f64),
    /// Raw bytes; strings are not required to be UTF-8
    String(Vec<u8>),
    Table(LuaTable),
}

/// Table with its positional part and named part kept apart
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LuaTable {
    /// Positional items in order, starting at Lua index 1
    pub array: Vec<LuaValue>,
    /// `name=` and `["key"]=` fields; a repeated key keeps its last value
    pub fields: HashMap<String, LuaValue>,
}

static NIL: LuaValue = LuaValue::Nil;

impl LuaTable {
    /// Named field, `nil` when absent
    pub fn get(&self, key: &str) -> &LuaValue {
        self.fields.get(key).unwrap_or(&NIL)
    }

    /// Positional item (0-based), `nil` when out of range
    pub fn index(&self, i: usize) -> &LuaValue {
        self.array.get(i).unwrap_or(&NIL)
    }

    pub fn len(&self) -> usize {
        self.array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.array.is_empty() && self.fields.is_empty()
    }
}

impl LuaValue {
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Numeric value; integers are widened
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Integer value; floats with an exact integer value are accepted
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 9.2e18 => Some(*n as i64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::String(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn as_table(&self) -> Option<&LuaTable> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Shorthand for `as_table().map(|t| t.get(key))`, `nil` for non-tables
    pub fn get(&self, key: &str) -> &LuaValue {
        self.as_table().map_or(&NIL, |t| t.get(key))
    }

    /// Shorthand for positional access, `nil` for non-tables
    pub fn index(&self, i: usize) -> &LuaValue {
        self.as_table().map_or(&NIL, |t| t.index(i))
    }
}

/// Parse a whole document, with or without a leading `return`
pub fn parse_document(input: &[u8]) -> Result<LuaValue, ParseError> {
    let mut parser = Parser { input, pos: 0 };
    parser.skip_trivia()?;
    if parser.peek_keyword("return") {
        parser.pos += "return".len();
        parser.skip_trivia()?;
    }
    let value = parser.value()?;
    parser.skip_trivia()?;
    if parser.pos < input.len() {
        return Err(ParseError::TrailingInput { offset: parser.pos });
    }
    Ok(value)
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.input.get(self.pos + ahead).copied()
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        match self.peek() {
            Some(b) => ParseError::Unexpected {
                offset: self.pos,
                found: b as char,
                expected,
            },
            None => ParseError::UnexpectedEof { expected },
        }
    }

    fn expect(&mut self, byte: u8, expected: &'static str) -> Result<(), ParseError> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// `word` at the cursor, not followed by an identifier character
    fn peek_keyword(&self, word: &str) -> bool {
        self.input[self.pos..].starts_with(word.as_bytes())
            && !self
                .input
                .get(self.pos + word.len())
                .is_some_and(|&b| is_ident_byte(b))
    }

    /// Whitespace and comments
    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c') => self.pos += 1,
                Some(b'-') if self.peek_at(1) == Some(b'-') => {
                    self.pos += 2;
                    if self.peek() == Some(b'[') && self.long_bracket_level().is_some() {
                        self.long_bracket()?;
                    } else {
                        while !matches!(self.peek(), None | Some(b'\n')) {
                            self.pos += 1;
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn value(&mut self) -> Result<LuaValue, ParseError> {
        match self.peek() {
            Some(b'{') => self.table().map(LuaValue::Table),
            Some(b'"' | b'\'') => self.short_string().map(LuaValue::String),
            Some(b'[') if self.long_bracket_level().is_some() => {
                self.long_bracket().map(LuaValue::String)
            }
            Some(b'(') => self.division(),
            Some(b'-' | b'.' | b'0'..=b'9') => self.number(),
            Some(_) if self.peek_keyword("true") => {
                self.pos += 4;
                Ok(LuaValue::Bool(true))
            }
            Some(_) if self.peek_keyword("false") => {
                self.pos += 5;
                Ok(LuaValue::Bool(false))
            }
            Some(_) if self.peek_keyword("nil") => {
                self.pos += 3;
                Ok(LuaValue::Nil)
            }
            _ => Err(self.unexpected("a value")),
        }
    }

    fn table(&mut self) -> Result<LuaTable, ParseError> {
        self.expect(b'{', "'{'")?;
        let mut table = LuaTable::default();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(b'}') {
                self.pos += 1;
                return Ok(table);
            }

            match self.field_key()? {
                Some(key) => {
                    self.skip_trivia()?;
                    let value = self.value()?;
                    table.fields.insert(key, value);
                }
                None => table.array.push(self.value()?),
            }

            self.skip_trivia()?;
            match self.peek() {
                Some(b',' | b';') => self.pos += 1,
                Some(b'}') => {}
                _ => return Err(self.unexpected("',', ';' or '}'")),
            }
        }
    }

    /// Consume `name =` or `["key"] =` if present
    fn field_key(&mut self) -> Result<Option<String>, ParseError> {
        let start = self.pos;
        match self.peek() {
            Some(b'[') if self.long_bracket_level().is_none() => {
                self.pos += 1;
                self.skip_trivia()?;
                let key = match self.peek() {
                    Some(b'"' | b'\'') => self.short_string()?,
                    Some(b'[') if self.long_bracket_level().is_some() => self.long_bracket()?,
                    _ => return Err(ParseError::UnsupportedKey { offset: start }),
                };
                self.skip_trivia()?;
                self.expect(b']', "']'")?;
                self.skip_trivia()?;
                self.expect(b'=', "'='")?;
                Ok(Some(String::from_utf8_lossy(&key).into_owned()))
            }
            Some(b) if b.is_ascii_alphabetic() || b == b'_' => {
                let mut end = self.pos;
                while self.input.get(end).is_some_and(|&b| is_ident_byte(b)) {
                    end += 1;
                }
                let ident = &self.input[self.pos..end];
                self.pos = end;
                self.skip_trivia()?;
                if self.peek() == Some(b'=') && self.peek_at(1) != Some(b'=') {
                    self.pos += 1;
                    Ok(Some(String::from_utf8_lossy(ident).into_owned()))
                } else {
                    // Positional keyword such as `false`
                    self.pos = start;
                    Ok(None)
                }
            }
            _ => Ok(None),
        }
    }

    /// `(a/b)` or `(a)`
    fn division(&mut self) -> Result<LuaValue, ParseError> {
        self.expect(b'(', "'('")?;
        self.skip_trivia()?;
        let numerator = self.number()?;
        self.skip_trivia()?;
        let value = if self.peek() == Some(b'/') {
            self.pos += 1;
            self.skip_trivia()?;
            let denominator = self.number()?;
            let (Some(a), Some(b)) = (numerator.as_f64(), denominator.as_f64()) else {
                return Err(self.unexpected("a number"));
            };
            LuaValue::Number(a / b)
        } else {
            numerator
        };
        self.skip_trivia()?;
        self.expect(b')', "')'")?;
        Ok(value)
    }

    fn number(&mut self) -> Result<LuaValue, ParseError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
            self.skip_trivia()?;
        }
        let digits_start = self.pos;
        let mut is_float = false;
        while let Some(b) = self.peek() {
            match b {
                b'0'..=b'9' => {}
                b'.' => is_float = true,
                b'e' | b'E' => {
                    is_float = true;
                    if matches!(self.peek_at(1), Some(b'+' | b'-')) {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
            self.pos += 1;
        }

        let digits = std::str::from_utf8(&self.input[digits_start..self.pos]).unwrap_or("");
        let negative = self.input[start] == b'-';
        let invalid = || ParseError::InvalidNumber {
            offset: start,
            text: String::from_utf8_lossy(&self.input[start..self.pos]).into_owned(),
        };
        if digits.is_empty() {
            return Err(invalid());
        }

        if !is_float {
            let signed = digits
                .parse::<i128>()
                .map(|m| if negative { -m } else { m });
            if let Some(value) = signed.ok().and_then(|v| i64::try_from(v).ok()) {
                return Ok(LuaValue::Integer(value));
            }
        }
        // Out-of-range integers become floats, as in the reference lexer
        let magnitude: f64 = digits.parse().map_err(|_| invalid())?;
        Ok(LuaValue::Number(if negative { -magnitude } else { magnitude }))
    }

    fn short_string(&mut self) -> Result<Vec<u8>, ParseError> {
        let start = self.pos;
        let Some(quote) = self.peek() else {
            return Err(self.unexpected("a string"));
        };
        self.pos += 1;
        let mut out = Vec::new();
        loop {
            let Some(b) = self.peek() else {
                return Err(ParseError::UnterminatedString { offset: start });
            };
            self.pos += 1;
            match b {
                _ if b == quote => return Ok(out),
                b'\n' | b'\r' => return Err(ParseError::UnterminatedString { offset: start }),
                b'\\' => self.escape(&mut out)?,
                _ => out.push(b),
            }
        }
    }

    /// Escape sequence after the backslash
    fn escape(&mut self, out: &mut Vec<u8>) -> Result<(), ParseError> {
        let offset = self.pos - 1;
        let Some(b) = self.peek() else {
            return Err(ParseError::InvalidEscape { offset });
        };
        self.pos += 1;
        match b {
            b'a' => out.push(0x07),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0c),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'v' => out.push(0x0b),
            b'\\' | b'"' | b'\'' => out.push(b),
            b'\n' | b'\r' => {
                self.skip_line_break_pair(b);
                out.push(b'\n');
            }
            b'z' => {
                while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
                    self.pos += 1;
                }
            }
            b'x' => {
                let hex = self.input.get(self.pos..self.pos + 2);
                let value = hex
                    .and_then(|h| std::str::from_utf8(h).ok())
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or(ParseError::InvalidEscape { offset })?;
                self.pos += 2;
                out.push(value);
            }
            b'u' => {
                self.expect(b'{', "'{'")?;
                let digits_start = self.pos;
                while self.peek().is_some_and(|b| b.is_ascii_hexdigit()) {
                    self.pos += 1;
                }
                let code = std::str::from_utf8(&self.input[digits_start..self.pos])
                    .ok()
                    .and_then(|h| u32::from_str_radix(h, 16).ok())
                    .and_then(char::from_u32)
                    .ok_or(ParseError::InvalidEscape { offset })?;
                self.expect(b'}', "'}'")?;
                let mut buf = [0; 4];
                out.extend_from_slice(code.encode_utf8(&mut buf).as_bytes());
            }
            b'0'..=b'9' => {
                let mut value = u32::from(b - b'0');
                for _ in 0..2 {
                    match self.peek() {
                        Some(d @ b'0'..=b'9') => {
                            value = value * 10 + u32::from(d - b'0');
                            self.pos += 1;
                        }
                        _ => break,
                    }
                }
                let byte = u8::try_from(value).map_err(|_| ParseError::InvalidEscape { offset })?;
                out.push(byte);
            }
            _ => return Err(ParseError::InvalidEscape { offset }),
        }
        Ok(())
    }

    /// After consuming `first`, also consume the other half of a `\r\n` or `\n\r` pair
    fn skip_line_break_pair(&mut self, first: u8) {
        match self.peek() {
            Some(next @ (b'\n' | b'\r')) if next != first => self.pos += 1,
            _ => {}
        }
    }

    /// Level of a long bracket opening at the cursor, if there is one
    fn long_bracket_level(&self) -> Option<usize> {
        if self.peek() != Some(b'[') {
            return None;
        }
        let equals = self.input[self.pos + 1..]
            .iter()
            .take_while(|&&b| b == b'=')
            .count();
        (self.peek_at(1 + equals) == Some(b'[')).then_some(equals)
    }

    fn long_bracket(&mut self) -> Result<Vec<u8>, ParseError> {
        let start = self.pos;
        let level = self
            .long_bracket_level()
            .ok_or_else(|| self.unexpected("a long bracket"))?;
        self.pos += level + 2;

        if let Some(first @ (b'\n' | b'\r')) = self.peek() {
            self.pos += 1;
            self.skip_line_break_pair(first);
        }

        let mut close = Vec::with_capacity(level + 2);
        close.push(b']');
        close.resize(level + 1, b'=');
        close.push(b']');

        let body = &self.input[self.pos..];
        let end = body
            .windows(close.len())
            .position(|w| w == close.as_slice())
            .ok_or(ParseError::UnterminatedLongBracket { offset: start })?;
        let content = normalize_line_breaks(&body[..end]);
        self.pos += end + close.len();
        Ok(content)
    }
}

/// Collapse each `\n`, `\r`, `\r\n` or `\n\r` into one `\n`
fn normalize_line_breaks(body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len());
    let mut bytes = body.iter().copied().peekable();
    while let Some(b) = bytes.next() {
        match b {
            b'\n' | b'\r' => {
                out.push(b'\n');
                bytes.next_if(|&next| matches!(next, b'\n' | b'\r') && next != b);
            }
            _ => out.push(b),
        }
    }
    out
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
