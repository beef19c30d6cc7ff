//! Strict JSON text parser.
//!
//! A recursive-descent reader over the UTF-8 bytes of the input. Every
//! failure carries the byte offset it was detected at.

use crate::error::{ParseError, ParseErrorKind};
use crate::number::Number;
use crate::value::{JsonObject, JsonValue};

/// Maximum array/object nesting accepted by [`parse`].
pub const MAX_DEPTH: usize = 128;

/// Parses a complete JSON document.
///
/// Surrounding whitespace is allowed; anything else after the root value is
/// rejected with [`ParseErrorKind::TrailingCharacters`]. Duplicate object
/// keys are rejected rather than resolved.
pub fn parse(text: &str) -> Result<JsonValue, ParseError> {
    let mut parser = Parser::new(text);
    parser.skip_whitespace();
    let value = parser.read_any()?;
    parser.skip_whitespace();
    if parser.x < parser.data.len() {
        return Err(parser.error(ParseErrorKind::TrailingCharacters));
    }
    Ok(value)
}

struct Parser<'a> {
    text: &'a str,
    data: &'a [u8],
    x: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            data: text.as_bytes(),
            x: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.x).copied()
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.x)
    }

    fn error_at(&self, kind: ParseErrorKind, offset: usize) -> ParseError {
        ParseError::new(kind, offset)
    }

    /// Error for whatever sits at the cursor.
    fn unexpected(&self) -> ParseError {
        match self.text.get(self.x..).and_then(|rest| rest.chars().next()) {
            Some(ch) => self.error(ParseErrorKind::UnexpectedToken(ch)),
            None => match self.peek() {
                Some(byte) => self.error(ParseErrorKind::UnexpectedToken(char::from(byte))),
                None => self.error(ParseErrorKind::UnexpectedEof),
            },
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.x += 1;
        }
    }

    fn read_any(&mut self) -> Result<JsonValue, ParseError> {
        match self.peek() {
            None => Err(self.error(ParseErrorKind::UnexpectedEof)),
            Some(b'{') => self.read_obj(),
            Some(b'[') => self.read_arr(),
            Some(b'"') => self.read_str().map(JsonValue::String),
            Some(b't') => self.read_literal("true", JsonValue::Bool(true)),
            Some(b'f') => self.read_literal("false", JsonValue::Bool(false)),
            Some(b'n') => self.read_literal("null", JsonValue::Null),
            Some(b'-' | b'0'..=b'9') => self.read_num().map(JsonValue::Number),
            Some(_) => Err(self.unexpected()),
        }
    }

    fn read_literal(&mut self, word: &str, value: JsonValue) -> Result<JsonValue, ParseError> {
        for expected in word.bytes() {
            match self.peek() {
                Some(byte) if byte == expected => self.x += 1,
                _ => return Err(self.unexpected()),
            }
        }
        Ok(value)
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.error(ParseErrorKind::DepthLimitExceeded(MAX_DEPTH)));
        }
        Ok(())
    }

    fn read_arr(&mut self) -> Result<JsonValue, ParseError> {
        self.enter()?;
        self.x += 1;
        let mut items = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.x += 1;
            self.depth -= 1;
            return Ok(JsonValue::Array(items));
        }
        loop {
            self.skip_whitespace();
            items.push(self.read_any()?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.x += 1,
                Some(b']') => {
                    self.x += 1;
                    break;
                }
                _ => return Err(self.unexpected()),
            }
        }
        self.depth -= 1;
        Ok(JsonValue::Array(items))
    }

    fn read_obj(&mut self) -> Result<JsonValue, ParseError> {
        self.enter()?;
        self.x += 1;
        let mut map = JsonObject::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.x += 1;
            self.depth -= 1;
            return Ok(JsonValue::Object(map));
        }
        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(self.unexpected());
            }
            let key_offset = self.x;
            let key = self.read_str()?;
            self.skip_whitespace();
            if self.peek() != Some(b':') {
                return Err(self.unexpected());
            }
            self.x += 1;
            self.skip_whitespace();
            let value = self.read_any()?;
            if map.contains_key(&key) {
                return Err(self.error_at(ParseErrorKind::DuplicateKey(key), key_offset));
            }
            map.insert(key, value);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.x += 1,
                Some(b'}') => {
                    self.x += 1;
                    break;
                }
                _ => return Err(self.unexpected()),
            }
        }
        self.depth -= 1;
        Ok(JsonValue::Object(map))
    }

    /// Reads a string literal; the cursor must be on the opening quote.
    fn read_str(&mut self) -> Result<String, ParseError> {
        self.x += 1;
        let mut out = String::new();
        let mut chunk_start = self.x;
        loop {
            match self.peek() {
                None => return Err(self.error(ParseErrorKind::UnterminatedString)),
                Some(b'"') => {
                    out.push_str(&self.text[chunk_start..self.x]);
                    self.x += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    out.push_str(&self.text[chunk_start..self.x]);
                    self.read_escape(&mut out)?;
                    chunk_start = self.x;
                }
                Some(byte) if byte < 0x20 => {
                    return Err(self.error(ParseErrorKind::ControlCharacter));
                }
                Some(_) => self.x += 1,
            }
        }
    }

    /// Decodes one escape sequence; the cursor must be on the backslash.
    fn read_escape(&mut self, out: &mut String) -> Result<(), ParseError> {
        let start = self.x;
        self.x += 1;
        let ch = match self.peek() {
            None => return Err(self.error(ParseErrorKind::UnterminatedString)),
            Some(b'"') => '"',
            Some(b'\\') => '\\',
            Some(b'/') => '/',
            Some(b'b') => '\u{8}',
            Some(b'f') => '\u{c}',
            Some(b'n') => '\n',
            Some(b'r') => '\r',
            Some(b't') => '\t',
            Some(b'u') => {
                self.x += 1;
                out.push(self.read_unicode(start)?);
                return Ok(());
            }
            Some(_) => return Err(self.error_at(ParseErrorKind::InvalidEscape, start)),
        };
        self.x += 1;
        out.push(ch);
        Ok(())
    }

    /// Reads the hex part of `\uXXXX`, pairing UTF-16 surrogates.
    fn read_unicode(&mut self, start: usize) -> Result<char, ParseError> {
        let invalid = ParseError::new(ParseErrorKind::InvalidUnicodeEscape, start);
        let hi = self.read_hex4(start)?;
        let code = match hi {
            0xD800..=0xDBFF => {
                if !self.data[self.x..].starts_with(b"\\u") {
                    return Err(invalid);
                }
                self.x += 2;
                let lo = self.read_hex4(start)?;
                if !(0xDC00..=0xDFFF).contains(&lo) {
                    return Err(invalid);
                }
                0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(invalid),
            _ => hi,
        };
        char::from_u32(code).ok_or(invalid)
    }

    fn read_hex4(&mut self, start: usize) -> Result<u32, ParseError> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = match self.peek() {
                None => return Err(self.error(ParseErrorKind::UnterminatedString)),
                Some(byte) => char::from(byte).to_digit(16).ok_or_else(|| {
                    self.error_at(ParseErrorKind::InvalidUnicodeEscape, start)
                })?,
            };
            code = (code << 4) | digit;
            self.x += 1;
        }
        Ok(code)
    }

    fn read_num(&mut self) -> Result<Number, ParseError> {
        let start = self.x;
        let mut is_float = false;
        if self.peek() == Some(b'-') {
            self.x += 1;
        }
        match self.peek() {
            Some(b'0') => self.x += 1,
            Some(b'1'..=b'9') => self.skip_digits(),
            _ => return Err(self.error(ParseErrorKind::InvalidNumber)),
        }
        if self.peek() == Some(b'.') {
            is_float = true;
            self.x += 1;
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.error(ParseErrorKind::InvalidNumber));
            }
            self.skip_digits();
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            is_float = true;
            self.x += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.x += 1;
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.error(ParseErrorKind::InvalidNumber));
            }
            self.skip_digits();
        }

        let literal = &self.text[start..self.x];
        if !is_float {
            if let Ok(n) = literal.parse::<i64>() {
                return Ok(Number::Integer(n));
            }
        }
        match literal.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Number::Float(f)),
            _ => Err(self.error_at(ParseErrorKind::InvalidNumber, start)),
        }
    }

    fn skip_digits(&mut self) {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.x += 1;
        }
    }
}
