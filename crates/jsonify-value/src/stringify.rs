//! JSON text serializer.

use std::fmt::Write as _;

use crate::value::{JsonObject, JsonValue};

/// Output options for [`stringify_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringifyOptions {
    /// Escape `<`, `>`, `&`, `=` and `'` as `\u00XX` so the output can be
    /// embedded in HTML.
    pub escape_html: bool,
    /// Pretty-print with this many spaces per nesting level. `None` is compact.
    pub indent: Option<usize>,
}

impl StringifyOptions {
    pub fn pretty(indent: usize) -> Self {
        Self {
            indent: Some(indent),
            ..Self::default()
        }
    }
}

/// Serializes a value as compact JSON text.
pub fn stringify(value: &JsonValue) -> String {
    stringify_with(value, &StringifyOptions::default())
}

pub fn stringify_with(value: &JsonValue, options: &StringifyOptions) -> String {
    let mut writer = Writer {
        out: String::new(),
        options,
    };
    writer.write_any(value, 0);
    writer.out
}

struct Writer<'a> {
    out: String,
    options: &'a StringifyOptions,
}

impl Writer<'_> {
    fn write_any(&mut self, value: &JsonValue, level: usize) {
        match value {
            JsonValue::Null => self.out.push_str("null"),
            JsonValue::Bool(true) => self.out.push_str("true"),
            JsonValue::Bool(false) => self.out.push_str("false"),
            JsonValue::Number(n) => {
                let _ = write!(self.out, "{n}");
            }
            JsonValue::String(s) => self.write_str(s),
            JsonValue::Array(items) => self.write_arr(items, level),
            JsonValue::Object(map) => self.write_obj(map, level),
        }
    }

    fn newline(&mut self, level: usize) {
        if let Some(indent) = self.options.indent {
            self.out.push('\n');
            self.out.extend(std::iter::repeat(' ').take(indent * level));
        }
    }

    fn write_arr(&mut self, items: &[JsonValue], level: usize) {
        if items.is_empty() {
            self.out.push_str("[]");
            return;
        }
        self.out.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.newline(level + 1);
            self.write_any(item, level + 1);
        }
        self.newline(level);
        self.out.push(']');
    }

    fn write_obj(&mut self, map: &JsonObject, level: usize) {
        if map.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push('{');
        for (i, (key, val)) in map.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.newline(level + 1);
            self.write_str(key);
            self.out.push(':');
            if self.options.indent.is_some() {
                self.out.push(' ');
            }
            self.write_any(val, level + 1);
        }
        self.newline(level);
        self.out.push('}');
    }

    fn write_str(&mut self, s: &str) {
        self.out.reserve(s.len() + 2);
        self.out.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                '\u{8}' => self.out.push_str("\\b"),
                '\u{c}' => self.out.push_str("\\f"),
                c if (c as u32) < 0x20 => {
                    let _ = write!(self.out, "\\u{:04x}", c as u32);
                }
                '<' | '>' | '&' | '=' | '\'' if self.options.escape_html => {
                    let _ = write!(self.out, "\\u{:04x}", ch as u32);
                }
                c => self.out.push(c),
            }
        }
        self.out.push('"');
    }
}

#[cfg(test)]
mod tests {
    use super::{stringify, stringify_with, StringifyOptions};
    use crate::{parse, JsonValue};

    #[test]
    fn compact_output_preserves_key_order() {
        let value = parse(r#"{ "op" : "add", "left" : 1, "right" : 2 }"#).unwrap();
        assert_eq!(stringify(&value), r#"{"op":"add","left":1,"right":2}"#);
    }

    #[test]
    fn escapes_quotes_and_control_characters() {
        let value = JsonValue::from("q\"b\\s\u{1}\u{1f}\n\t\u{8}\u{c}\r");
        assert_eq!(
            stringify(&value),
            r#""q\"b\\s\u0001\u001f\n\t\b\f\r""#
        );
    }

    #[test]
    fn leaves_non_ascii_alone() {
        assert_eq!(stringify(&JsonValue::from("zażółć 🎉")), "\"zażółć 🎉\"");
    }

    #[test]
    fn html_escaping_is_opt_in() {
        let value = JsonValue::from("<a href='x'>&</a>=");
        assert_eq!(stringify(&value), r#""<a href='x'>&</a>=""#);
        let options = StringifyOptions {
            escape_html: true,
            ..StringifyOptions::default()
        };
        assert_eq!(
            stringify_with(&value, &options),
            r#""\u003ca href=\u0027x\u0027\u003e\u0026\u003c/a\u003e\u003d""#
        );
    }

    #[test]
    fn pretty_output() {
        let value = parse(r#"[{"op":"add","left":1,"right":2},{"op":"inc","operand":3},[],{}]"#)
            .unwrap();
        let expected = "[\n  {\n    \"op\": \"add\",\n    \"left\": 1,\n    \"right\": 2\n  },\n  {\n    \"op\": \"inc\",\n    \"operand\": 3\n  },\n  [],\n  {}\n]";
        assert_eq!(stringify_with(&value, &StringifyOptions::pretty(2)), expected);
        assert_eq!(parse(expected).unwrap(), value);
    }

    #[test]
    fn display_matches_stringify() {
        let value = parse(r#"{"a":[true,null,1.5]}"#).unwrap();
        assert_eq!(value.to_string(), stringify(&value));
    }
}
