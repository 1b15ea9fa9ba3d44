//! JSON projections: plain and detailed

use std::io::{self, Write};

use serde::ser::{Serialize, Serializer};
use serde_json::ser::{Formatter, PrettyFormatter};

use super::string::UNKNOWN_TEXT;
use crate::errors::Result;
use crate::value::{Value, ValueKind};

/// Plain JSON view of a value
///
/// Drops all metadata. Unknown nodes serialize as the string `[unknown]`;
/// object members keep their insertion order.
pub struct PlainJson<'a>(pub &'a Value);

impl Serialize for PlainJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.0.is_unknown() {
            return serializer.serialize_str(UNKNOWN_TEXT);
        }
        match self.0.kind() {
            ValueKind::Null => serializer.serialize_unit(),
            ValueKind::Bool(b) => serializer.serialize_bool(*b),
            ValueKind::Number(n) => n.serialize(serializer),
            ValueKind::String(s) => serializer.serialize_str(s),
            ValueKind::Array(items) => serializer.collect_seq(items.iter().map(PlainJson)),
            ValueKind::Object(map) => {
                serializer.collect_map(map.iter().map(|(k, v)| (k, PlainJson(v))))
            }
        }
    }
}

/// Two-space pretty printer that also escapes `<`, `>`, `&`, U+2028 and
/// U+2029 inside strings, matching Go's `json.Encoder` output
#[derive(Default)]
struct HtmlSafePretty<'a>(PrettyFormatter<'a>);

impl Formatter for HtmlSafePretty<'_> {
    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            let escaped = match c {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = i + c.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }
}

fn write_pretty<W: Write + ?Sized, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    let mut ser = serde_json::Serializer::with_formatter(&mut *out, HtmlSafePretty::default());
    value.serialize(&mut ser)?;
    out.write_all(b"\n")?;
    Ok(())
}

pub(crate) fn write_plain<W: Write + ?Sized>(out: &mut W, value: &Value) -> Result<()> {
    write_pretty(out, &PlainJson(value))
}

pub(crate) fn write_detailed<W: Write + ?Sized>(out: &mut W, value: &Value) -> Result<()> {
    write_pretty(out, value)
}
