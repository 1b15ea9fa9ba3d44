//! Property paths into a value tree
//!
//! Grammar, applied left to right:
//!
//! - `.` separates segments; leading and repeated dots are skipped
//! - a bare key runs up to the next `.` or `[`
//! - `[<digits>]` is a sequence index
//! - `["<key>"]` is a quoted key; `\"` escapes a quote inside it
//! - `[*]` is the literal key `*`
//!
//! Examples: `a.b[0].c`, `environmentVariables["AWS.REGION"]`, `[2]`.

use std::fmt;
use std::str::FromStr;

use crate::errors::{EnvxError, Result};
use crate::value::Value;

/// One step of a property path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// An ordered address into a value tree; empty means the whole tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PropertyPath {
    segments: Vec<PathSegment>,
}

impl PropertyPath {
    /// The empty path
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a property path, attributing failures to `input`
    ///
    /// # Errors
    ///
    /// Returns `EnvxError::InvalidPropertyPath` naming the input and the cause.
    pub fn parse(input: &str) -> Result<Self> {
        parse_segments(input)
            .map(|segments| Self { segments })
            .map_err(|reason| EnvxError::InvalidPropertyPath {
                input: input.to_string(),
                reason: reason.to_string(),
            })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Append a segment, returning the extended path
    pub fn push(mut self, segment: impl Into<PathSegment>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Resolve this path against `root`
    ///
    /// Returns `None` as soon as a segment does not match the shape of the
    /// current node: missing key, out-of-range index, a key applied to a
    /// sequence, an index applied to a mapping, or any step into a scalar.
    pub fn resolve<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        self.segments
            .iter()
            .try_fold(root, |node, segment| match segment {
                PathSegment::Key(key) => node.as_object()?.get(key),
                PathSegment::Index(index) => node.as_array()?.get(*index),
            })
    }
}

impl FromIterator<PathSegment> for PropertyPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl FromStr for PropertyPath {
    type Err = EnvxError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Resolve `path` against `root`, reporting whether it was found
///
/// A miss yields the canonical undefined value, which renders as `null`.
pub fn resolve(root: &Value, path: &PropertyPath) -> (Value, bool) {
    match path.resolve(root) {
        Some(found) => (found.clone(), true),
        None => (Value::undefined(), false),
    }
}

fn is_simple_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
                PathSegment::Key(key) if is_simple_key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Key(key) => {
                    f.write_str("[\"")?;
                    for c in key.chars() {
                        if c == '"' || c == '\\' {
                            f.write_str("\\")?;
                        }
                        write!(f, "{}", c)?;
                    }
                    f.write_str("\"]")?;
                }
            }
        }
        Ok(())
    }
}

fn parse_segments(input: &str) -> std::result::Result<Vec<PathSegment>, &'static str> {
    let bytes = input.as_bytes();
    let mut segments = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'.' => pos += 1,
            b'[' if bytes.get(pos + 1) == Some(&b'"') => {
                let (key, next) = parse_quoted_key(input, pos + 2)?;
                if bytes.get(next) != Some(&b']') {
                    return Err("missing closing bracket in property access");
                }
                segments.push(PathSegment::Key(key));
                pos = next + 1;
            }
            b'[' => {
                let close = input[pos..]
                    .find(']')
                    .map(|offset| pos + offset)
                    .ok_or("missing closing bracket in array index")?;
                let inner = &input[pos + 1..close];
                let segment = if inner == "*" {
                    PathSegment::Key("*".to_string())
                } else if !inner.is_empty() && inner.bytes().all(|b| b.is_ascii_digit()) {
                    PathSegment::Index(inner.parse().map_err(|_| "array index out of range")?)
                } else {
                    return Err("invalid array index");
                };
                segments.push(segment);
                pos = close + 1;
            }
            _ => {
                let end = input[pos..]
                    .find(|c| c == '.' || c == '[')
                    .map_or(input.len(), |offset| pos + offset);
                segments.push(PathSegment::Key(input[pos..end].to_string()));
                pos = end;
            }
        }
    }

    Ok(segments)
}

/// Read a quoted key starting just after the opening quote
///
/// Returns the unescaped key and the byte offset following the closing quote.
fn parse_quoted_key(input: &str, start: usize) -> std::result::Result<(String, usize), &'static str> {
    let mut key = String::new();
    let mut chars = input[start..].char_indices();
    while let Some((offset, c)) = chars.next() {
        match c {
            '"' => return Ok((key, start + offset + 1)),
            // `\"` and `\\` are escapes; any other backslash is literal
            '\\' if matches!(input[start + offset + 1..].chars().next(), Some('"' | '\\')) => {
                if let Some((_, escaped)) = chars.next() {
                    key.push(escaped);
                }
            }
            _ => key.push(c),
        }
    }
    Err("missing closing quote in property name")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(parts: &[&str]) -> Vec<PathSegment> {
        parts.iter().map(|k| PathSegment::from(*k)).collect()
    }

    #[test]
    fn test_parse_dotted_keys() {
        let path = PropertyPath::parse("a.b.c").unwrap();
        assert_eq!(path.segments(), keys(&["a", "b", "c"]).as_slice());
    }

    #[test]
    fn test_parse_mixed_segments() {
        let path = PropertyPath::parse("a.b[0].c").unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::from("a"),
                PathSegment::from("b"),
                PathSegment::Index(0),
                PathSegment::from("c"),
            ]
        );
    }

    #[test]
    fn test_parse_quoted_key_with_dots_and_escapes() {
        let path = PropertyPath::parse(r#"vars["a.b"]["say \"hi\""]"#).unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::from("vars"),
                PathSegment::from("a.b"),
                PathSegment::from("say \"hi\""),
            ]
        );
    }

    #[test]
    fn test_parse_leading_index_and_wildcard() {
        let path = PropertyPath::parse("[2][*]").unwrap();
        assert_eq!(
            path.segments(),
            &[PathSegment::Index(2), PathSegment::from("*")]
        );
    }

    #[test]
    fn test_parse_empty_is_root() {
        assert!(PropertyPath::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_errors_name_input_and_cause() {
        let cases = [
            ("a[0", "missing closing bracket in array index"),
            ("a[x]", "invalid array index"),
            ("a[-1]", "invalid array index"),
            ("a[]", "invalid array index"),
            (r#"a["b"#, "missing closing quote in property name"),
            (r#"a["b"x"#, "missing closing bracket in property access"),
        ];
        for (input, cause) in cases {
            let err = PropertyPath::parse(input).unwrap_err();
            let text = err.to_string();
            assert!(text.contains(input), "{} should name input {}", text, input);
            assert!(text.contains(cause), "{} should contain {}", text, cause);
        }
    }

    #[test]
    fn test_backslash_in_quoted_key_round_trips() {
        let path: PropertyPath = [PathSegment::from("a\\")].into_iter().collect();
        assert_eq!(path.to_string(), r#"["a\\"]"#);
        assert_eq!(PropertyPath::parse(&path.to_string()).unwrap(), path);

        let lone = PropertyPath::parse(r#"["c:\dir"]"#).unwrap();
        assert_eq!(lone.segments(), &[PathSegment::from("c:\\dir")]);
        assert_eq!(lone.to_string(), r#"["c:\\dir"]"#);
    }

    #[test]
    fn test_display_round_trips_canonical_text() {
        for text in ["a.b[0].c", r#"vars["a.b"]"#, "[1].x", r#"m["say \"hi\""]"#] {
            let path = PropertyPath::parse(text).unwrap();
            assert_eq!(path.to_string(), text);
        }
    }

    #[test]
    fn test_resolve_follows_segments() {
        let tree = Value::from(serde_json::json!({"a": {"b": [{"c": "deep"}]}}));
        let path = PropertyPath::parse("a.b[0].c").unwrap();
        assert_eq!(path.resolve(&tree).and_then(Value::as_str), Some("deep"));
    }

    #[test]
    fn test_resolve_shape_mismatch_is_miss() {
        let tree = Value::from(serde_json::json!({"list": [1, 2], "map": {"0": "zero"}}));

        for text in ["list.0", "map[0]", "list[2]", "list[0].x", "missing"] {
            let path = PropertyPath::parse(text).unwrap();
            assert!(path.resolve(&tree).is_none(), "{} should miss", text);
        }
    }

    #[test]
    fn test_resolve_fn_returns_undefined_on_miss() {
        let tree = Value::from(serde_json::json!({"x": {"y": 42}}));

        let (hit, found) = resolve(&tree, &PropertyPath::parse("x.y").unwrap());
        assert!(found);
        assert_eq!(hit, Value::number(42));

        let (miss, found) = resolve(&tree, &PropertyPath::parse("x.z").unwrap());
        assert!(!found);
        assert!(miss.is_undefined());
    }

    #[test]
    fn test_resolve_empty_path_returns_root() {
        let tree = Value::from(serde_json::json!([1, 2, 3]));
        assert_eq!(PropertyPath::root().resolve(&tree), Some(&tree));
    }
}
