//! Provenance metadata attached to values

use serde::{Deserialize, Serialize};

use super::Value;

/// A position inside an environment definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pos {
    pub line: u32,
    pub column: u32,
    pub byte: u32,
}

/// A source range inside a named environment definition
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Range {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub environment: String,
    pub begin: Pos,
    pub end: Pos,
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.environment.is_empty() {
            write!(f, "{}:", self.environment)?;
        }
        write!(f, "{}:{}", self.begin.line, self.begin.column)
    }
}

/// Where a value was defined, and the value it overrides, if any
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub def: Option<Range>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<Box<Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_display() {
        let range = Range {
            environment: "acme/dev".to_string(),
            begin: Pos {
                line: 3,
                column: 7,
                byte: 40,
            },
            end: Pos::default(),
        };
        assert_eq!(range.to_string(), "acme/dev:3:7");

        let anonymous = Range {
            environment: String::new(),
            ..range
        };
        assert_eq!(anonymous.to_string(), "3:7");
    }
}
