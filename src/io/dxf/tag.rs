//! Group code / value pairs

use super::GroupCodeValueType;
use crate::types::Value;
use std::fmt;
use std::sync::Arc;

/// A position in a tag stream: source name and line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Name of the stream (file path or a caller-chosen label)
    pub source: Arc<str>,
    /// 1-based line number of the group code line, 0 before the first tag
    pub line: usize,
}

impl Location {
    /// Create a location
    pub fn new(source: impl Into<Arc<str>>, line: usize) -> Self {
        Self {
            source: source.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.line)
    }
}

/// A group code and its raw value text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// The group code
    pub code: i32,
    /// The value line without its line terminator
    pub value: String,
}

impl Tag {
    /// Create a new tag
    pub fn new(code: i32, value: impl Into<String>) -> Self {
        Self {
            code,
            value: value.into(),
        }
    }

    /// Value type implied by the group code
    pub fn value_type(&self) -> GroupCodeValueType {
        GroupCodeValueType::from_code(self.code)
    }

    /// Parse the value under the group code's value type
    pub fn parse_value(&self) -> Option<Value> {
        Value::parse(self.value_type(), &self.value)
    }

    /// Whether this is a `0` tag announcing a record or structure keyword
    pub fn is_start(&self) -> bool {
        self.code == 0
    }

    /// Whether this is a `0` tag with the given keyword
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.code == 0 && self.value.trim() == keyword
    }
}

/// Result of pulling one tag from a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    /// A tag with a non-zero group code
    Tag(Tag),
    /// A `0` tag: ends the current record, announces the next keyword
    EndOfEntity(Tag),
    /// No more tags (`0/EOF` or end of input)
    EndOfStream,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_value_parsing() {
        let tag = Tag::new(62, "  7");
        assert_eq!(tag.parse_value(), Some(Value::Int16(7)));
        assert_eq!(Tag::new(62, "x").parse_value(), None);
    }

    #[test]
    fn test_keyword() {
        let tag = Tag::new(0, "ENDTAB");
        assert!(tag.is_start());
        assert!(tag.is_keyword("ENDTAB"));
        assert!(!Tag::new(2, "ENDTAB").is_keyword("ENDTAB"));
    }

    #[test]
    fn test_location_display() {
        assert_eq!(Location::new("layers.dxf", 42).to_string(), "layers.dxf:42");
    }
}
