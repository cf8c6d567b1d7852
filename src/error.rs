//! Error types for the DXF record codec

use crate::chain::NodeId;
use crate::io::dxf::Location;
use std::io;
use thiserror::Error;

/// Main error type for codec operations
#[derive(Debug, Error)]
pub enum DxfError {
    /// The stream could not be read or written
    #[error("{location}: IO error: {source}")]
    Io {
        location: Location,
        #[source]
        source: io::Error,
    },

    /// A group code line is not an integer, or its value line is missing
    #[error("{location}: malformed tag: {text}")]
    MalformedTag { location: Location, text: String },

    /// A decoded record lacks a field it cannot exist without
    #[error("{location}: invalid {type_name} record: {reason}")]
    InvalidRecord {
        location: Location,
        type_name: String,
        reason: String,
    },

    /// A non-defaultable field is empty at encode time
    #[error("cannot encode {type_name}: required field {field} (code {code}) is empty")]
    MissingRequiredField {
        type_name: String,
        code: i32,
        field: &'static str,
    },

    /// `free_one` was called on a node that still has a successor
    #[error("chain node {0} is not detached")]
    ChainNotDetached(NodeId),

    /// The node does not exist in the chain (never allocated or already released)
    #[error("chain node {0} does not exist")]
    NoSuchNode(NodeId),

    /// A record was paired with a schema for a different type
    #[error("schema mismatch: expected {expected} record, found {found}")]
    SchemaMismatch { expected: String, found: String },

    /// A group code the record's schema does not declare
    #[error("group code {code} is not part of the {type_name} schema")]
    UnknownField { type_name: String, code: i32 },

    /// A fixed-capacity field already holds as many values as it can
    #[error("group code {code} holds at most {capacity} values")]
    ArrayFull { code: i32, capacity: usize },

    /// Value text that does not parse under the group code's value type
    #[error("value '{value}' is not valid for group code {code}")]
    InvalidValue { code: i32, value: String },

    /// The input uses an encoding of the format the codec does not read
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, DxfError>;

impl DxfError {
    /// Whether the error ends processing of the whole stream
    ///
    /// Record-level failures (`InvalidRecord`, `MissingRequiredField`) only
    /// affect the record in hand.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            DxfError::InvalidRecord { .. } | DxfError::MissingRequiredField { .. }
        )
    }

    /// Location in the stream the error refers to, when there is one
    pub fn location(&self) -> Option<&Location> {
        match self {
            DxfError::Io { location, .. }
            | DxfError::MalformedTag { location, .. }
            | DxfError::InvalidRecord { location, .. } => Some(location),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_carries_location() {
        let err = DxfError::MalformedTag {
            location: Location::new("drawing.dxf", 12),
            text: "'abc' is not a group code".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "drawing.dxf:12: malformed tag: 'abc' is not a group code"
        );
    }

    #[test]
    fn test_missing_required_field_display() {
        let err = DxfError::MissingRequiredField {
            type_name: "LAYER".to_string(),
            code: 2,
            field: "name",
        };
        assert!(err.to_string().contains("LAYER"));
        assert!(err.to_string().contains("code 2"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_io_error_is_fatal() {
        let err = DxfError::Io {
            location: Location::new("out.dxf", 3),
            source: io::Error::new(io::ErrorKind::BrokenPipe, "closed"),
        };
        assert!(err.is_fatal());
        assert_eq!(err.location().map(|l| l.line), Some(3));
    }
}
