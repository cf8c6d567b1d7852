//! Handle type for DXF records
//!
//! Handles are hexadecimal identifiers that name a record within a file.
//! The codec stores them verbatim: a handle read from a stream is written
//! back with exactly the same text, and it is never resolved against the
//! records it points to.

use std::fmt;

/// An opaque, hexadecimal-rendered record identifier
///
/// The text is kept as read (surrounding whitespace trimmed). An empty
/// handle and the handle `0` are both null.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Handle(String);

impl Handle {
    /// Create a handle from its textual form
    pub fn new(text: impl AsRef<str>) -> Self {
        Handle(text.as_ref().trim().to_string())
    }

    /// Create a handle from a numeric identifier, rendered as upper-case hex
    pub fn from_value(value: u64) -> Self {
        Handle(format!("{:X}", value))
    }

    /// The handle text exactly as it will be written
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the handle text as a hexadecimal number
    pub fn value(&self) -> Option<u64> {
        u64::from_str_radix(&self.0, 16).ok()
    }

    /// Check if this is a null handle (empty or zero)
    pub fn is_null(&self) -> bool {
        self.0.is_empty() || self.value() == Some(0)
    }

    /// Check if this handle refers to something
    pub fn is_valid(&self) -> bool {
        !self.is_null()
    }
}

impl From<&str> for Handle {
    fn from(text: &str) -> Self {
        Handle::new(text)
    }
}

impl From<String> for Handle {
    fn from(text: String) -> Self {
        Handle::new(text)
    }
}

impl From<u64> for Handle {
    fn from(value: u64) -> Self {
        Handle::from_value(value)
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
