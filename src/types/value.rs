//! Typed field values

use super::Handle;
use crate::io::dxf::GroupCodeValueType;
use std::fmt;

/// A typed value bound to a group code
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text
    Text(String),
    /// Double (also used for the float range)
    Double(f64),
    /// 8-bit integer
    Byte(i8),
    /// 16-bit integer
    Int16(i16),
    /// 32-bit integer
    Int32(i32),
    /// 64-bit integer
    Int64(i64),
    /// Boolean flag
    Bool(bool),
    /// Handle reference
    Handle(Handle),
    /// Binary data as hexadecimal text
    Binary(String),
}

impl Value {
    /// Parse raw value text according to a value type.
    ///
    /// Returns `None` when the text does not fit the type (not a number,
    /// out of range for the integer width).
    pub fn parse(value_type: GroupCodeValueType, raw: &str) -> Option<Value> {
        use GroupCodeValueType as T;
        let trimmed = raw.trim();
        let value = match value_type {
            T::String => Value::Text(raw.to_string()),
            T::Handle => Value::Handle(Handle::new(trimmed)),
            T::Binary => Value::Binary(trimmed.to_string()),
            T::Double | T::Float => Value::Double(trimmed.parse::<f64>().ok()?),
            T::Byte => Value::Byte(i8::try_from(trimmed.parse::<i16>().ok()?).ok()?),
            T::Int16 => Value::Int16(trimmed.parse::<i16>().ok()?),
            T::Int32 => Value::Int32(trimmed.parse::<i32>().ok()?),
            T::Int64 => Value::Int64(trimmed.parse::<i64>().ok()?),
            T::Bool => Value::Bool(trimmed.parse::<i16>().ok()? != 0),
        };
        Some(value)
    }

    /// Zero value of a value type (empty text, 0, 0.0, false)
    pub fn zero(value_type: GroupCodeValueType) -> Value {
        use GroupCodeValueType as T;
        match value_type {
            T::String => Value::Text(String::new()),
            T::Handle => Value::Handle(Handle::default()),
            T::Binary => Value::Binary(String::new()),
            T::Double | T::Float => Value::Double(0.0),
            T::Byte => Value::Byte(0),
            T::Int16 => Value::Int16(0),
            T::Int32 => Value::Int32(0),
            T::Int64 => Value::Int64(0),
            T::Bool => Value::Bool(false),
        }
    }

    /// Convert this value to another value type through its text form
    pub fn coerce(&self, value_type: GroupCodeValueType) -> Option<Value> {
        if self.value_type() == value_type
            || (value_type == GroupCodeValueType::Float && matches!(self, Value::Double(_)))
        {
            return Some(self.clone());
        }
        Value::parse(value_type, &self.to_string())
    }

    /// The value type this value naturally encodes as
    pub fn value_type(&self) -> GroupCodeValueType {
        match self {
            Value::Text(_) => GroupCodeValueType::String,
            Value::Double(_) => GroupCodeValueType::Double,
            Value::Byte(_) => GroupCodeValueType::Byte,
            Value::Int16(_) => GroupCodeValueType::Int16,
            Value::Int32(_) => GroupCodeValueType::Int32,
            Value::Int64(_) => GroupCodeValueType::Int64,
            Value::Bool(_) => GroupCodeValueType::Bool,
            Value::Handle(_) => GroupCodeValueType::Handle,
            Value::Binary(_) => GroupCodeValueType::Binary,
        }
    }

    /// Get the value as text (text, handle and binary values)
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Binary(s) => Some(s),
            Value::Handle(h) => Some(h.as_str()),
            _ => None,
        }
    }

    /// Get the value as an integer of any width
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Byte(v) => Some(v as i64),
            Value::Int16(v) => Some(v as i64),
            Value::Int32(v) => Some(v as i64),
            Value::Int64(v) => Some(v),
            Value::Bool(v) => Some(v as i64),
            _ => None,
        }
    }

    /// Get the value as a double
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Double(v) => Some(v),
            _ => None,
        }
    }

    /// Get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(v) => Some(v),
            _ => self.as_i64().map(|v| v != 0),
        }
    }

    /// Get the value as a handle
    pub fn as_handle(&self) -> Option<&Handle> {
        match self {
            Value::Handle(h) => Some(h),
            _ => None,
        }
    }

    /// Whether the value is an empty text, handle or binary value
    pub fn is_empty_text(&self) -> bool {
        match self {
            Value::Text(s) | Value::Binary(s) => s.is_empty(),
            Value::Handle(h) => h.as_str().is_empty(),
            _ => false,
        }
    }
}

/// Format a double with at least one decimal and shortest exact precision
pub fn format_double(value: f64) -> String {
    if value.is_finite() && value == value.trunc() {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) | Value::Binary(s) => f.write_str(s),
            Value::Double(v) => f.write_str(&format_double(*v)),
            Value::Byte(v) => write!(f, "{}", v),
            Value::Int16(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Bool(v) => f.write_str(if *v { "1" } else { "0" }),
            Value::Handle(h) => f.write_str(h.as_str()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Byte(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int16(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Handle> for Value {
    fn from(h: Handle) -> Self {
        Value::Handle(h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use GroupCodeValueType as T;

    #[test]
    fn test_parse_by_type() {
        assert_eq!(Value::parse(T::Int16, " 62 "), Some(Value::Int16(62)));
        assert_eq!(Value::parse(T::Double, "1.5"), Some(Value::Double(1.5)));
        assert_eq!(Value::parse(T::Float, "2"), Some(Value::Double(2.0)));
        assert_eq!(Value::parse(T::Bool, "1"), Some(Value::Bool(true)));
        assert_eq!(Value::parse(T::Byte, "-3"), Some(Value::Byte(-3)));
        assert_eq!(Value::parse(T::Byte, "300"), None);
        assert_eq!(Value::parse(T::Int16, "abc"), None);
        assert_eq!(Value::parse(T::String, "  padded"), Some(Value::Text("  padded".into())));
    }

    #[test]
    fn test_display_doubles() {
        assert_eq!(Value::Double(1.0).to_string(), "1.0");
        assert_eq!(Value::Double(-0.25).to_string(), "-0.25");
        assert_eq!(Value::Double(0.1).to_string(), "0.1");
        assert_eq!(Value::Bool(true).to_string(), "1");
    }

    #[test]
    fn test_double_text_roundtrip() {
        for v in [0.1, 1.0 / 3.0, 123456.789, 1e-9, -42.0] {
            let text = Value::Double(v).to_string();
            assert_eq!(Value::parse(T::Double, &text), Some(Value::Double(v)));
        }
    }

    #[test]
    fn test_coerce() {
        assert_eq!(Value::Int32(7).coerce(T::Int16), Some(Value::Int16(7)));
        assert_eq!(Value::Int32(70000).coerce(T::Int16), None);
        assert_eq!(
            Value::from("1A").coerce(T::Handle),
            Some(Value::Handle(Handle::new("1A")))
        );
        assert_eq!(Value::Double(2.5).coerce(T::Float), Some(Value::Double(2.5)));
        assert_eq!(Value::Double(2.5).coerce(T::Int16), None);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int16(3).as_i64(), Some(3));
        assert_eq!(Value::Int16(3).as_bool(), Some(true));
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert!(Value::from("").is_empty_text());
        assert!(!Value::Int16(0).is_empty_text());
    }
}
