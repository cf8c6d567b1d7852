//! Group code value types
//!
//! Group code ranges fix the kind of value that follows a code. Both the
//! decoder and the encoder go through [`GroupCodeValueType::from_code`] so
//! the mapping cannot drift between reading and writing.

use std::fmt;

/// Kind of value carried by a group code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupCodeValueType {
    /// Text value
    String,
    /// 64-bit floating point value
    Double,
    /// Floating point value of the 140-147 range, stored as a double
    Float,
    /// 8-bit integer
    Byte,
    /// 16-bit integer
    Int16,
    /// 32-bit integer
    Int32,
    /// 64-bit integer
    Int64,
    /// Boolean written as 0 or 1
    Bool,
    /// Hexadecimal handle, kept verbatim
    Handle,
    /// Binary chunk written as hexadecimal text
    Binary,
}

impl GroupCodeValueType {
    /// Determine the value type of a group code
    pub fn from_code(code: i32) -> Self {
        use GroupCodeValueType as T;
        match code {
            0..=9 => T::String,
            10..=59 => T::Double,
            60..=79 => T::Int16,
            90..=99 => T::Int32,
            100..=105 => T::String,
            110..=139 => T::Double,
            140..=147 => T::Float,
            148..=149 => T::Double,
            160..=169 => T::Int64,
            170..=179 => T::Int16,
            210..=239 => T::Double,
            270..=279 => T::Int16,
            280..=289 => T::Byte,
            290..=299 => T::Bool,
            300..=309 => T::String,
            310..=319 => T::Binary,
            320..=369 => T::Handle,
            370..=389 => T::Int16,
            390..=399 => T::Handle,
            400..=409 => T::Int16,
            410..=419 => T::String,
            420..=429 => T::Int32,
            430..=439 => T::String,
            440..=459 => T::Int32,
            460..=469 => T::Double,
            470..=479 => T::String,
            480..=481 => T::Handle,
            999 => T::String,
            1000..=1003 => T::String,
            1004 => T::Binary,
            1005 => T::Handle,
            1006..=1009 => T::String,
            1010..=1059 => T::Double,
            1060..=1070 => T::Int16,
            1071 => T::Int32,
            _ => T::String,
        }
    }

    /// Whether the value is written as free text (string, handle or binary)
    pub fn is_textual(self) -> bool {
        matches!(
            self,
            GroupCodeValueType::String | GroupCodeValueType::Handle | GroupCodeValueType::Binary
        )
    }

    /// Whether the value is an integer of any width
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            GroupCodeValueType::Byte
                | GroupCodeValueType::Int16
                | GroupCodeValueType::Int32
                | GroupCodeValueType::Int64
        )
    }
}

impl fmt::Display for GroupCodeValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroupCodeValueType::String => "string",
            GroupCodeValueType::Double => "double",
            GroupCodeValueType::Float => "float",
            GroupCodeValueType::Byte => "int8",
            GroupCodeValueType::Int16 => "int16",
            GroupCodeValueType::Int32 => "int32",
            GroupCodeValueType::Int64 => "int64",
            GroupCodeValueType::Bool => "bool",
            GroupCodeValueType::Handle => "handle",
            GroupCodeValueType::Binary => "binary",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::GroupCodeValueType as T;

    #[test]
    fn test_core_ranges() {
        assert_eq!(T::from_code(0), T::String);
        assert_eq!(T::from_code(9), T::String);
        assert_eq!(T::from_code(100), T::String);
        assert_eq!(T::from_code(102), T::String);
        assert_eq!(T::from_code(105), T::String);
        assert_eq!(T::from_code(10), T::Double);
        assert_eq!(T::from_code(59), T::Double);
        assert_eq!(T::from_code(62), T::Int16);
        assert_eq!(T::from_code(79), T::Int16);
        assert_eq!(T::from_code(170), T::Int16);
        assert_eq!(T::from_code(175), T::Int16);
        assert_eq!(T::from_code(90), T::Int32);
        assert_eq!(T::from_code(99), T::Int32);
        assert_eq!(T::from_code(140), T::Float);
        assert_eq!(T::from_code(147), T::Float);
        assert_eq!(T::from_code(280), T::Byte);
        assert_eq!(T::from_code(289), T::Byte);
    }

    #[test]
    fn test_handle_and_string_ranges() {
        assert_eq!(T::from_code(300), T::String);
        assert_eq!(T::from_code(330), T::Handle);
        assert_eq!(T::from_code(360), T::Handle);
        assert_eq!(T::from_code(369), T::Handle);
        assert_eq!(T::from_code(390), T::Handle);
        assert_eq!(T::from_code(310), T::Binary);
        assert!(T::from_code(330).is_textual());
        assert!(!T::from_code(70).is_textual());
    }

    #[test]
    fn test_extended_ranges() {
        assert_eq!(T::from_code(160), T::Int64);
        assert_eq!(T::from_code(290), T::Bool);
        assert_eq!(T::from_code(370), T::Int16);
        assert_eq!(T::from_code(420), T::Int32);
        assert_eq!(T::from_code(999), T::String);
        assert_eq!(T::from_code(1071), T::Int32);
        assert_eq!(T::from_code(1040), T::Double);
    }
}
