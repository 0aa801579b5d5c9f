//! Built-in data-type codes
//!
//! EPL ships a fixed table of primitive data types; entity records store
//! the type as a 32-bit code. User-defined types (structs, classes) store
//! the declaring entity's id instead and are resolved through the name map
//! at render time.

use crate::types::id::{EplId, TAG_CLASS, TAG_STRUCT};
use crate::types::name_map::IdToNameMap;

/// A built-in primitive data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum DataType {
    /// 8-bit unsigned integer.
    Byte = 1,
    /// 16-bit signed integer.
    Short = 2,
    /// 32-bit signed integer.
    Int = 3,
    /// 64-bit signed integer.
    Long = 4,
    /// 32-bit float.
    Float = 5,
    /// 64-bit float.
    Double = 6,
    /// Boolean.
    Bool = 7,
    /// Date-time value.
    DateTime = 8,
    /// Text string.
    Text = 9,
    /// Raw byte array.
    Bin = 10,
    /// Pointer to a method.
    SubPtr = 11,
}

impl DataType {
    /// Create from a raw type code, if it names a built-in type.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Byte),
            2 => Some(Self::Short),
            3 => Some(Self::Int),
            4 => Some(Self::Long),
            5 => Some(Self::Float),
            6 => Some(Self::Double),
            7 => Some(Self::Bool),
            8 => Some(Self::DateTime),
            9 => Some(Self::Text),
            10 => Some(Self::Bin),
            11 => Some(Self::SubPtr),
            _ => None,
        }
    }

    /// Keyword used in rendered pseudo-source.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Bool => "bool",
            Self::DateTime => "datetime",
            Self::Text => "text",
            Self::Bin => "bin",
            Self::SubPtr => "subptr",
        }
    }
}

/// Render a type code as a human-readable name.
///
/// Built-in codes use the fixed keyword table; struct/class ids resolve
/// through the name map; anything else prints as a hex code.
pub fn type_name(code: i32, name_map: &IdToNameMap) -> String {
    if let Some(dt) = DataType::from_code(code) {
        return dt.name().to_string();
    }
    let id = EplId::from_raw(code);
    if id.tag() == TAG_STRUCT || id.tag() == TAG_CLASS {
        return name_map.resolve(id, "");
    }
    format!("type_{:#010X}", code as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(DataType::from_code(3), Some(DataType::Int));
        assert_eq!(DataType::from_code(9), Some(DataType::Text));
        assert_eq!(DataType::from_code(0), None);
        assert_eq!(DataType::from_code(99), None);
    }

    #[test]
    fn test_builtin_name() {
        let map = IdToNameMap::new();
        assert_eq!(type_name(6, &map), "double");
    }

    #[test]
    fn test_struct_type_resolved_through_map() {
        let mut map = IdToNameMap::new();
        let id = EplId::from_raw(TAG_STRUCT | 2);
        map.insert(id, "point");
        assert_eq!(type_name(id.as_raw(), &map), "point");
    }

    #[test]
    fn test_unknown_code_prints_hex() {
        let map = IdToNameMap::new();
        assert_eq!(type_name(0x7E00_0001, &map), "type_0x7E000001");
    }
}
