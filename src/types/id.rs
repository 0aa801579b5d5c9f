//! Tagged identifier type for section entities
//!
//! Every declared entity in a code section (class, method, variable,
//! struct, DLL declaration) carries a 32-bit identifier whose high byte is
//! a type tag and whose low 24 bits are a monotonic sequence number issued
//! by the owning section. Keeping the tag and the sequence in one explicit
//! type avoids ad hoc masking at call sites.

use std::fmt;

/// Mask of the sequence-number bits (low 24 bits).
pub const SEQUENCE_MASK: i32 = 0x00FF_FFFF;
/// Mask of the type-tag bits (high byte).
pub const TAG_MASK: i32 = !SEQUENCE_MASK;

/// Type tag of a class identifier.
pub const TAG_CLASS: i32 = 0x0100_0000;
/// Type tag of a top-level method identifier.
pub const TAG_METHOD: i32 = 0x0200_0000;
/// Type tag of a global variable identifier.
pub const TAG_GLOBAL_VARIABLE: i32 = 0x0300_0000;
/// Type tag of a struct identifier.
pub const TAG_STRUCT: i32 = 0x0400_0000;
/// Type tag of a DLL declaration identifier.
pub const TAG_DLL_DECLARE: i32 = 0x0500_0000;
/// Type tag of a method-local variable identifier.
pub const TAG_LOCAL_VARIABLE: i32 = 0x0600_0000;
/// Type tag of a method parameter identifier.
pub const TAG_METHOD_PARAMETER: i32 = 0x0700_0000;
/// Type tag of a class member variable identifier.
pub const TAG_CLASS_VARIABLE: i32 = 0x0800_0000;
/// Type tag of a struct member identifier.
pub const TAG_STRUCT_MEMBER: i32 = 0x0900_0000;

/// A tagged identifier for entities declared within a code section
///
/// Id 0 is reserved and means "no entity" (e.g., a class without a base
/// class, or a section without an entry-point method).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EplId(i32);

impl EplId {
    /// The null/invalid id (0)
    pub const NULL: EplId = EplId(0);

    /// Create an id from its raw 32-bit on-disk value
    #[inline]
    pub const fn from_raw(value: i32) -> Self {
        EplId(value)
    }

    /// Get the raw 32-bit on-disk value
    #[inline]
    pub const fn as_raw(&self) -> i32 {
        self.0
    }

    /// Get the sequence-number part (tag bits masked out)
    #[inline]
    pub const fn sequence(&self) -> i32 {
        self.0 & SEQUENCE_MASK
    }

    /// Get the type-tag part (sequence bits masked out)
    #[inline]
    pub const fn tag(&self) -> i32 {
        self.0 & TAG_MASK
    }

    /// Check if this is the null id
    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Short lowercase name of the tag, used for generated fallback names
    pub fn tag_name(&self) -> &'static str {
        match self.tag() {
            TAG_CLASS => "class",
            TAG_METHOD => "method",
            TAG_GLOBAL_VARIABLE => "global",
            TAG_STRUCT => "struct",
            TAG_DLL_DECLARE => "dll_cmd",
            TAG_LOCAL_VARIABLE => "local",
            TAG_METHOD_PARAMETER => "param",
            TAG_CLASS_VARIABLE => "member",
            TAG_STRUCT_MEMBER => "member",
            _ => "id",
        }
    }
}

impl Default for EplId {
    fn default() -> Self {
        EplId::NULL
    }
}

impl From<i32> for EplId {
    fn from(value: i32) -> Self {
        EplId(value)
    }
}

impl From<EplId> for i32 {
    fn from(id: EplId) -> Self {
        id.0
    }
}

impl fmt::Display for EplId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010X}", self.0 as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_parts() {
        let id = EplId::from_raw(TAG_METHOD | 0x2A);
        assert_eq!(id.sequence(), 0x2A);
        assert_eq!(id.tag(), TAG_METHOD);
        assert!(!id.is_null());
    }

    #[test]
    fn test_null_id() {
        assert!(EplId::NULL.is_null());
        assert_eq!(EplId::default(), EplId::NULL);
        assert_eq!(EplId::NULL.sequence(), 0);
    }

    #[test]
    fn test_masks_are_disjoint() {
        assert_eq!(SEQUENCE_MASK & TAG_MASK, 0);
        assert_eq!(SEQUENCE_MASK | TAG_MASK, -1);
    }

    #[test]
    fn test_tag_names() {
        assert_eq!(EplId::from_raw(TAG_CLASS | 1).tag_name(), "class");
        assert_eq!(EplId::from_raw(TAG_STRUCT | 9).tag_name(), "struct");
        assert_eq!(EplId::from_raw(0x7F00_0001).tag_name(), "id");
    }

    #[test]
    fn test_display() {
        let id = EplId::from_raw(TAG_CLASS | 0x10);
        assert_eq!(format!("{}", id), "0x01000010");
    }

    #[test]
    fn test_conversion_round_trip() {
        let raw = TAG_DLL_DECLARE | 77;
        let id: EplId = raw.into();
        let back: i32 = id.into();
        assert_eq!(raw, back);
    }
}
