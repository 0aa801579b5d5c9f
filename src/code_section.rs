//! The decoded code section
//!
//! `CodeSection` is the aggregate root: it exclusively owns every entity
//! list plus the opaque byte ranges whose meaning is undocumented. Opaque
//! ranges are never interpreted and round-trip bit-for-bit.
//!
//! The section is single-threaded by contract; concurrent mutation (two
//! callers allocating ids, or rendering while mutating) must be prevented
//! by the caller.

use bitflags::bitflags;

use crate::entities::{
    ClassInfo, DllDeclareInfo, GlobalVariableInfo, LibraryRefInfo, MethodInfo, StructInfo,
};
use crate::error::{EplError, Result};
use crate::io::reader::CodeSectionReader;
use crate::io::writer::CodeSectionWriter;
use crate::render::write_join_code;
use crate::types::id::{EplId, SEQUENCE_MASK};
use crate::types::name_map::IdToNameMap;

/// Which on-disk field order a section was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatVariant {
    /// The canonical field order.
    #[default]
    Plain,
    /// The older field order found in encrypted EC files: fields are
    /// reordered and a few extra marker fields are present. Handled purely
    /// as an alternate field sequence; no decryption happens here.
    LegacyCrypt,
}

bitflags! {
    /// Section flag word.
    ///
    /// Only bit 0 is understood; the remaining bits are reserved and are
    /// preserved across a round trip via `from_bits_retain`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SectionFlags: i32 {
        /// A fixed 16-byte block precedes the icon data.
        const HAS_PRE_ICON_BLOCK = 0x1;
    }
}

/// The decoded in-memory representation of one code-section blob.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeSection {
    /// Last-issued raw identifier sequence number. Monotonic; ids are
    /// never reused within a section's lifetime.
    pub(crate) allocated_id_counter: i32,
    /// Opaque range preceding the library list; preserved verbatim.
    pub unknown_before_library_1: Vec<u8>,
    /// Opaque range preceding the library list; preserved verbatim.
    pub unknown_before_library_2: Vec<u8>,
    /// Opaque range preceding the library list; preserved verbatim.
    pub unknown_before_library_3: Vec<u8>,
    /// Referenced libraries; order is load-significant.
    pub libraries: Vec<LibraryRefInfo>,
    /// Section flag word; bit 0 governs the pre-icon block.
    pub flag: SectionFlags,
    /// Entry-point method id. Only meaningful in archives lacking full
    /// edit metadata.
    pub main_method: EplId,
    /// Opaque 16-byte block, present iff `flag` bit 0 is set.
    pub pre_icon_block: Option<[u8; 16]>,
    /// Icon resource bytes; may be empty.
    pub icon_data: Vec<u8>,
    /// Debug command-line parameters.
    pub debug_command_parameters: String,
    /// Class declarations.
    pub classes: Vec<ClassInfo>,
    /// Top-level methods (class methods are referenced by id from their
    /// class and also live here).
    pub methods: Vec<MethodInfo>,
    /// Global variables.
    pub global_variables: Vec<GlobalVariableInfo>,
    /// Struct declarations.
    pub structs: Vec<StructInfo>,
    /// DLL import declarations.
    pub dll_declares: Vec<DllDeclareInfo>,
    /// Field order this section was decoded from. Retained so a symmetric
    /// legacy encoder can be added later; the current encoder always emits
    /// the plain order.
    pub(crate) variant: FormatVariant,
}

impl CodeSection {
    /// Create an empty section for authoring a new archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a section from a raw byte buffer.
    ///
    /// This is a convenience wrapper that discards reader notifications;
    /// use [`CodeSectionReader`] directly to inspect them.
    pub fn decode(data: &[u8], variant: FormatVariant) -> Result<Self> {
        CodeSectionReader::new(data, variant).read()
    }

    /// Encode the section to the plain-variant byte layout.
    pub fn encode(&self) -> Result<Vec<u8>> {
        CodeSectionWriter::new().write(self)
    }

    /// The field order this section was decoded from.
    pub fn variant(&self) -> FormatVariant {
        self.variant
    }

    /// Last-issued raw identifier sequence number.
    pub fn allocated_id_counter(&self) -> i32 {
        self.allocated_id_counter
    }

    /// Allocate a new identifier with the given type tag.
    ///
    /// Increments the section counter and ORs in the tag. The tag must
    /// occupy the high byte (see [`crate::types::id`]); the sequence space
    /// is the low 24 bits, and allocation fails with
    /// [`EplError::AllocationExhausted`] once it is spent, leaving the
    /// counter untouched.
    pub fn alloc_id(&mut self, type_tag: i32) -> Result<EplId> {
        if self.allocated_id_counter >= SEQUENCE_MASK || self.allocated_id_counter < 0 {
            return Err(EplError::AllocationExhausted(SEQUENCE_MASK as u32));
        }
        self.allocated_id_counter += 1;
        Ok(EplId::from_raw(self.allocated_id_counter | type_tag))
    }

    /// Look up a top-level method by id.
    pub fn method_by_id(&self, id: EplId) -> Option<&MethodInfo> {
        self.methods.iter().find(|m| m.id == id)
    }

    /// Set or clear the 16-byte pre-icon block, keeping flag bit 0
    /// consistent with its presence.
    pub fn set_pre_icon_block(&mut self, block: Option<[u8; 16]>) {
        self.flag.set(SectionFlags::HAS_PRE_ICON_BLOCK, block.is_some());
        self.pre_icon_block = block;
    }

    /// Render the whole section as pseudo-source text.
    ///
    /// Block order: global variables, classes, DLL declarations, structs.
    /// A single blank line separates each present optional block from what
    /// precedes it; empty lists contribute nothing. When `write_methods`
    /// is set, classes resolve their method ids against this section;
    /// `write_code` controls whether method bodies are noted.
    pub fn to_text_code(
        &self,
        name_map: &IdToNameMap,
        out: &mut String,
        indent: usize,
        write_methods: bool,
        write_code: bool,
    ) {
        if !self.global_variables.is_empty() {
            write_join_code(&self.global_variables, name_map, out, indent);
            out.push_str("\n\n");
        }
        let section = if write_methods { Some(self) } else { None };
        for (i, class) in self.classes.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            class.render(section, name_map, out, indent, write_code);
        }
        if !self.dll_declares.is_empty() {
            out.push_str("\n\n");
            write_join_code(&self.dll_declares, name_map, out, indent);
        }
        if !self.structs.is_empty() {
            out.push_str("\n\n");
            write_join_code(&self.structs, name_map, out, indent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::id::{TAG_CLASS, TAG_METHOD};

    #[test]
    fn test_alloc_id_tags_and_increments() {
        let mut section = CodeSection::new();
        let a = section.alloc_id(TAG_METHOD).unwrap();
        let b = section.alloc_id(TAG_CLASS).unwrap();
        assert_eq!(a.sequence(), 1);
        assert_eq!(a.tag(), TAG_METHOD);
        assert_eq!(b.sequence(), 2);
        assert_eq!(b.tag(), TAG_CLASS);
        assert_eq!(section.allocated_id_counter(), 2);
    }

    #[test]
    fn test_alloc_id_exhaustion() {
        let mut section = CodeSection::new();
        section.allocated_id_counter = SEQUENCE_MASK;
        let err = section.alloc_id(TAG_METHOD).unwrap_err();
        assert!(matches!(err, EplError::AllocationExhausted(_)));
        // counter untouched by the failed call
        assert_eq!(section.allocated_id_counter(), SEQUENCE_MASK);
    }

    #[test]
    fn test_set_pre_icon_block_syncs_flag() {
        let mut section = CodeSection::new();
        assert!(!section.flag.contains(SectionFlags::HAS_PRE_ICON_BLOCK));

        section.set_pre_icon_block(Some([0xAB; 16]));
        assert!(section.flag.contains(SectionFlags::HAS_PRE_ICON_BLOCK));

        section.set_pre_icon_block(None);
        assert!(!section.flag.contains(SectionFlags::HAS_PRE_ICON_BLOCK));
        assert!(section.pre_icon_block.is_none());
    }

    #[test]
    fn test_reserved_flag_bits_survive_setter() {
        let mut section = CodeSection::new();
        section.flag = SectionFlags::from_bits_retain(0x80);
        section.set_pre_icon_block(Some([0; 16]));
        assert_eq!(section.flag.bits(), 0x81);
    }

    #[test]
    fn test_method_by_id() {
        let mut section = CodeSection::new();
        let id = EplId::from_raw(TAG_METHOD | 7);
        section.methods.push(MethodInfo {
            id,
            name: "startup".to_string(),
            ..Default::default()
        });
        assert_eq!(section.method_by_id(id).unwrap().name, "startup");
        assert!(section.method_by_id(EplId::NULL).is_none());
    }
}
