//! Code-section reader
//!
//! Decodes one serialized code section into a [`CodeSection`]. The two
//! historical on-disk layouts read the same fields in different orders,
//! selected once by the [`FormatVariant`] the caller supplies; the
//! legacy-crypt order additionally carries a few discarded marker fields.
//!
//! Any decode failure invalidates the whole reconstruction; no partial
//! section is ever returned.

use crate::code_section::{CodeSection, FormatVariant, SectionFlags};
use crate::entities::{class_info, dll_declare, library_ref, method_info, struct_info, variable};
use crate::entities::GlobalVariableInfo;
use crate::error::Result;
use crate::io::cursor::SectionReader;
use crate::notification::{NotificationCollection, NotificationType};
use crate::types::id::EplId;

/// Fixed version marker following the id counter.
///
/// Observed in files produced by compiler version 5.71. Not validated
/// beyond a warning notification on mismatch.
pub const VERSION_MARKER: i32 = 51_113_791;

/// Reader for one serialized code section.
pub struct CodeSectionReader<'a> {
    data: &'a [u8],
    variant: FormatVariant,
    notifications: NotificationCollection,
}

impl<'a> CodeSectionReader<'a> {
    /// Create a reader over a raw section buffer.
    ///
    /// The buffer is borrowed for the duration of the read; the reader
    /// takes no ownership of it.
    pub fn new(data: &'a [u8], variant: FormatVariant) -> Self {
        Self {
            data,
            variant,
            notifications: NotificationCollection::new(),
        }
    }

    /// Notifications collected by the last `read` call.
    pub fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }

    /// Decode the section.
    ///
    /// The cursor advances monotonically over a fixed field sequence with
    /// no backtracking. Collaborator errors propagate unchanged.
    pub fn read(&mut self) -> Result<CodeSection> {
        let legacy = self.variant == FormatVariant::LegacyCrypt;
        let mut r = SectionReader::new(self.data);

        let allocated_id_counter = r.read_i32()?;
        let marker = r.read_i32()?;
        if marker != VERSION_MARKER {
            self.notifications.notify(
                NotificationType::Warning,
                format!("unexpected version marker {marker} (expected {VERSION_MARKER})"),
            );
        }
        let unknown_before_library_1 = r.read_bytes_with_length_prefix()?;

        let unknown_before_library_2;
        let unknown_before_library_3;
        let libraries;
        let flag;
        let main_method;
        if legacy {
            // Two unused marker fields precede the remaining header.
            let _ = r.read_i32()?;
            let _ = r.read_i32()?;
            unknown_before_library_2 = r.read_bytes_with_length_prefix()?;
            flag = SectionFlags::from_bits_retain(r.read_i32()?);
            main_method = EplId::from_raw(r.read_i32()?);
            libraries = library_ref::read_libraries(&mut r)?;
            unknown_before_library_3 = r.read_bytes_with_length_prefix()?;
        } else {
            unknown_before_library_2 = r.read_bytes_with_length_prefix()?;
            unknown_before_library_3 = r.read_bytes_with_length_prefix()?;
            libraries = library_ref::read_libraries(&mut r)?;
            flag = SectionFlags::from_bits_retain(r.read_i32()?);
            main_method = EplId::from_raw(r.read_i32()?);
        }

        // Absent, not zero-length, when flag bit 0 is clear.
        let pre_icon_block = if flag.contains(SectionFlags::HAS_PRE_ICON_BLOCK) {
            Some(r.read_block16()?)
        } else {
            None
        };
        let icon_data = r.read_bytes_with_length_prefix()?;
        let debug_command_parameters = r.read_string_with_length_prefix()?;

        let classes;
        let methods;
        let global_variables;
        let structs;
        let dll_declares;
        if legacy {
            r.skip(12)?;
            methods = method_info::read_methods(&mut r)?;
            dll_declares = dll_declare::read_dll_declares(&mut r)?;
            global_variables = variable::read_variables(&mut r, GlobalVariableInfo::from)?;
            classes = class_info::read_classes(&mut r)?;
            structs = struct_info::read_structs(&mut r)?;
        } else {
            classes = class_info::read_classes(&mut r)?;
            methods = method_info::read_methods(&mut r)?;
            global_variables = variable::read_variables(&mut r, GlobalVariableInfo::from)?;
            structs = struct_info::read_structs(&mut r)?;
            dll_declares = dll_declare::read_dll_declares(&mut r)?;
        }

        Ok(CodeSection {
            allocated_id_counter,
            unknown_before_library_1,
            unknown_before_library_2,
            unknown_before_library_3,
            libraries,
            flag,
            main_method,
            pre_icon_block,
            icon_data,
            debug_command_parameters,
            classes,
            methods,
            global_variables,
            structs,
            dll_declares,
            variant: self.variant,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::cursor::SectionWriter;

    /// Minimal plain-variant section: empty blocks, no entities.
    fn minimal_plain_bytes(marker: i32) -> Vec<u8> {
        let mut w = SectionWriter::new();
        w.write_i32(0).unwrap(); // counter
        w.write_i32(marker).unwrap();
        for _ in 0..3 {
            w.write_bytes_with_length_prefix(&[]).unwrap(); // unknown 1..3
        }
        w.write_string_with_length_prefix("").unwrap(); // empty library table
        w.write_i32(0).unwrap(); // flag
        w.write_i32(0).unwrap(); // main method
        w.write_bytes_with_length_prefix(&[]).unwrap(); // icon
        w.write_string_with_length_prefix("").unwrap(); // debug params
        for _ in 0..5 {
            w.write_i32(0).unwrap(); // empty entity tables
        }
        w.into_bytes()
    }

    #[test]
    fn test_minimal_section_decodes() {
        let data = minimal_plain_bytes(VERSION_MARKER);
        let mut reader = CodeSectionReader::new(&data, FormatVariant::Plain);
        let section = reader.read().unwrap();
        assert!(reader.notifications().is_empty());
        assert!(section.classes.is_empty());
        assert!(section.pre_icon_block.is_none());
        assert_eq!(section.variant(), FormatVariant::Plain);
    }

    #[test]
    fn test_version_marker_mismatch_warns() {
        let data = minimal_plain_bytes(0);
        let mut reader = CodeSectionReader::new(&data, FormatVariant::Plain);
        reader.read().unwrap();
        assert!(reader
            .notifications()
            .has_type(NotificationType::Warning));
    }

    #[test]
    fn test_truncated_header_fails() {
        let data = [1, 0, 0];
        let mut reader = CodeSectionReader::new(&data, FormatVariant::Plain);
        assert!(matches!(
            reader.read().unwrap_err(),
            crate::error::EplError::TruncatedInput { .. }
        ));
    }

    #[test]
    fn test_flag_bit_gates_pre_icon_block() {
        // flag = 1 but no 16-byte block present before the icon data
        let mut w = SectionWriter::new();
        w.write_i32(0).unwrap();
        w.write_i32(VERSION_MARKER).unwrap();
        for _ in 0..3 {
            w.write_bytes_with_length_prefix(&[]).unwrap();
        }
        w.write_string_with_length_prefix("").unwrap();
        w.write_i32(1).unwrap(); // flag bit 0 set
        w.write_i32(0).unwrap();
        let data = w.into_bytes();

        let mut reader = CodeSectionReader::new(&data, FormatVariant::Plain);
        // runs out of input reading the 16-byte block
        assert!(reader.read().is_err());
    }
}
