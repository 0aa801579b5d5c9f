//! Code-section writer
//!
//! Serializes a [`CodeSection`] back to bytes. The writer always emits the
//! canonical plain-variant field order: legacy-crypt input is
//! canonicalized on re-encode. The section retains the variant it was
//! decoded from, so a symmetric legacy writer can be added behind the same
//! flag if a downstream consumer turns out to need byte-identical legacy
//! output.

use crate::code_section::CodeSection;
use crate::entities::{class_info, dll_declare, library_ref, method_info, struct_info, variable};
use crate::error::{EplError, Result};
use crate::io::cursor::SectionWriter;
use crate::io::reader::VERSION_MARKER;

/// Size of the all-zero trailer ending every encoded section.
const TRAILER_LEN: usize = 40;

/// Writer producing the plain-variant byte layout.
#[derive(Debug, Default)]
pub struct CodeSectionWriter;

impl CodeSectionWriter {
    /// Create a writer.
    pub fn new() -> Self {
        Self
    }

    /// Encode the section and return the built buffer.
    ///
    /// Fails with [`EplError::FlagMismatch`] if the pre-icon block's
    /// presence disagrees with flag bit 0. Collaborator write errors
    /// propagate unchanged.
    pub fn write(&self, section: &CodeSection) -> Result<Vec<u8>> {
        let flag_bit = section.flag.bits() & 1;
        let present = section.pre_icon_block.is_some();
        if (flag_bit != 0) != present {
            return Err(EplError::FlagMismatch { flag_bit, present });
        }

        let mut w = SectionWriter::new();
        w.write_i32(section.allocated_id_counter)?;
        w.write_i32(VERSION_MARKER)?;
        w.write_bytes_with_length_prefix(&section.unknown_before_library_1)?;
        w.write_bytes_with_length_prefix(&section.unknown_before_library_2)?;
        w.write_bytes_with_length_prefix(&section.unknown_before_library_3)?;
        library_ref::write_libraries(&mut w, &section.libraries)?;
        w.write_i32(section.flag.bits())?;
        w.write_i32(section.main_method.as_raw())?;
        if let Some(block) = &section.pre_icon_block {
            w.write_bytes(block)?;
        }
        w.write_bytes_with_length_prefix(&section.icon_data)?;
        w.write_string_with_length_prefix(&section.debug_command_parameters)?;
        class_info::write_classes(&mut w, &section.classes)?;
        method_info::write_methods(&mut w, &section.methods)?;
        variable::write_variables(&mut w, &section.global_variables, |v| &v.base)?;
        struct_info::write_structs(&mut w, &section.structs)?;
        dll_declare::write_dll_declares(&mut w, &section.dll_declares)?;
        w.write_zeros(TRAILER_LEN)?;
        Ok(w.into_bytes())
    }
}
