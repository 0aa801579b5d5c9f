//! Entity record types stored in a code section
//!
//! Every entity kind exposes a paired `read_*` / `write_*` contract over
//! the section cursor plus a render implementation for text output. Apart
//! from the text-based library table, all kinds share the same framing: an
//! `i32` record count followed by one length-prefixed blob per record.

pub mod class_info;
pub mod dll_declare;
pub mod library_ref;
pub mod method_info;
pub mod struct_info;
pub mod variable;

pub use class_info::ClassInfo;
pub use dll_declare::DllDeclareInfo;
pub use library_ref::LibraryRefInfo;
pub use method_info::MethodInfo;
pub use struct_info::StructInfo;
pub use variable::{
    ClassVariableInfo, DllParameterInfo, GlobalVariableInfo, LocalVariableInfo,
    MethodParameterInfo, StructMemberInfo, VariableBase,
};

use crate::error::{EplError, Result};
use crate::io::cursor::{SectionReader, SectionWriter};

/// Bit 0 of an entity flag word: the entity is public.
pub const FLAG_PUBLIC: i32 = 0x1;

/// Read a record table: `i32` count, then one length-prefixed blob per
/// record. Each blob must be consumed exactly by `parse`.
pub(crate) fn read_record_table<T, F>(reader: &mut SectionReader<'_>, parse: F) -> Result<Vec<T>>
where
    F: Fn(&mut SectionReader<'_>) -> Result<T>,
{
    let count = reader.read_i32()?;
    if count < 0 {
        return Err(EplError::InvalidFormat(format!(
            "negative record count {count}"
        )));
    }
    let mut items = Vec::with_capacity((count as usize).min(1024));
    for index in 0..count as usize {
        let blob = reader.read_bytes_with_length_prefix()?;
        let mut sub = SectionReader::new(&blob);
        let item = parse(&mut sub)?;
        let consumed = sub.position() as usize;
        if consumed != blob.len() {
            return Err(EplError::RecordLength {
                index,
                declared: blob.len(),
                consumed,
            });
        }
        items.push(item);
    }
    Ok(items)
}

/// Write a record table with the same framing `read_record_table` expects.
pub(crate) fn write_record_table<T, F>(
    writer: &mut SectionWriter,
    items: &[T],
    write: F,
) -> Result<()>
where
    F: Fn(&mut SectionWriter, &T) -> Result<()>,
{
    if items.len() > i32::MAX as usize {
        return Err(EplError::InvalidFormat(format!(
            "record count {} exceeds the i32 prefix",
            items.len()
        )));
    }
    writer.write_i32(items.len() as i32)?;
    for item in items {
        let mut sub = SectionWriter::new();
        write(&mut sub, item)?;
        writer.write_bytes_with_length_prefix(&sub.into_bytes())?;
    }
    Ok(())
}
