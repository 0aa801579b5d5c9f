//! Struct records
//!
//! Record blob layout: id, flags, name, comment, member table. Members
//! reuse the shared variable layout.

use crate::error::Result;
use crate::io::cursor::{SectionReader, SectionWriter};
use crate::render::{push_comment, push_indent, write_join_code, ToTextCode};
use crate::types::id::EplId;
use crate::types::name_map::IdToNameMap;

use super::variable::{read_variables, write_variables, StructMemberInfo};
use super::{read_record_table, write_record_table, FLAG_PUBLIC};

/// A user-defined struct type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructInfo {
    /// Identifier of the struct.
    pub id: EplId,
    /// Flag word (bit 0 public).
    pub flags: i32,
    /// Declared name.
    pub name: String,
    /// Declaration comment.
    pub comment: String,
    /// Members, in declaration order.
    pub members: Vec<StructMemberInfo>,
}

impl StructInfo {
    /// Check bit 0 of the flag word.
    pub fn is_public(&self) -> bool {
        self.flags & FLAG_PUBLIC != 0
    }

    fn read(r: &mut SectionReader<'_>) -> Result<Self> {
        let id = EplId::from_raw(r.read_i32()?);
        let flags = r.read_i32()?;
        let name = r.read_string_with_length_prefix()?;
        let comment = r.read_string_with_length_prefix()?;
        let members = read_variables(r, StructMemberInfo::from)?;
        Ok(Self {
            id,
            flags,
            name,
            comment,
            members,
        })
    }

    fn write(&self, w: &mut SectionWriter) -> Result<()> {
        w.write_i32(self.id.as_raw())?;
        w.write_i32(self.flags)?;
        w.write_string_with_length_prefix(&self.name)?;
        w.write_string_with_length_prefix(&self.comment)?;
        write_variables(w, &self.members, |m| &m.base)
    }
}

impl ToTextCode for StructInfo {
    fn to_text_code(&self, name_map: &IdToNameMap, out: &mut String, indent: usize) {
        push_indent(out, indent);
        out.push_str(".struct ");
        out.push_str(&name_map.resolve(self.id, &self.name));
        if self.is_public() {
            out.push_str(", public");
        }
        push_comment(out, &self.comment);
        if !self.members.is_empty() {
            out.push('\n');
            write_join_code(&self.members, name_map, out, indent + 1);
        }
    }
}

/// Read the struct table.
pub fn read_structs(reader: &mut SectionReader<'_>) -> Result<Vec<StructInfo>> {
    read_record_table(reader, StructInfo::read)
}

/// Write the struct table.
pub fn write_structs(writer: &mut SectionWriter, structs: &[StructInfo]) -> Result<()> {
    write_record_table(writer, structs, |w, s| s.write(w))
}
