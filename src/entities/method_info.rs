//! Method records
//!
//! Record blob layout: id, owning class id, flags, return type, name,
//! comment, parameter table, local-variable table, compiled body bytes.
//! The body is an opaque blob; decompiling statements is out of scope.

use crate::error::Result;
use crate::io::cursor::{SectionReader, SectionWriter};
use crate::render::{push_comment, push_indent, write_join_code, ToTextCode};
use crate::types::data_type::type_name;
use crate::types::id::EplId;
use crate::types::name_map::IdToNameMap;

use super::variable::{read_variables, write_variables, LocalVariableInfo, MethodParameterInfo};
use super::{read_record_table, write_record_table, FLAG_PUBLIC};

/// A method (top-level or class-owned).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodInfo {
    /// Identifier of the method.
    pub id: EplId,
    /// Id of the owning class; null for top-level methods.
    pub class_id: EplId,
    /// Flag word (bit 0 public).
    pub flags: i32,
    /// Return-type code; 0 for no return value.
    pub return_type: i32,
    /// Declared name.
    pub name: String,
    /// Declaration comment.
    pub comment: String,
    /// Parameters, in declaration order.
    pub parameters: Vec<MethodParameterInfo>,
    /// Local variables, in declaration order.
    pub local_variables: Vec<LocalVariableInfo>,
    /// Opaque compiled body.
    pub code_data: Vec<u8>,
}

impl MethodInfo {
    /// Check bit 0 of the flag word.
    pub fn is_public(&self) -> bool {
        self.flags & FLAG_PUBLIC != 0
    }

    fn read(r: &mut SectionReader<'_>) -> Result<Self> {
        let id = EplId::from_raw(r.read_i32()?);
        let class_id = EplId::from_raw(r.read_i32()?);
        let flags = r.read_i32()?;
        let return_type = r.read_i32()?;
        let name = r.read_string_with_length_prefix()?;
        let comment = r.read_string_with_length_prefix()?;
        let parameters = read_variables(r, MethodParameterInfo::from)?;
        let local_variables = read_variables(r, LocalVariableInfo::from)?;
        let code_data = r.read_bytes_with_length_prefix()?;
        Ok(Self {
            id,
            class_id,
            flags,
            return_type,
            name,
            comment,
            parameters,
            local_variables,
            code_data,
        })
    }

    fn write(&self, w: &mut SectionWriter) -> Result<()> {
        w.write_i32(self.id.as_raw())?;
        w.write_i32(self.class_id.as_raw())?;
        w.write_i32(self.flags)?;
        w.write_i32(self.return_type)?;
        w.write_string_with_length_prefix(&self.name)?;
        w.write_string_with_length_prefix(&self.comment)?;
        write_variables(w, &self.parameters, |p| &p.base)?;
        write_variables(w, &self.local_variables, |v| &v.base)?;
        w.write_bytes_with_length_prefix(&self.code_data)
    }

    /// Render this method as a block, optionally including the body note.
    pub fn render(
        &self,
        name_map: &IdToNameMap,
        out: &mut String,
        indent: usize,
        write_code: bool,
    ) {
        push_indent(out, indent);
        out.push_str(".method ");
        out.push_str(&name_map.resolve(self.id, &self.name));
        if self.return_type != 0 {
            out.push_str(", ");
            out.push_str(&type_name(self.return_type, name_map));
        }
        if self.is_public() {
            out.push_str(", public");
        }
        push_comment(out, &self.comment);
        if !self.parameters.is_empty() {
            out.push('\n');
            write_join_code(&self.parameters, name_map, out, indent + 1);
        }
        if !self.local_variables.is_empty() {
            out.push('\n');
            write_join_code(&self.local_variables, name_map, out, indent + 1);
        }
        if write_code && !self.code_data.is_empty() {
            out.push('\n');
            push_indent(out, indent + 1);
            out.push_str(&format!("; {}-byte compiled body", self.code_data.len()));
        }
    }
}

impl ToTextCode for MethodInfo {
    fn to_text_code(&self, name_map: &IdToNameMap, out: &mut String, indent: usize) {
        self.render(name_map, out, indent, true);
    }
}

/// Read the method table.
pub fn read_methods(reader: &mut SectionReader<'_>) -> Result<Vec<MethodInfo>> {
    read_record_table(reader, MethodInfo::read)
}

/// Write the method table.
pub fn write_methods(writer: &mut SectionWriter, methods: &[MethodInfo]) -> Result<()> {
    write_record_table(writer, methods, |w, m| m.write(w))
}
