//! Class records
//!
//! Record blob layout: id, base-class id, flags, name, comment, method-id
//! list, member-variable table. A class stores the ids of its methods; the
//! method records themselves live in the section's top-level method table,
//! so rendering a class body needs the section as resolution context.

use crate::code_section::CodeSection;
use crate::error::Result;
use crate::io::cursor::{SectionReader, SectionWriter};
use crate::render::{push_comment, push_indent, write_join_code, ToTextCode};
use crate::types::id::EplId;
use crate::types::name_map::IdToNameMap;

use super::variable::{read_variables, write_variables, ClassVariableInfo};
use super::{read_record_table, write_record_table, FLAG_PUBLIC};

/// A class declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassInfo {
    /// Identifier of the class.
    pub id: EplId,
    /// Id of the base class; null when the class has no base.
    pub base_class: EplId,
    /// Flag word (bit 0 public).
    pub flags: i32,
    /// Declared name.
    pub name: String,
    /// Declaration comment.
    pub comment: String,
    /// Ids of the class's methods, resolved against the section.
    pub method_ids: Vec<EplId>,
    /// Member variables, in declaration order.
    pub variables: Vec<ClassVariableInfo>,
}

impl ClassInfo {
    /// Check bit 0 of the flag word.
    pub fn is_public(&self) -> bool {
        self.flags & FLAG_PUBLIC != 0
    }

    fn read(r: &mut SectionReader<'_>) -> Result<Self> {
        let id = EplId::from_raw(r.read_i32()?);
        let base_class = EplId::from_raw(r.read_i32()?);
        let flags = r.read_i32()?;
        let name = r.read_string_with_length_prefix()?;
        let comment = r.read_string_with_length_prefix()?;
        let method_count = r.read_i32()?;
        let mut method_ids = Vec::with_capacity((method_count.max(0) as usize).min(1024));
        for _ in 0..method_count.max(0) {
            method_ids.push(EplId::from_raw(r.read_i32()?));
        }
        let variables = read_variables(r, ClassVariableInfo::from)?;
        Ok(Self {
            id,
            base_class,
            flags,
            name,
            comment,
            method_ids,
            variables,
        })
    }

    fn write(&self, w: &mut SectionWriter) -> Result<()> {
        w.write_i32(self.id.as_raw())?;
        w.write_i32(self.base_class.as_raw())?;
        w.write_i32(self.flags)?;
        w.write_string_with_length_prefix(&self.name)?;
        w.write_string_with_length_prefix(&self.comment)?;
        w.write_i32(self.method_ids.len() as i32)?;
        for id in &self.method_ids {
            w.write_i32(id.as_raw())?;
        }
        write_variables(w, &self.variables, |v| &v.base)
    }

    /// Render this class as a block.
    ///
    /// When `section` is provided, the class's method ids are resolved
    /// against the section's top-level method table and the methods are
    /// rendered inside the class body; `write_code` controls whether their
    /// compiled bodies are noted.
    pub fn render(
        &self,
        section: Option<&CodeSection>,
        name_map: &IdToNameMap,
        out: &mut String,
        indent: usize,
        write_code: bool,
    ) {
        push_indent(out, indent);
        out.push_str(".class ");
        out.push_str(&name_map.resolve(self.id, &self.name));
        if !self.base_class.is_null() {
            out.push_str(", ");
            out.push_str(&name_map.resolve(self.base_class, ""));
        }
        if self.is_public() {
            out.push_str(", public");
        }
        push_comment(out, &self.comment);
        if !self.variables.is_empty() {
            out.push('\n');
            write_join_code(&self.variables, name_map, out, indent + 1);
        }
        if let Some(section) = section {
            for id in &self.method_ids {
                out.push('\n');
                match section.method_by_id(*id) {
                    Some(method) => method.render(name_map, out, indent + 1, write_code),
                    None => {
                        push_indent(out, indent + 1);
                        out.push_str(&format!("; unresolved method {id}"));
                    }
                }
            }
        }
    }
}

impl ToTextCode for ClassInfo {
    fn to_text_code(&self, name_map: &IdToNameMap, out: &mut String, indent: usize) {
        self.render(None, name_map, out, indent, true);
    }
}

/// Read the class table.
pub fn read_classes(reader: &mut SectionReader<'_>) -> Result<Vec<ClassInfo>> {
    read_record_table(reader, ClassInfo::read)
}

/// Write the class table.
pub fn write_classes(writer: &mut SectionWriter, classes: &[ClassInfo]) -> Result<()> {
    write_record_table(writer, classes, |w, c| c.write(w))
}
