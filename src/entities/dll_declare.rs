//! DLL command declaration records
//!
//! Record blob layout: id, flags, return type, name, comment, library
//! file name, entry-point name, parameter table.

use crate::error::Result;
use crate::io::cursor::{SectionReader, SectionWriter};
use crate::render::{push_comment, push_indent, write_join_code, ToTextCode};
use crate::types::data_type::type_name;
use crate::types::id::EplId;
use crate::types::name_map::IdToNameMap;

use super::variable::{read_variables, write_variables, DllParameterInfo};
use super::{read_record_table, write_record_table, FLAG_PUBLIC};

/// A declared DLL import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DllDeclareInfo {
    /// Identifier of the declaration.
    pub id: EplId,
    /// Flag word (bit 0 public).
    pub flags: i32,
    /// Return-type code; 0 for no return value.
    pub return_type: i32,
    /// Declared name used from code.
    pub name: String,
    /// Declaration comment.
    pub comment: String,
    /// DLL file name (e.g. `user32.dll`).
    pub library_file: String,
    /// Exported symbol to bind (e.g. `MessageBoxA`).
    pub entry_point: String,
    /// Parameters, in declaration order.
    pub parameters: Vec<DllParameterInfo>,
}

impl DllDeclareInfo {
    /// Check bit 0 of the flag word.
    pub fn is_public(&self) -> bool {
        self.flags & FLAG_PUBLIC != 0
    }

    fn read(r: &mut SectionReader<'_>) -> Result<Self> {
        let id = EplId::from_raw(r.read_i32()?);
        let flags = r.read_i32()?;
        let return_type = r.read_i32()?;
        let name = r.read_string_with_length_prefix()?;
        let comment = r.read_string_with_length_prefix()?;
        let library_file = r.read_string_with_length_prefix()?;
        let entry_point = r.read_string_with_length_prefix()?;
        let parameters = read_variables(r, DllParameterInfo::from)?;
        Ok(Self {
            id,
            flags,
            return_type,
            name,
            comment,
            library_file,
            entry_point,
            parameters,
        })
    }

    fn write(&self, w: &mut SectionWriter) -> Result<()> {
        w.write_i32(self.id.as_raw())?;
        w.write_i32(self.flags)?;
        w.write_i32(self.return_type)?;
        w.write_string_with_length_prefix(&self.name)?;
        w.write_string_with_length_prefix(&self.comment)?;
        w.write_string_with_length_prefix(&self.library_file)?;
        w.write_string_with_length_prefix(&self.entry_point)?;
        write_variables(w, &self.parameters, |p| &p.base)
    }
}

impl ToTextCode for DllDeclareInfo {
    fn to_text_code(&self, name_map: &IdToNameMap, out: &mut String, indent: usize) {
        push_indent(out, indent);
        out.push_str(".dll_cmd ");
        out.push_str(&name_map.resolve(self.id, &self.name));
        if self.return_type != 0 {
            out.push_str(", ");
            out.push_str(&type_name(self.return_type, name_map));
        }
        out.push_str(&format!(
            ", \"{}\", \"{}\"",
            self.library_file, self.entry_point
        ));
        if self.is_public() {
            out.push_str(", public");
        }
        push_comment(out, &self.comment);
        if !self.parameters.is_empty() {
            out.push('\n');
            write_join_code(&self.parameters, name_map, out, indent + 1);
        }
    }
}

/// Read the DLL declaration table.
pub fn read_dll_declares(reader: &mut SectionReader<'_>) -> Result<Vec<DllDeclareInfo>> {
    read_record_table(reader, DllDeclareInfo::read)
}

/// Write the DLL declaration table.
pub fn write_dll_declares(writer: &mut SectionWriter, declares: &[DllDeclareInfo]) -> Result<()> {
    write_record_table(writer, declares, |w, d| d.write(w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::variable::VariableBase;
    use crate::types::id::{TAG_DLL_DECLARE, TAG_METHOD_PARAMETER};

    fn message_box() -> DllDeclareInfo {
        DllDeclareInfo {
            id: EplId::from_raw(TAG_DLL_DECLARE | 1),
            flags: FLAG_PUBLIC,
            return_type: 3,
            name: "message_box".to_string(),
            comment: String::new(),
            library_file: "user32.dll".to_string(),
            entry_point: "MessageBoxA".to_string(),
            parameters: vec![DllParameterInfo::from(VariableBase {
                id: EplId::from_raw(TAG_METHOD_PARAMETER | 2),
                data_type: 9,
                name: "text".to_string(),
                ..Default::default()
            })],
        }
    }

    #[test]
    fn test_dll_declare_round_trip() {
        let declares = vec![message_box()];
        let mut w = SectionWriter::new();
        write_dll_declares(&mut w, &declares).unwrap();
        let buf = w.into_bytes();

        let mut r = SectionReader::new(&buf);
        let back = read_dll_declares(&mut r).unwrap();
        assert_eq!(back, declares);
    }

    #[test]
    fn test_dll_declare_render() {
        let mut out = String::new();
        message_box().to_text_code(&IdToNameMap::new(), &mut out, 0);
        assert_eq!(
            out,
            ".dll_cmd message_box, int, \"user32.dll\", \"MessageBoxA\", public\n\
             \x20   .param text, text"
        );
    }
}
