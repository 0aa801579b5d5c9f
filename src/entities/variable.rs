//! Variable records and the generic variable reader
//!
//! Global variables, method locals, method parameters, class members,
//! struct members, and DLL parameters all share one binary layout. The
//! reader is generic over a wrapping constructor so each kind gets its own
//! type without duplicating the parsing logic.

use crate::error::Result;
use crate::io::cursor::{SectionReader, SectionWriter};
use crate::render::{push_comment, push_indent, ToTextCode};
use crate::types::data_type::type_name;
use crate::types::id::EplId;
use crate::types::name_map::IdToNameMap;

use super::{read_record_table, write_record_table, FLAG_PUBLIC};

/// Bit 1 of a variable flag word: the variable is static.
pub const FLAG_STATIC: i32 = 0x2;

/// Fields common to every variable kind.
///
/// Layout inside a record blob: id, data type, flags, array-bound count
/// plus bounds, name, comment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableBase {
    /// Identifier of the variable.
    pub id: EplId,
    /// Data-type code (built-in code or struct/class id).
    pub data_type: i32,
    /// Flag word (bit 0 public, bit 1 static).
    pub flags: i32,
    /// Array dimensions; empty for a scalar, 0 for a dynamic bound.
    pub bounds: Vec<i32>,
    /// Declared name (may be empty; names can live outside the section).
    pub name: String,
    /// Declaration comment.
    pub comment: String,
}

impl VariableBase {
    /// Check bit 0 of the flag word.
    pub fn is_public(&self) -> bool {
        self.flags & FLAG_PUBLIC != 0
    }

    /// Check bit 1 of the flag word.
    pub fn is_static(&self) -> bool {
        self.flags & FLAG_STATIC != 0
    }

    pub(crate) fn read(r: &mut SectionReader<'_>) -> Result<Self> {
        let id = EplId::from_raw(r.read_i32()?);
        let data_type = r.read_i32()?;
        let flags = r.read_i32()?;
        let bound_count = r.read_i32()?;
        let mut bounds = Vec::with_capacity((bound_count.max(0) as usize).min(64));
        for _ in 0..bound_count.max(0) {
            bounds.push(r.read_i32()?);
        }
        let name = r.read_string_with_length_prefix()?;
        let comment = r.read_string_with_length_prefix()?;
        Ok(Self {
            id,
            data_type,
            flags,
            bounds,
            name,
            comment,
        })
    }

    pub(crate) fn write(&self, w: &mut SectionWriter) -> Result<()> {
        w.write_i32(self.id.as_raw())?;
        w.write_i32(self.data_type)?;
        w.write_i32(self.flags)?;
        w.write_i32(self.bounds.len() as i32)?;
        for bound in &self.bounds {
            w.write_i32(*bound)?;
        }
        w.write_string_with_length_prefix(&self.name)?;
        w.write_string_with_length_prefix(&self.comment)
    }

    /// Render one declaration line: `.{keyword} name, type[, [bounds]][, static][, public][; comment]`.
    pub(crate) fn render_line(
        &self,
        keyword: &str,
        name_map: &IdToNameMap,
        out: &mut String,
        indent: usize,
    ) {
        push_indent(out, indent);
        out.push('.');
        out.push_str(keyword);
        out.push(' ');
        out.push_str(&name_map.resolve(self.id, &self.name));
        out.push_str(", ");
        out.push_str(&type_name(self.data_type, name_map));
        if !self.bounds.is_empty() {
            out.push_str(", [");
            for (i, bound) in self.bounds.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&bound.to_string());
            }
            out.push(']');
        }
        if self.is_static() {
            out.push_str(", static");
        }
        if self.is_public() {
            out.push_str(", public");
        }
        push_comment(out, &self.comment);
    }
}

/// Read a variable table, wrapping each base record with `wrap`.
///
/// The same binary layout backs every variable kind; the constructor
/// argument decides which wrapper type is built.
pub fn read_variables<T, F>(reader: &mut SectionReader<'_>, wrap: F) -> Result<Vec<T>>
where
    F: Fn(VariableBase) -> T,
{
    read_record_table(reader, |r| VariableBase::read(r).map(&wrap))
}

/// Write a variable table; `base` projects each wrapper back to its base.
pub fn write_variables<T, F>(writer: &mut SectionWriter, items: &[T], base: F) -> Result<()>
where
    F: Fn(&T) -> &VariableBase,
{
    write_record_table(writer, items, |w, item| base(item).write(w))
}

macro_rules! variable_kind {
    ($(#[$doc:meta])* $name:ident, $keyword:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            /// The shared variable fields.
            pub base: VariableBase,
        }

        impl From<VariableBase> for $name {
            fn from(base: VariableBase) -> Self {
                Self { base }
            }
        }

        impl ToTextCode for $name {
            fn to_text_code(&self, name_map: &IdToNameMap, out: &mut String, indent: usize) {
                self.base.render_line($keyword, name_map, out, indent);
            }
        }
    };
}

variable_kind!(
    /// A section-level global variable.
    GlobalVariableInfo,
    "global"
);
variable_kind!(
    /// A method-local variable.
    LocalVariableInfo,
    "local"
);
variable_kind!(
    /// A method parameter.
    MethodParameterInfo,
    "param"
);
variable_kind!(
    /// A class member variable.
    ClassVariableInfo,
    "member"
);
variable_kind!(
    /// A struct member.
    StructMemberInfo,
    "member"
);
variable_kind!(
    /// A DLL command parameter.
    DllParameterInfo,
    "param"
);
