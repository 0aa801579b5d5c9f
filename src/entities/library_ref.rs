//! Referenced support-library records
//!
//! The library list is stored as one length-prefixed GBK string of
//! CRLF-joined rows, five TAB-separated fields per row. Row order is
//! load-significant: later code refers to libraries by index.

use crate::error::{EplError, Result};
use crate::io::cursor::{SectionReader, SectionWriter};

/// A reference to a support library used by the program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryRefInfo {
    /// Library file name without extension (e.g. `krnln`).
    pub file_name: String,
    /// Library GUID string.
    pub guid: String,
    /// Required major version.
    pub major_version: i32,
    /// Required minor version.
    pub minor_version: i32,
    /// Display name of the library.
    pub name: String,
}

impl LibraryRefInfo {
    fn from_row(row: &str) -> Result<Self> {
        let fields: Vec<&str> = row.split('\t').collect();
        if fields.len() != 5 {
            return Err(EplError::InvalidFormat(format!(
                "library row has {} field(s), expected 5",
                fields.len()
            )));
        }
        let major_version = fields[2].parse::<i32>().map_err(|_| {
            EplError::InvalidFormat(format!("bad library major version {:?}", fields[2]))
        })?;
        let minor_version = fields[3].parse::<i32>().map_err(|_| {
            EplError::InvalidFormat(format!("bad library minor version {:?}", fields[3]))
        })?;
        Ok(Self {
            file_name: fields[0].to_string(),
            guid: fields[1].to_string(),
            major_version,
            minor_version,
            name: fields[4].to_string(),
        })
    }

    fn to_row(&self) -> Result<String> {
        for field in [&self.file_name, &self.guid, &self.name] {
            if field.contains('\t') || field.contains('\r') || field.contains('\n') {
                return Err(EplError::InvalidFormat(format!(
                    "library field {field:?} contains a table delimiter"
                )));
            }
        }
        Ok(format!(
            "{}\t{}\t{}\t{}\t{}",
            self.file_name, self.guid, self.major_version, self.minor_version, self.name
        ))
    }
}

/// Read the ordered library table.
pub fn read_libraries(reader: &mut SectionReader<'_>) -> Result<Vec<LibraryRefInfo>> {
    let table = reader.read_string_with_length_prefix()?;
    if table.is_empty() {
        return Ok(Vec::new());
    }
    table.split("\r\n").map(LibraryRefInfo::from_row).collect()
}

/// Write the ordered library table.
pub fn write_libraries(writer: &mut SectionWriter, libraries: &[LibraryRefInfo]) -> Result<()> {
    let rows = libraries
        .iter()
        .map(LibraryRefInfo::to_row)
        .collect::<Result<Vec<_>>>()?;
    writer.write_string_with_length_prefix(&rows.join("\r\n"))
}
