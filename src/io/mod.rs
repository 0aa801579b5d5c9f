//! Binary I/O for the code section

pub mod cursor;
pub mod reader;
pub mod writer;

pub use cursor::{SectionReader, SectionWriter};
pub use reader::{CodeSectionReader, VERSION_MARKER};
pub use writer::CodeSectionWriter;
