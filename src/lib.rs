//! # eplfile
//!
//! A pure Rust library for reading and writing the code section of EPL
//! (Easy Programming Language) compiled project archives.
//!
//! The code section is a proprietary binary container holding a program's
//! classes, methods, global variables, structs, DLL import declarations,
//! referenced libraries, and auxiliary metadata (icon resource, debug
//! arguments). Two historical on-disk layouts exist: a plain layout and
//! an older "encrypted EC" layout with reordered fields. Both decode
//! into the same [`CodeSection`]. Byte ranges whose meaning is
//! undocumented are preserved bit-for-bit across a read-modify-write
//! round trip.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use eplfile::{CodeSection, FormatVariant, IdToNameMap};
//!
//! // Decode the section bytes extracted from an archive
//! let mut section = CodeSection::decode(&bytes, FormatVariant::Plain)?;
//!
//! // Allocate an id for a new method
//! let id = section.alloc_id(eplfile::types::id::TAG_METHOD)?;
//!
//! // Render a pseudo-source view
//! let mut text = String::new();
//! section.to_text_code(&IdToNameMap::new(), &mut text, 0, true, true);
//!
//! // Re-encode (always in the plain layout)
//! let bytes = section.encode()?;
//! # Ok::<(), eplfile::EplError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`CodeSection`] — the aggregate root owning all entity lists
//! - [`io::CodeSectionReader`] / [`io::CodeSectionWriter`] — the
//!   variant-aware section codec
//! - [`entities`] — per-kind record codecs (classes, methods, variables,
//!   structs, DLL declarations, library references)
//! - [`render::ToTextCode`] — pseudo-source text generation
//!
//! Decode, encode, and render are pure sequential passes over in-memory
//! buffers; nothing in this crate performs I/O scheduling or locking.

#![warn(rustdoc::missing_crate_level_docs)]

pub mod code_section;
pub mod entities;
pub mod error;
pub mod io;
pub mod notification;
pub mod render;
pub mod types;

// Re-export commonly used types
pub use code_section::{CodeSection, FormatVariant, SectionFlags};
pub use error::{EplError, Result};
pub use types::{DataType, EplId, IdToNameMap};

// Re-export entity types
pub use entities::{
    ClassInfo, DllDeclareInfo, GlobalVariableInfo, LibraryRefInfo, MethodInfo, StructInfo,
};

// Re-export I/O types
pub use io::{CodeSectionReader, CodeSectionWriter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
