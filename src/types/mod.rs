//! Core value types shared across the crate

pub mod data_type;
pub mod id;
pub mod name_map;

pub use data_type::{type_name, DataType};
pub use id::EplId;
pub use name_map::IdToNameMap;
