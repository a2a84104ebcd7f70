//! Shared types for directory verification

pub mod code;
pub mod entry;

pub use code::ErrorCode;
pub use entry::{AttributeValue, Cardinality, DirectoryEntry, NormalizedAttributes};
