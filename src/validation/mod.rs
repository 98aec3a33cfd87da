//! TOML output validation module

pub mod structure;

pub use structure::{StructureValidator, ValidationReport};
