//! Core data model for the graph mapper.
//!
//! This crate holds everything the registry and the compiler share:
//!
//! - [`TypeHash`], [`Class`] and [`Object`]: class identity and runtime classes
//! - [`Label`], [`SelectionNode`] and [`SelectionGraph`]: which fields to populate
//! - [`ClassNode`]: target/source class hierarchies for polymorphic slots
//! - [`SourceField`], [`TargetField`] and [`AccessorTable`]: typed field access
//! - [`InitializationError`], [`MappingError`] and [`GraphMapperError`]

mod accessor;
mod class;
mod class_tree;
mod error;
mod field;
mod label;
mod selection;
mod type_hash;

pub use accessor::{AccessorTable, Accessors, Getter, Setter, accessor_key};
pub use class::{Class, ClassInfo, ClassKind, Object};
pub use class_tree::{ClassNode, Descendants};
pub use error::{AccessorKind, GraphMapperError, InitializationError, MappingError};
pub use field::{
    Cardinality, Extracted, FromMapped, Mapped, ObjectHandle, Related, SourceField, TargetField,
};
pub use label::Label;
pub use selection::{SelectionGraph, SelectionNode, group_children};
pub use type_hash::{TypeHash, hash_constants};
