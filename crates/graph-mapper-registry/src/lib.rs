//! Binding registry for the graph mapper.
//!
//! Setup code declares here how target classes relate to source classes:
//!
//! - scalar mappers that allocate target instances ([`BindingRegistry::register_mapper`])
//! - class hierarchies for polymorphic slots ([`BindingRegistry::declare_hierarchy`])
//! - relation bindings resolved by label ([`BindingRegistry::bind`])
//!
//! The compiler crate turns this state into immutable mappers.

mod binding;
mod registry;

pub use binding::{BindingBuilder, ReferenceBinding};
pub use registry::{BindingRegistry, ScalarMapper, Unproxy};
