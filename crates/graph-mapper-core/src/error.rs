//! Error types for the graph mapper.
//!
//! ## Error Hierarchy
//!
//! ```text
//! GraphMapperError (top-level wrapper)
//! ├── InitializationError - setup-time defects (bindings, hierarchies, compilation)
//! └── MappingFailed       - one `map` call failed, carries the MappingError cause
//! ```
//!
//! Initialization errors are meant to abort startup. A [`MappingError`] is
//! raised by an individual mapper primitive and is wrapped exactly once, at
//! the compiled mapper's entry point.

use thiserror::Error;

use crate::Cardinality;

// ============================================================================
// Initialization Errors
// ============================================================================

/// Which half of an accessor pair could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    Getter,
    Setter,
}

impl std::fmt::Display for AccessorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessorKind::Getter => write!(f, "getter"),
            AccessorKind::Setter => write!(f, "setter"),
        }
    }
}

/// Errors raised while populating the registry or compiling a mapper.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InitializationError {
    /// No accessor matching the label exists on the class.
    #[error("{class} has no {kind} for '{member}'")]
    MissingAccessor {
        class: String,
        member: String,
        kind: AccessorKind,
    },

    /// The accessor exists but its field shape does not fit the binding.
    #[error("{kind} '{member}' on {class} holds a {found} value, expected {expected}")]
    CardinalityMismatch {
        class: String,
        member: String,
        kind: AccessorKind,
        expected: Cardinality,
        found: Cardinality,
    },

    /// The setter's element type is polymorphic and no element class was given.
    #[error("cannot infer the element class of setter '{member}' on {class}")]
    UnknownElementClass { class: String, member: String },

    #[error("{class} is not an interface")]
    NotAnInterface { class: String },

    #[error("{class} declares a method, so it is not a union")]
    NotAUnion { class: String },

    #[error("{class} is not an abstract class")]
    NotAbstract { class: String },

    /// Two nodes of one hierarchy map the same source class.
    #[error("source class {class} appears twice in the hierarchy rooted at {root}")]
    DuplicateSubtype { class: String, root: String },

    /// A class reachable from the selection has no scalar mapper.
    #[error("no scalar mapper registered for {class}")]
    MissingScalarMapper { class: String },

    /// Two sibling selection nodes share a label and the compiler rejects that.
    #[error("label '{label}' is selected more than once under '{parent}'")]
    DuplicateLabel { parent: String, label: String },
}

// ============================================================================
// Mapping Errors
// ============================================================================

/// Errors raised by mapper primitives during one `map` call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MappingError {
    /// A getter received an object that is neither its class nor a subclass of it.
    #[error("expected source of class {expected}, found {found}")]
    SourceMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A setter or the entry point received a target of the wrong class.
    #[error("expected target of class {expected}, found {found}")]
    TargetMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The runtime class of a polymorphic value has no dispatch table entry.
    #[error("no mapping registered for runtime class {class}")]
    UnregisteredSubtype { class: &'static str },

    /// A single value was produced for a collection slot or the other way around.
    #[error("expected a {expected} value, found {found}")]
    CardinalityMismatch {
        expected: Cardinality,
        found: Cardinality,
    },

    #[error("no scalar mapper registered for {class}")]
    MissingScalarMapper { class: &'static str },
}

// ============================================================================
// Top-level Error
// ============================================================================

/// Error returned by the public entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphMapperError {
    #[error(transparent)]
    Initialization(#[from] InitializationError),

    /// One `map` call failed. `class` is the runtime class of the top-level source.
    #[error("mapping failed for instance of {class}")]
    MappingFailed {
        class: &'static str,
        #[source]
        source: MappingError,
    },
}

impl GraphMapperError {
    /// The underlying mapping error, if this is a mapping failure.
    pub fn mapping_error(&self) -> Option<&MappingError> {
        match self {
            GraphMapperError::MappingFailed { source, .. } => Some(source),
            GraphMapperError::Initialization(_) => None,
        }
    }
}
