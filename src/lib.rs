//! Graph mapper: copy only the selected part of a polymorphic object graph.
//!
//! Setup code fills a [`BindingRegistry`] with scalar mappers, class
//! hierarchies and relation bindings. A [`MapperFactory`] then compiles a
//! [`SelectionGraph`] into a [`GraphMapper`], an immutable tree of dispatch
//! tables that populates exactly the selected relations of the target graph.
//!
//! ```ignore
//! use graph_mapper::prelude::*;
//!
//! let mut registry = BindingRegistry::new();
//! registry.register_mapper(|e: &WeekMenuEntity| WeekMenuDto::from(e));
//! registry.bind::<WeekMenuDto, WeekMenuEntity>().list_field(DAY_MENUS)?;
//!
//! let selection = SelectionGraph::new([SelectionNode::new(DAY_MENUS)]);
//! let mapper = MapperFactory::new(&registry).compile::<WeekMenuDto, _>(&selection)?;
//! let dto = mapper.map(&week_menu)?;
//! ```

pub use graph_mapper_compiler::{
    ClassMapping, CompiledReference, CompilerConfig, Dispatch, DispatchTable, DuplicateLabels,
    DynamicDispatch, GraphMapper, MapperFactory, NodeMapper, StaticDispatch,
};
pub use graph_mapper_core::{
    AccessorKind, AccessorTable, Accessors, Cardinality, Class, ClassInfo, ClassKind, ClassNode,
    Extracted, FromMapped, GraphMapperError, InitializationError, Label, Mapped, MappingError,
    Object, ObjectHandle, Related, SelectionGraph, SelectionNode, SourceField, TargetField,
    TypeHash,
};
pub use graph_mapper_registry::{
    BindingBuilder, BindingRegistry, ReferenceBinding, ScalarMapper, Unproxy,
};

/// Derive macros for [`Class`] and [`Accessors`].
pub mod macros {
    pub use graph_mapper_macros::*;
}

pub use graph_mapper_macros::{Accessors, Class};

/// The mapper primitives, for code that inspects compiled mappers.
pub mod primitives {
    pub use graph_mapper_compiler::{
        CollectionNodeMapper, DynamicObjectNodeMapper, HeterogeneousListNodeMapper,
        HeterogeneousSetNodeMapper, ListNodeMapper, ObjectNodeMapper, ReferenceNodeMapper,
        SetNodeMapper,
    };
}

pub mod prelude {
    pub use crate::{
        Accessors, BindingRegistry, Class, ClassNode, CompilerConfig, DuplicateLabels,
        GraphMapper, GraphMapperError, InitializationError, Label, MapperFactory, MappingError,
        Object, ObjectHandle, SelectionGraph, SelectionNode,
    };
}
