//! Graph mapper compiler.
//!
//! Turns a [`SelectionGraph`](graph_mapper_core::SelectionGraph) and the state
//! of a [`BindingRegistry`](graph_mapper_registry::BindingRegistry) into a
//! [`GraphMapper`]: an immutable tree of dispatch tables and mapper
//! primitives that copies only the selected relations of a source object graph.
//!
//! ```ignore
//! let factory = MapperFactory::new(&registry);
//! let mapper = factory.compile::<WeekMenuDto, _>(&selection)?;
//! let dto = mapper.map(&week_menu_entity)?;
//! ```

mod config;
mod dispatch;
mod factory;
mod mapper;
mod primitives;

pub use config::{CompilerConfig, DuplicateLabels};
pub use dispatch::{
    ClassMapping, CompiledReference, Dispatch, DispatchTable, DynamicDispatch, StaticDispatch,
};
pub use factory::MapperFactory;
pub use mapper::GraphMapper;
pub use primitives::{
    CollectionNodeMapper, DynamicObjectNodeMapper, HeterogeneousListNodeMapper,
    HeterogeneousSetNodeMapper, ListNodeMapper, NodeMapper, ObjectNodeMapper,
    ReferenceNodeMapper, SetNodeMapper,
};
