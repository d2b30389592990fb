//! The compiled mapper.

use std::fmt;
use std::marker::PhantomData;

use graph_mapper_core::{FromMapped, GraphMapperError, MappingError, Object};
use graph_mapper_registry::Unproxy;
use tracing::debug;

use crate::DispatchTable;

/// A reusable, immutable function from a source object graph to a target graph.
///
/// Produced by [`MapperFactory`](crate::MapperFactory). Cloning is cheap and
/// every clone shares the same compiled tables. Mapping takes `&self`, so a
/// single mapper can serve any number of threads at once.
pub struct GraphMapper<T> {
    root: DispatchTable,
    unproxy: Unproxy,
    _marker: PhantomData<fn() -> T>,
}

impl<T> GraphMapper<T> {
    pub(crate) fn new(root: DispatchTable, unproxy: Unproxy) -> Self {
        Self {
            root,
            unproxy,
            _marker: PhantomData,
        }
    }

    /// The dispatch table applied to the top-level source.
    pub fn dispatch_table(&self) -> &DispatchTable {
        &self.root
    }
}

impl<T: FromMapped> GraphMapper<T> {
    /// Map `source` and everything selected beneath it.
    ///
    /// Any failure aborts the whole call and is reported once, naming the
    /// runtime class of `source`. Targets allocated before the failure are
    /// dropped.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn map(&self, source: &dyn Object) -> Result<T, GraphMapperError> {
        let source = (self.unproxy)(source);
        self.map_resolved(source).map_err(|cause| {
            debug!(source_class = source.class_name(), error = %cause, "mapping failed");
            GraphMapperError::MappingFailed {
                class: source.class_name(),
                source: cause,
            }
        })
    }

    fn map_resolved(&self, source: &dyn Object) -> Result<T, MappingError> {
        let target = self.root.resolve(source)?.populate(source)?;
        T::from_object(target)
    }
}

impl<T> Clone for GraphMapper<T> {
    fn clone(&self) -> Self {
        Self::new(self.root.clone(), self.unproxy.clone())
    }
}

impl<T> fmt::Debug for GraphMapper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphMapper")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
