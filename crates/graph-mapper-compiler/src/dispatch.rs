//! Compiled dispatch structures.
//!
//! A [`DispatchTable`] decides which [`ClassMapping`] applies to a source
//! object. A static table holds exactly one mapping, known at compile time. A
//! dynamic table holds one mapping per concrete source class of a declared
//! hierarchy and picks one by the runtime class of the object being mapped.

use std::fmt;
use std::sync::Arc;

use graph_mapper_core::{ClassInfo, Label, MappingError, Object, Setter, TypeHash};
use graph_mapper_registry::ScalarMapper;
use rustc_hash::FxHashMap;

use crate::NodeMapper;

/// A selected relation, ready to run.
#[derive(Clone)]
pub struct CompiledReference {
    label: Label,
    setter: Arc<dyn Setter>,
    mapper: Arc<dyn NodeMapper>,
}

impl CompiledReference {
    pub fn new(label: Label, setter: Arc<dyn Setter>, mapper: Arc<dyn NodeMapper>) -> Self {
        Self {
            label,
            setter,
            mapper,
        }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn mapper(&self) -> &Arc<dyn NodeMapper> {
        &self.mapper
    }

    /// Map the relation of `source` and store it on `target`.
    pub fn apply(&self, source: &dyn Object, target: &mut dyn Object) -> Result<(), MappingError> {
        let value = self.mapper.map(source)?;
        self.setter.set(target, value)
    }
}

impl fmt::Debug for CompiledReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledReference")
            .field("label", &self.label)
            .field("mapper", &self.mapper)
            .finish()
    }
}

/// The references that apply to one concrete class, inherited ones first.
pub struct ClassMapping {
    target: ClassInfo,
    materialize: Option<ScalarMapper>,
    references: Vec<CompiledReference>,
}

impl ClassMapping {
    pub fn new(
        target: ClassInfo,
        materialize: Option<ScalarMapper>,
        references: Vec<CompiledReference>,
    ) -> Self {
        Self {
            target,
            materialize,
            references,
        }
    }

    pub fn target(&self) -> ClassInfo {
        self.target
    }

    pub fn references(&self) -> &[CompiledReference] {
        &self.references
    }

    /// Labels of the references, in application order.
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.references.iter().map(CompiledReference::label)
    }

    /// Materialise the target of `source` and apply every reference to it.
    ///
    /// `source` must already be unproxied.
    pub fn populate(&self, source: &dyn Object) -> Result<Box<dyn Object>, MappingError> {
        let materialize = self
            .materialize
            .as_ref()
            .ok_or(MappingError::MissingScalarMapper {
                class: self.target.name,
            })?;
        let mut target = materialize(source)?;
        for reference in &self.references {
            reference.apply(source, target.as_mut())?;
        }
        Ok(target)
    }
}

impl fmt::Debug for ClassMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassMapping")
            .field("target", &self.target.name)
            .field("references", &self.references)
            .finish()
    }
}

/// Resolves the mapping for a source object.
pub trait Dispatch: Send + Sync + fmt::Debug + 'static {
    fn resolve(&self, source: &dyn Object) -> Result<&ClassMapping, MappingError>;
}

/// A table with a single mapping, used when the slot is not polymorphic.
#[derive(Debug, Clone)]
pub struct StaticDispatch(pub Arc<ClassMapping>);

impl Dispatch for StaticDispatch {
    fn resolve(&self, _source: &dyn Object) -> Result<&ClassMapping, MappingError> {
        Ok(&self.0)
    }
}

/// A table keyed by the runtime class of the source.
#[derive(Debug, Clone)]
pub struct DynamicDispatch(pub Arc<FxHashMap<TypeHash, ClassMapping>>);

impl Dispatch for DynamicDispatch {
    fn resolve(&self, source: &dyn Object) -> Result<&ClassMapping, MappingError> {
        self.0
            .get(&source.class_hash())
            .ok_or(MappingError::UnregisteredSubtype {
                class: source.class_name(),
            })
    }
}

/// Either kind of dispatch table.
#[derive(Debug, Clone)]
pub enum DispatchTable {
    Static(StaticDispatch),
    Dynamic(DynamicDispatch),
}

impl DispatchTable {
    pub fn is_static(&self) -> bool {
        matches!(self, DispatchTable::Static(_))
    }

    /// Number of mappings held.
    pub fn len(&self) -> usize {
        match self {
            DispatchTable::Static(_) => 1,
            DispatchTable::Dynamic(table) => table.0.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The mapping used for source class `source`. A static table answers for any class.
    pub fn mapping_for(&self, source: TypeHash) -> Option<&ClassMapping> {
        match self {
            DispatchTable::Static(mapping) => Some(&mapping.0),
            DispatchTable::Dynamic(table) => table.0.get(&source),
        }
    }

    pub fn resolve(&self, source: &dyn Object) -> Result<&ClassMapping, MappingError> {
        match self {
            DispatchTable::Static(table) => table.resolve(source),
            DispatchTable::Dynamic(table) => table.resolve(source),
        }
    }
}
