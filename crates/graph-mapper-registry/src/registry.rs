//! The binding registry.
//!
//! [`BindingRegistry`] is the single store populated during setup: scalar
//! mappers, the unproxy function, class hierarchies and reference bindings.
//! The compiler reads it to build mappers and copies everything a mapper needs
//! out of it, so a compiled mapper never refers back to the registry.
//!
//! # Thread Safety
//!
//! The registry has two phases:
//!
//! 1. **Setup phase**: `&mut self` methods populate the registry. This is
//!    single-threaded and normally happens during application start.
//! 2. **Compilation phase**: `&self` methods are read-only, so compilers on
//!    several threads may share one registry.
//!
//! Mapping never touches the registry at all.

use std::fmt;
use std::sync::Arc;

use graph_mapper_core::{
    Accessors, Class, ClassInfo, ClassNode, InitializationError, MappingError, Object, TypeHash,
};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::{BindingBuilder, ReferenceBinding};

/// Allocates a target instance from a source object and copies its
/// non-relational fields.
pub type ScalarMapper =
    Arc<dyn Fn(&dyn Object) -> Result<Box<dyn Object>, MappingError> + Send + Sync>;

/// Resolves a possibly wrapped source object to the instance it stands for.
pub type Unproxy = Arc<dyn (for<'a> Fn(&'a dyn Object) -> &'a dyn Object) + Send + Sync>;

/// Setup-time store of everything the compiler needs.
pub struct BindingRegistry {
    bindings: FxHashMap<TypeHash, Vec<ReferenceBinding>>,
    class_nodes: FxHashMap<TypeHash, ClassNode>,
    scalar_mappers: FxHashMap<TypeHash, ScalarMapper>,
    unproxy: Unproxy,
}

impl BindingRegistry {
    /// Create a registry whose unproxy function returns objects unchanged.
    pub fn new() -> Self {
        Self::with_unproxy(|object| object)
    }

    /// Create a registry with a custom unproxy function.
    pub fn with_unproxy<F>(unproxy: F) -> Self
    where
        F: (for<'a> Fn(&'a dyn Object) -> &'a dyn Object) + Send + Sync + 'static,
    {
        Self {
            bindings: FxHashMap::default(),
            class_nodes: FxHashMap::default(),
            scalar_mappers: FxHashMap::default(),
            unproxy: Arc::new(unproxy),
        }
    }

    // ==========================================================================
    // Scalar mappers
    // ==========================================================================

    /// Register the scalar mapper producing `T` from `S`.
    ///
    /// The source may be `S` or any subclass of it. A later registration for
    /// the same target class replaces this one.
    pub fn register_mapper<S, T, F>(&mut self, mapper: F) -> &mut Self
    where
        S: Class,
        T: Class,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        self.register_scalar_mapper(ClassInfo::of::<T>(), move |source: &dyn Object| {
            let typed = source
                .downcast_ref::<S>()
                .ok_or(MappingError::SourceMismatch {
                    expected: S::type_name(),
                    found: source.class_name(),
                })?;
            Ok(Box::new(mapper(typed)) as Box<dyn Object>)
        })
    }

    /// Register an untyped scalar mapper for `target`.
    pub fn register_scalar_mapper<F>(&mut self, target: ClassInfo, mapper: F) -> &mut Self
    where
        F: Fn(&dyn Object) -> Result<Box<dyn Object>, MappingError> + Send + Sync + 'static,
    {
        debug!(target_class = target.name, "scalar mapper registered");
        self.scalar_mappers.insert(target.hash, Arc::new(mapper));
        self
    }

    pub fn scalar_mapper(&self, target: TypeHash) -> Option<&ScalarMapper> {
        self.scalar_mappers.get(&target)
    }

    // ==========================================================================
    // Hierarchies
    // ==========================================================================

    /// Declare that target class `T`, mapped from `S`, fans out into `subclasses`.
    ///
    /// Every node of the tree that has children of its own is registered too,
    /// so a subclass that branches further resolves on its own.
    pub fn declare_hierarchy<T: Class, S: Class>(
        &mut self,
        subclasses: impl IntoIterator<Item = ClassNode>,
    ) -> Result<&mut Self, InitializationError> {
        let root = ClassNode::of::<T, S>().with_children(subclasses);
        self.insert_hierarchy(root)
    }

    /// Declare a hierarchy rooted at an interface.
    ///
    /// `T` must be an interface and `S` must not be instantiable.
    pub fn declare_interface_hierarchy<T: Class, S: Class>(
        &mut self,
        subclasses: impl IntoIterator<Item = ClassNode>,
    ) -> Result<&mut Self, InitializationError> {
        let target = ClassInfo::of::<T>();
        if !target.kind.is_interface() {
            return Err(InitializationError::NotAnInterface {
                class: target.name.to_string(),
            });
        }
        require_abstract(ClassInfo::of::<S>())?;
        self.declare_hierarchy::<T, S>(subclasses)
    }

    /// Declare a hierarchy rooted at a union.
    ///
    /// `T` must be an interface declaring no methods and `S` must not be
    /// instantiable.
    pub fn declare_union_hierarchy<T: Class, S: Class>(
        &mut self,
        subclasses: impl IntoIterator<Item = ClassNode>,
    ) -> Result<&mut Self, InitializationError> {
        let target = ClassInfo::of::<T>();
        if !target.kind.is_interface() {
            return Err(InitializationError::NotAnInterface {
                class: target.name.to_string(),
            });
        }
        if !target.kind.is_union() {
            return Err(InitializationError::NotAUnion {
                class: target.name.to_string(),
            });
        }
        require_abstract(ClassInfo::of::<S>())?;
        self.declare_hierarchy::<T, S>(subclasses)
    }

    fn insert_hierarchy(&mut self, root: ClassNode) -> Result<&mut Self, InitializationError> {
        let mut sources = FxHashSet::default();
        sources.insert(root.source().hash);
        for node in root.descendants() {
            if !sources.insert(node.source().hash) {
                return Err(InitializationError::DuplicateSubtype {
                    class: node.source().name.to_string(),
                    root: root.target().name.to_string(),
                });
            }
        }

        debug!(
            target_class = root.target().name,
            source_class = root.source().name,
            subtypes = sources.len() - 1,
            "hierarchy declared"
        );

        let branches: Vec<ClassNode> = root
            .descendants()
            .filter(|node| !node.is_leaf())
            .cloned()
            .collect();
        self.class_nodes.insert(root.target().hash, root);
        for branch in branches {
            self.class_nodes.insert(branch.target().hash, branch);
        }
        Ok(self)
    }

    pub fn class_node(&self, target: TypeHash) -> Option<&ClassNode> {
        self.class_nodes.get(&target)
    }

    // ==========================================================================
    // Bindings
    // ==========================================================================

    /// Start declaring the relations of target class `T` mapped from `S`.
    pub fn bind<T: Accessors, S: Accessors>(&mut self) -> BindingBuilder<'_, T, S> {
        BindingBuilder::new(self)
    }

    pub(crate) fn push_binding(&mut self, target: ClassInfo, binding: ReferenceBinding) {
        self.bindings.entry(target.hash).or_default().push(binding);
    }

    /// Bindings of `target` in declaration order.
    pub fn bindings(&self, target: TypeHash) -> Option<&[ReferenceBinding]> {
        self.bindings.get(&target).map(Vec::as_slice)
    }

    // ==========================================================================
    // Collaborators
    // ==========================================================================

    pub fn unproxy(&self) -> &Unproxy {
        &self.unproxy
    }

    /// Resolve `source` through the unproxy function.
    pub fn resolve_runtime_class<'a>(&self, source: &'a dyn Object) -> &'a dyn Object {
        (self.unproxy)(source)
    }

    /// Build a `target` instance from `source` with the registered scalar mapper.
    pub fn materialize(
        &self,
        source: &dyn Object,
        target: ClassInfo,
    ) -> Result<Box<dyn Object>, MappingError> {
        let mapper = self
            .scalar_mappers
            .get(&target.hash)
            .ok_or(MappingError::MissingScalarMapper { class: target.name })?;
        mapper(source)
    }
}

impl Default for BindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BindingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingRegistry")
            .field("bindings", &self.bindings.len())
            .field("class_nodes", &self.class_nodes.len())
            .field("scalar_mappers", &self.scalar_mappers.len())
            .finish_non_exhaustive()
    }
}

fn require_abstract(source: ClassInfo) -> Result<(), InitializationError> {
    if source.kind.is_concrete() {
        return Err(InitializationError::NotAbstract {
            class: source.name.to_string(),
        });
    }
    Ok(())
}
