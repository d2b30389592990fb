//! Mapper compilation.
//!
//! [`MapperFactory`] walks a selection graph, the registry's bindings and its
//! class hierarchies together and produces a [`GraphMapper`].
//!
//! For each selected node the factory builds a dispatch table for the node's
//! target class:
//!
//! 1. The class's own mapping: for every selected child label, the first
//!    binding of the class with that label is compiled into a reference whose
//!    primitive maps the child relation. Unselected labels produce nothing, so
//!    their getters never run.
//! 2. Without a declared hierarchy the table is static and holds that mapping.
//! 3. With a hierarchy every subclass pair gets its own mapping, built from the
//!    same selection node. A subclass starts from its parent's references and
//!    appends its own, so inherited relations always come first.

use std::sync::Arc;

use graph_mapper_core::{
    Cardinality, Class, ClassInfo, ClassNode, InitializationError, Label, Object, SelectionGraph,
    SelectionNode, TypeHash, group_children,
};
use graph_mapper_registry::{BindingRegistry, ReferenceBinding};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::{
    ClassMapping, CollectionNodeMapper, CompiledReference, CompilerConfig, DispatchTable,
    DuplicateLabels, DynamicDispatch, GraphMapper, NodeMapper, ReferenceNodeMapper,
    StaticDispatch,
};

/// Selection nodes standing for one selected field.
///
/// Holds more than one node only when duplicate siblings are merged.
type NodeGroup<'n, M> = Vec<&'n SelectionNode<M>>;

/// Compiles selection graphs against a [`BindingRegistry`].
///
/// Compilation only reads the registry. Everything the resulting mapper needs
/// is copied into it.
pub struct MapperFactory<'r> {
    registry: &'r BindingRegistry,
    config: CompilerConfig,
}

impl<'r> MapperFactory<'r> {
    pub fn new(registry: &'r BindingRegistry) -> Self {
        Self {
            registry,
            config: CompilerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CompilerConfig) -> Self {
        self.config = config;
        self
    }

    /// Compile a mapper producing `T` for the fields selected in `graph`.
    ///
    /// When `T` roots a declared hierarchy the mapper dispatches on the
    /// runtime class of the source, and every mapping it may pick must
    /// produce exactly `T`. Use [`MapperFactory::compile_dynamic`] for
    /// interface and union roots.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn compile<T: Class, M>(
        &self,
        graph: &SelectionGraph<M>,
    ) -> Result<GraphMapper<T>, InitializationError> {
        let table = self.compile_root(graph, ClassInfo::of::<T>())?;
        Ok(GraphMapper::new(table, self.registry.unproxy().clone()))
    }

    /// Compile a mapper for root class `T` that returns the target object untyped.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn compile_dynamic<T: Class, M>(
        &self,
        graph: &SelectionGraph<M>,
    ) -> Result<GraphMapper<Box<dyn Object>>, InitializationError> {
        let table = self.compile_root(graph, ClassInfo::of::<T>())?;
        Ok(GraphMapper::new(table, self.registry.unproxy().clone()))
    }

    fn compile_root<M>(
        &self,
        graph: &SelectionGraph<M>,
        root: ClassInfo,
    ) -> Result<DispatchTable, InitializationError> {
        if self.config.duplicate_labels() == DuplicateLabels::Reject {
            if let Some((parent, label)) = graph.root().find_duplicate_label() {
                return Err(InitializationError::DuplicateLabel {
                    parent: parent.label().name().to_string(),
                    label: label.name().to_string(),
                });
            }
        }
        let table = self.dispatch_table(&[graph.root()], root)?;
        debug!(
            root_class = root.name,
            dispatch = if table.is_static() { "static" } else { "dynamic" },
            mappings = table.len(),
            "mapper compiled"
        );
        Ok(table)
    }

    /// Build the dispatch table for `target` under the selection `nodes`.
    fn dispatch_table<M>(
        &self,
        nodes: &[&SelectionNode<M>],
        target: ClassInfo,
    ) -> Result<DispatchTable, InitializationError> {
        let Some(tree) = self.registry.class_node(target.hash) else {
            let references = self.build_references(Vec::new(), nodes, target)?;
            let mapping = self.class_mapping(target, None, references)?;
            return Ok(DispatchTable::Static(StaticDispatch(Arc::new(mapping))));
        };

        let inherited = self.build_references(Vec::new(), nodes, target)?;
        let mut table = FxHashMap::default();
        if tree.source().kind.is_concrete() {
            let mapping = self.class_mapping(tree.target(), Some(tree.source()), inherited.clone())?;
            table.insert(tree.source().hash, mapping);
        }
        self.populate_mappings(&mut table, tree, &inherited, nodes)?;
        Ok(DispatchTable::Dynamic(DynamicDispatch(Arc::new(table))))
    }

    /// Add a mapping for every node below `parent`, keyed by source class.
    fn populate_mappings<M>(
        &self,
        table: &mut FxHashMap<TypeHash, ClassMapping>,
        parent: &ClassNode,
        inherited: &[CompiledReference],
        nodes: &[&SelectionNode<M>],
    ) -> Result<(), InitializationError> {
        for child in parent.children() {
            let references = self.build_references(inherited.to_vec(), nodes, child.target())?;
            self.populate_mappings(table, child, &references, nodes)?;
            let mapping = self.class_mapping(child.target(), Some(child.source()), references)?;
            table.insert(child.source().hash, mapping);
        }
        Ok(())
    }

    /// Append the references of `target` selected under `nodes` to `inherited`.
    fn build_references<M>(
        &self,
        inherited: Vec<CompiledReference>,
        nodes: &[&SelectionNode<M>],
        target: ClassInfo,
    ) -> Result<Vec<CompiledReference>, InitializationError> {
        let mut references = inherited;
        let bindings = self.registry.bindings(target.hash).unwrap_or_default();

        for (label, group) in self.selected_children(nodes)? {
            let Some(binding) = bindings.iter().find(|b| b.label() == label) else {
                trace!(class = target.name, label = %label, "selected label has no binding");
                continue;
            };
            let child_table = self.dispatch_table(&group, binding.child())?;
            trace!(
                class = target.name,
                label = %label,
                child = binding.child().name,
                static_dispatch = child_table.is_static(),
                "reference compiled"
            );
            references.push(CompiledReference::new(
                label.clone(),
                binding.setter().clone(),
                self.primitive(binding, child_table),
            ));
        }
        Ok(references)
    }

    /// The children of `nodes` grouped by label, per the duplicate label policy.
    fn selected_children<'n, M>(
        &self,
        nodes: &[&'n SelectionNode<M>],
    ) -> Result<Vec<(&'n Label, NodeGroup<'n, M>)>, InitializationError> {
        match self.config.duplicate_labels() {
            DuplicateLabels::Merge => Ok(group_children(nodes)),
            // Reject has already checked the whole selection.
            DuplicateLabels::Reject | DuplicateLabels::FirstWins => Ok(first_occurrences(nodes)),
        }
    }

    fn class_mapping(
        &self,
        target: ClassInfo,
        source: Option<ClassInfo>,
        references: Vec<CompiledReference>,
    ) -> Result<ClassMapping, InitializationError> {
        let materialize = self.registry.scalar_mapper(target.hash).cloned();
        // Abstract subtypes never reach the table lookup, they need no mapper.
        if materialize.is_none() && source.is_none_or(|s| s.kind.is_concrete()) {
            return Err(InitializationError::MissingScalarMapper {
                class: target.name.to_string(),
            });
        }
        Ok(ClassMapping::new(target, materialize, references))
    }

    fn primitive(&self, binding: &ReferenceBinding, table: DispatchTable) -> Arc<dyn NodeMapper> {
        let getter = binding.getter().clone();
        let unproxy = self.registry.unproxy().clone();
        match (binding.cardinality(), table) {
            (Cardinality::One, DispatchTable::Static(d)) => {
                Arc::new(ReferenceNodeMapper::new(getter, unproxy, d))
            }
            (Cardinality::One, DispatchTable::Dynamic(d)) => {
                Arc::new(ReferenceNodeMapper::new(getter, unproxy, d))
            }
            (Cardinality::List, DispatchTable::Static(d)) => {
                Arc::new(CollectionNodeMapper::list(getter, unproxy, d))
            }
            (Cardinality::List, DispatchTable::Dynamic(d)) => {
                Arc::new(CollectionNodeMapper::list(getter, unproxy, d))
            }
            (Cardinality::Set, DispatchTable::Static(d)) => {
                Arc::new(CollectionNodeMapper::set(getter, unproxy, d))
            }
            (Cardinality::Set, DispatchTable::Dynamic(d)) => {
                Arc::new(CollectionNodeMapper::set(getter, unproxy, d))
            }
        }
    }
}

/// Children of `nodes` keeping only the first sibling per label.
fn first_occurrences<'n, M>(nodes: &[&'n SelectionNode<M>]) -> Vec<(&'n Label, NodeGroup<'n, M>)> {
    let mut seen = FxHashSet::default();
    nodes
        .iter()
        .copied()
        .flat_map(|node| node.children())
        .filter(|child| seen.insert(child.label().id()))
        .map(|child| (child.label(), vec![child]))
        .collect()
}
