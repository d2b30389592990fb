//! Reference bindings and the builder that declares them.

use std::fmt;
use std::sync::Arc;

use graph_mapper_core::{
    AccessorKind, AccessorTable, Accessors, Cardinality, Class, ClassInfo, Getter,
    InitializationError, Label, Setter, accessor_key,
};
use tracing::debug;

use crate::BindingRegistry;

/// One relation of a target class, resolved against its source class.
#[derive(Clone)]
pub struct ReferenceBinding {
    label: Label,
    getter: Arc<dyn Getter>,
    setter: Arc<dyn Setter>,
    child: ClassInfo,
    cardinality: Cardinality,
}

impl ReferenceBinding {
    pub fn new(
        label: Label,
        getter: Arc<dyn Getter>,
        setter: Arc<dyn Setter>,
        child: ClassInfo,
        cardinality: Cardinality,
    ) -> Self {
        Self {
            label,
            getter,
            setter,
            child,
            cardinality,
        }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn getter(&self) -> &Arc<dyn Getter> {
        &self.getter
    }

    pub fn setter(&self) -> &Arc<dyn Setter> {
        &self.setter
    }

    /// Target class of the related objects.
    pub fn child(&self) -> ClassInfo {
        self.child
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }
}

impl fmt::Debug for ReferenceBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceBinding")
            .field("label", &self.label)
            .field("child", &self.child.name)
            .field("cardinality", &self.cardinality)
            .finish()
    }
}

/// Declares the relations of one target/source class pair.
///
/// Created by [`BindingRegistry::bind`]. Each call resolves the accessors
/// named after the label and fails fast when they are missing or have the
/// wrong shape.
///
/// ```ignore
/// registry
///     .bind::<WeekMenuDto, WeekMenuEntity>()
///     .list_field(DAY_MENUS)?
///     .field(PROVIDER)?;
/// ```
pub struct BindingBuilder<'r, T, S> {
    registry: &'r mut BindingRegistry,
    targets: AccessorTable<T>,
    sources: AccessorTable<S>,
}

impl<'r, T: Accessors, S: Accessors> BindingBuilder<'r, T, S> {
    pub(crate) fn new(registry: &'r mut BindingRegistry) -> Self {
        Self {
            registry,
            targets: AccessorTable::collect(),
            sources: AccessorTable::collect(),
        }
    }

    /// Bind a single related object.
    pub fn field(self, label: Label) -> Result<Self, InitializationError> {
        self.bind(label, Cardinality::One, Cardinality::One)
    }

    /// Bind a list of related objects.
    pub fn list_field(self, label: Label) -> Result<Self, InitializationError> {
        self.bind(label, Cardinality::List, Cardinality::List)
    }

    /// Bind a set of related objects. The target receives an ordered sequence.
    pub fn set_field(self, label: Label) -> Result<Self, InitializationError> {
        self.bind(label, Cardinality::Set, Cardinality::List)
    }

    fn bind(
        self,
        label: Label,
        cardinality: Cardinality,
        target_shape: Cardinality,
    ) -> Result<Self, InitializationError> {
        let member = accessor_key(label.name());

        let getter = self
            .sources
            .find_getter(label.name())
            .ok_or_else(|| missing::<S>(&member, AccessorKind::Getter))?;
        if getter.cardinality() != cardinality {
            return Err(mismatch::<S>(&member, AccessorKind::Getter, cardinality, getter.cardinality()));
        }

        let setter = self
            .targets
            .find_setter(label.name())
            .ok_or_else(|| missing::<T>(&member, AccessorKind::Setter))?;
        if setter.cardinality() != target_shape {
            return Err(mismatch::<T>(&member, AccessorKind::Setter, target_shape, setter.cardinality()));
        }

        let child = setter
            .element_class()
            .ok_or_else(|| InitializationError::UnknownElementClass {
                class: T::type_name().to_string(),
                member: member.clone(),
            })?;

        debug!(
            target_class = T::type_name(),
            source_class = S::type_name(),
            label = %label,
            child = child.name,
            %cardinality,
            "binding added"
        );

        let binding = ReferenceBinding::new(label, getter.clone(), setter.clone(), child, cardinality);
        self.registry.push_binding(ClassInfo::of::<T>(), binding);
        Ok(self)
    }
}

fn missing<C: Class>(member: &str, kind: AccessorKind) -> InitializationError {
    InitializationError::MissingAccessor {
        class: C::type_name().to_string(),
        member: member.to_string(),
        kind,
    }
}

fn mismatch<C: Class>(
    member: &str,
    kind: AccessorKind,
    expected: Cardinality,
    found: Cardinality,
) -> InitializationError {
    InitializationError::CardinalityMismatch {
        class: C::type_name().to_string(),
        member: member.to_string(),
        kind,
        expected,
        found,
    }
}
