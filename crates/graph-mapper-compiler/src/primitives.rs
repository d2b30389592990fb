//! Mapper primitives.
//!
//! A primitive reads one relation from a parent source object and maps what
//! it finds. There are six of them, single reference, list and set, each in a
//! static and a polymorphic flavour:
//!
//! | Relation | Static dispatch            | Dynamic dispatch                 |
//! |----------|----------------------------|----------------------------------|
//! | single   | [`ObjectNodeMapper`]       | [`DynamicObjectNodeMapper`]      |
//! | list     | [`ListNodeMapper`]         | [`HeterogeneousListNodeMapper`]  |
//! | set      | [`SetNodeMapper`]          | [`HeterogeneousSetNodeMapper`]   |
//!
//! Primitives capture everything at compile time and hold no state between
//! calls, so one instance serves any number of concurrent `map` calls.

use std::fmt;
use std::sync::Arc;

use graph_mapper_core::{Cardinality, Extracted, Getter, Mapped, MappingError, Object};
use graph_mapper_registry::Unproxy;

use crate::{Dispatch, DynamicDispatch, StaticDispatch};

/// Maps one relation of a parent source object.
pub trait NodeMapper: Send + Sync + fmt::Debug {
    /// `None` when the relation is null on the source.
    fn map(&self, parent: &dyn Object) -> Result<Option<Mapped>, MappingError>;
}

fn map_element<D: Dispatch>(
    unproxy: &Unproxy,
    dispatch: &D,
    element: &dyn Object,
) -> Result<Box<dyn Object>, MappingError> {
    let element = unproxy(element);
    dispatch.resolve(element)?.populate(element)
}

// ============================================================================
// Single reference
// ============================================================================

/// Maps a single related object.
pub struct ReferenceNodeMapper<D> {
    getter: Arc<dyn Getter>,
    unproxy: Unproxy,
    dispatch: D,
}

/// Single reference whose class is known statically.
pub type ObjectNodeMapper = ReferenceNodeMapper<StaticDispatch>;

/// Single reference dispatched on the runtime class of the related object.
pub type DynamicObjectNodeMapper = ReferenceNodeMapper<DynamicDispatch>;

impl<D: Dispatch> ReferenceNodeMapper<D> {
    pub fn new(getter: Arc<dyn Getter>, unproxy: Unproxy, dispatch: D) -> Self {
        Self {
            getter,
            unproxy,
            dispatch,
        }
    }
}

impl<D: Dispatch> NodeMapper for ReferenceNodeMapper<D> {
    fn map(&self, parent: &dyn Object) -> Result<Option<Mapped>, MappingError> {
        match self.getter.get(parent)? {
            Extracted::Null => Ok(None),
            Extracted::Single(child) => {
                let mapped = map_element(&self.unproxy, &self.dispatch, child)?;
                Ok(Some(Mapped::Single(mapped)))
            }
            Extracted::Many(_) => Err(MappingError::CardinalityMismatch {
                expected: Cardinality::One,
                found: Cardinality::List,
            }),
        }
    }
}

impl<D: Dispatch> fmt::Debug for ReferenceNodeMapper<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceNodeMapper")
            .field("dispatch", &self.dispatch)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Collections
// ============================================================================

/// Maps every element of a related list or set into an ordered sequence.
///
/// Null elements stay null at the same position.
pub struct CollectionNodeMapper<D> {
    cardinality: Cardinality,
    getter: Arc<dyn Getter>,
    unproxy: Unproxy,
    dispatch: D,
}

pub type ListNodeMapper = CollectionNodeMapper<StaticDispatch>;

/// List whose elements may be of different subclasses.
pub type HeterogeneousListNodeMapper = CollectionNodeMapper<DynamicDispatch>;

pub type SetNodeMapper = CollectionNodeMapper<StaticDispatch>;

/// Set whose elements may be of different subclasses.
pub type HeterogeneousSetNodeMapper = CollectionNodeMapper<DynamicDispatch>;

impl<D: Dispatch> CollectionNodeMapper<D> {
    /// A list mapper.
    pub fn list(getter: Arc<dyn Getter>, unproxy: Unproxy, dispatch: D) -> Self {
        Self::with_cardinality(Cardinality::List, getter, unproxy, dispatch)
    }

    /// A set mapper. Iteration order of the source set is kept as is.
    pub fn set(getter: Arc<dyn Getter>, unproxy: Unproxy, dispatch: D) -> Self {
        Self::with_cardinality(Cardinality::Set, getter, unproxy, dispatch)
    }

    fn with_cardinality(
        cardinality: Cardinality,
        getter: Arc<dyn Getter>,
        unproxy: Unproxy,
        dispatch: D,
    ) -> Self {
        Self {
            cardinality,
            getter,
            unproxy,
            dispatch,
        }
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }
}

impl<D: Dispatch> NodeMapper for CollectionNodeMapper<D> {
    fn map(&self, parent: &dyn Object) -> Result<Option<Mapped>, MappingError> {
        let elements = match self.getter.get(parent)? {
            Extracted::Null => return Ok(None),
            Extracted::Many(elements) => elements,
            Extracted::Single(_) => {
                return Err(MappingError::CardinalityMismatch {
                    expected: self.cardinality,
                    found: Cardinality::One,
                });
            }
        };

        let mapped = elements
            .into_iter()
            .map(|element| {
                element
                    .map(|element| map_element(&self.unproxy, &self.dispatch, element))
                    .transpose()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(Mapped::Many(mapped)))
    }
}

impl<D: Dispatch> fmt::Debug for CollectionNodeMapper<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionNodeMapper")
            .field("cardinality", &self.cardinality)
            .field("dispatch", &self.dispatch)
            .finish_non_exhaustive()
    }
}
