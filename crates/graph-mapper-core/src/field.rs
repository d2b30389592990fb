//! Relational field shapes.
//!
//! A relation field on a source class is read through [`SourceField`], which
//! turns the field into borrowed objects ([`Extracted`]). A relation field on
//! a target class is written through [`TargetField`], which accepts the
//! mapped objects ([`Mapped`]) produced by the mapper primitives.
//!
//! | Source field                                   | Cardinality |
//! |------------------------------------------------|-------------|
//! | `T`, `Option<T>`, `Arc<T>`, `Box<dyn Object>`  | `One`       |
//! | `Vec<E>`, `Option<Vec<E>>`                     | `List`      |
//! | `HashSet<E>`, `BTreeSet<E>` and their `Option` | `Set`       |
//!
//! | Target field                                   | Cardinality |
//! |------------------------------------------------|-------------|
//! | `Option<E>`                                    | `One`       |
//! | `Vec<Option<E>>`, `Option<Vec<Option<E>>>`     | `List`      |
//!
//! Collection targets keep one slot per source element, so a null source
//! element stays a `None` at the same position. A bare `Vec<Option<E>>`
//! target cannot tell a null source collection from an empty one: both
//! leave it empty. Use `Option<Vec<Option<E>>>` to keep that difference.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::sync::Arc;

use crate::{Class, ClassInfo, MappingError, Object};

/// How many related objects a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    One,
    List,
    Set,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::One => write!(f, "single"),
            Cardinality::List => write!(f, "list"),
            Cardinality::Set => write!(f, "set"),
        }
    }
}

// ============================================================================
// Source side
// ============================================================================

/// Related objects read from a source field.
pub enum Extracted<'a> {
    Null,
    Single(&'a dyn Object),
    /// Elements in source iteration order; `None` marks a null element.
    Many(Vec<Option<&'a dyn Object>>),
}

/// A value that may refer to one related object.
pub trait Related {
    fn related(&self) -> Option<&dyn Object>;
}

impl<T: Class> Related for T {
    fn related(&self) -> Option<&dyn Object> {
        Some(self)
    }
}

impl Related for Box<dyn Object> {
    fn related(&self) -> Option<&dyn Object> {
        Some(&**self)
    }
}

impl Related for Arc<dyn Object> {
    fn related(&self) -> Option<&dyn Object> {
        Some(&**self)
    }
}

impl<T: Class> Related for Arc<T> {
    fn related(&self) -> Option<&dyn Object> {
        Some(&**self)
    }
}

impl Related for ObjectHandle {
    fn related(&self) -> Option<&dyn Object> {
        Some(&*self.0)
    }
}

impl<R: Related> Related for Option<R> {
    fn related(&self) -> Option<&dyn Object> {
        self.as_ref().and_then(Related::related)
    }
}

/// A shared polymorphic object with identity equality.
///
/// Lets a source class hold a `HashSet` of objects whose runtime classes differ.
#[derive(Clone)]
pub struct ObjectHandle(pub Arc<dyn Object>);

impl ObjectHandle {
    pub fn new<T: Class>(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl PartialEq for ObjectHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ObjectHandle {}

impl Hash for ObjectHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).cast::<()>().hash(state);
    }
}

impl fmt::Debug for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectHandle({})", self.0.class_name())
    }
}

/// A relation field readable by a getter.
pub trait SourceField {
    const CARDINALITY: Cardinality;

    fn extract(&self) -> Extracted<'_>;
}

impl<R: Related> SourceField for R {
    const CARDINALITY: Cardinality = Cardinality::One;

    fn extract(&self) -> Extracted<'_> {
        match self.related() {
            Some(object) => Extracted::Single(object),
            None => Extracted::Null,
        }
    }
}

fn extract_all<'a, E: Related + 'a>(elements: impl Iterator<Item = &'a E>) -> Extracted<'a> {
    Extracted::Many(elements.map(Related::related).collect())
}

impl<E: Related> SourceField for Vec<E> {
    const CARDINALITY: Cardinality = Cardinality::List;

    fn extract(&self) -> Extracted<'_> {
        extract_all(self.iter())
    }
}

impl<E: Related> SourceField for Option<Vec<E>> {
    const CARDINALITY: Cardinality = Cardinality::List;

    fn extract(&self) -> Extracted<'_> {
        match self {
            Some(elements) => extract_all(elements.iter()),
            None => Extracted::Null,
        }
    }
}

impl<E: Related, H: BuildHasher> SourceField for HashSet<E, H> {
    const CARDINALITY: Cardinality = Cardinality::Set;

    fn extract(&self) -> Extracted<'_> {
        extract_all(self.iter())
    }
}

impl<E: Related, H: BuildHasher> SourceField for Option<HashSet<E, H>> {
    const CARDINALITY: Cardinality = Cardinality::Set;

    fn extract(&self) -> Extracted<'_> {
        match self {
            Some(elements) => extract_all(elements.iter()),
            None => Extracted::Null,
        }
    }
}

impl<E: Related> SourceField for BTreeSet<E> {
    const CARDINALITY: Cardinality = Cardinality::Set;

    fn extract(&self) -> Extracted<'_> {
        extract_all(self.iter())
    }
}

impl<E: Related> SourceField for Option<BTreeSet<E>> {
    const CARDINALITY: Cardinality = Cardinality::Set;

    fn extract(&self) -> Extracted<'_> {
        match self {
            Some(elements) => extract_all(elements.iter()),
            None => Extracted::Null,
        }
    }
}

// ============================================================================
// Target side
// ============================================================================

/// Objects produced by a mapper primitive for one relation.
pub enum Mapped {
    Single(Box<dyn Object>),
    /// Always an ordered sequence, whatever the source collection was.
    Many(Vec<Option<Box<dyn Object>>>),
}

impl Mapped {
    pub fn cardinality(&self) -> Cardinality {
        match self {
            Mapped::Single(_) => Cardinality::One,
            Mapped::Many(_) => Cardinality::List,
        }
    }
}

impl fmt::Debug for Mapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mapped::Single(object) => f.debug_tuple("Single").field(object).finish(),
            Mapped::Many(objects) => f.debug_tuple("Many").field(objects).finish(),
        }
    }
}

/// An element type a target field can be built from.
pub trait FromMapped: Sized + Send + Sync + 'static {
    /// The statically known class of the element, `None` when polymorphic.
    fn element_class() -> Option<ClassInfo>;

    fn from_object(object: Box<dyn Object>) -> Result<Self, MappingError>;
}

impl<T: Class> FromMapped for T {
    fn element_class() -> Option<ClassInfo> {
        Some(ClassInfo::of::<T>())
    }

    fn from_object(object: Box<dyn Object>) -> Result<Self, MappingError> {
        let found = object.class_name();
        object
            .downcast_box::<T>()
            .map(|boxed| *boxed)
            .ok_or(MappingError::TargetMismatch {
                expected: T::type_name(),
                found,
            })
    }
}

impl FromMapped for Box<dyn Object> {
    fn element_class() -> Option<ClassInfo> {
        None
    }

    fn from_object(object: Box<dyn Object>) -> Result<Self, MappingError> {
        Ok(object)
    }
}

/// A relation field writable by a setter.
pub trait TargetField: Send + Sync {
    const CARDINALITY: Cardinality;

    fn element_class() -> Option<ClassInfo>;

    /// Replace the field content. `None` clears it.
    fn assign(&mut self, value: Option<Mapped>) -> Result<(), MappingError>;
}

fn collect_elements<E: FromMapped>(
    objects: Vec<Option<Box<dyn Object>>>,
) -> Result<Vec<Option<E>>, MappingError> {
    objects
        .into_iter()
        .map(|slot| slot.map(E::from_object).transpose())
        .collect()
}

impl<E: FromMapped> TargetField for Option<E> {
    const CARDINALITY: Cardinality = Cardinality::One;

    fn element_class() -> Option<ClassInfo> {
        E::element_class()
    }

    fn assign(&mut self, value: Option<Mapped>) -> Result<(), MappingError> {
        *self = match value {
            None => None,
            Some(Mapped::Single(object)) => Some(E::from_object(object)?),
            Some(Mapped::Many(_)) => {
                return Err(MappingError::CardinalityMismatch {
                    expected: Cardinality::One,
                    found: Cardinality::List,
                });
            }
        };
        Ok(())
    }
}

impl<E: FromMapped> TargetField for Option<Vec<Option<E>>> {
    const CARDINALITY: Cardinality = Cardinality::List;

    fn element_class() -> Option<ClassInfo> {
        E::element_class()
    }

    fn assign(&mut self, value: Option<Mapped>) -> Result<(), MappingError> {
        *self = match value {
            None => None,
            Some(Mapped::Many(objects)) => Some(collect_elements(objects)?),
            Some(Mapped::Single(_)) => {
                return Err(MappingError::CardinalityMismatch {
                    expected: Cardinality::List,
                    found: Cardinality::One,
                });
            }
        };
        Ok(())
    }
}

/// A null source collection leaves the vector empty.
impl<E: FromMapped> TargetField for Vec<Option<E>> {
    const CARDINALITY: Cardinality = Cardinality::List;

    fn element_class() -> Option<ClassInfo> {
        E::element_class()
    }

    fn assign(&mut self, value: Option<Mapped>) -> Result<(), MappingError> {
        *self = match value {
            None => Vec::new(),
            Some(Mapped::Many(objects)) => collect_elements(objects)?,
            Some(Mapped::Single(_)) => {
                return Err(MappingError::CardinalityMismatch {
                    expected: Cardinality::List,
                    found: Cardinality::One,
                });
            }
        };
        Ok(())
    }
}
