//! Named field accessors.
//!
//! A class exposes its relation fields by filling an [`AccessorTable`] with
//! field projections: a getter projects `&S` onto a [`SourceField`] and a
//! setter projects `&mut T` onto a [`TargetField`]. The registry resolves a
//! binding label against these names once, at setup time, and keeps the
//! resulting [`Getter`]/[`Setter`] objects.
//!
//! Names are looked up by convention: both the label and the accessor name are
//! normalised with [`accessor_key`], so the label `mealType` resolves the
//! accessor registered as `meal_type`.
//!
//! # Example
//!
//! ```
//! use graph_mapper_core::{AccessorTable, Accessors, Class};
//!
//! struct ProviderEntity;
//! impl Class for ProviderEntity {
//!     fn type_name() -> &'static str { "ProviderEntity" }
//! }
//!
//! struct WeekMenuEntity {
//!     provider: Option<ProviderEntity>,
//! }
//! impl Class for WeekMenuEntity {
//!     fn type_name() -> &'static str { "WeekMenuEntity" }
//! }
//!
//! impl Accessors for WeekMenuEntity {
//!     fn accessors(table: &mut AccessorTable<Self>) {
//!         table.getter("provider", |menu: &WeekMenuEntity| &menu.provider);
//!     }
//! }
//!
//! let table = AccessorTable::<WeekMenuEntity>::collect();
//! assert!(table.find_getter("provider").is_some());
//! assert!(table.find_setter("provider").is_none());
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{
    Cardinality, Class, ClassInfo, Extracted, Mapped, MappingError, Object, SourceField,
    TargetField,
};

/// Normalise a label or accessor name to snake_case.
///
/// ```
/// use graph_mapper_core::accessor_key;
///
/// assert_eq!(accessor_key("mealType"), "meal_type");
/// assert_eq!(accessor_key("listedVariants"), "listed_variants");
/// assert_eq!(accessor_key("days"), "days");
/// ```
pub fn accessor_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_uppercase() {
            if !key.is_empty() && !key.ends_with('_') {
                key.push('_');
            }
            key.extend(ch.to_lowercase());
        } else {
            key.push(ch);
        }
    }
    key
}

/// Reads one relation field from a source object.
pub trait Getter: Send + Sync {
    /// Class the getter was declared on.
    fn declaring_class(&self) -> ClassInfo;

    fn cardinality(&self) -> Cardinality;

    /// Read the field. `source` must be the declaring class or extend it.
    fn get<'a>(&self, source: &'a dyn Object) -> Result<Extracted<'a>, MappingError>;
}

/// Writes one relation field on a target object.
pub trait Setter: Send + Sync {
    fn declaring_class(&self) -> ClassInfo;

    fn cardinality(&self) -> Cardinality;

    /// Class of the objects this setter accepts, `None` when unknown.
    fn element_class(&self) -> Option<ClassInfo>;

    fn set(&self, target: &mut dyn Object, value: Option<Mapped>) -> Result<(), MappingError>;
}

struct FieldGetter<S, F, P> {
    project: P,
    _marker: PhantomData<fn(&S) -> &F>,
}

impl<S, F, P> Getter for FieldGetter<S, F, P>
where
    S: Class,
    F: SourceField + 'static,
    P: for<'a> Fn(&'a S) -> &'a F + Send + Sync,
{
    fn declaring_class(&self) -> ClassInfo {
        ClassInfo::of::<S>()
    }

    fn cardinality(&self) -> Cardinality {
        F::CARDINALITY
    }

    fn get<'a>(&self, source: &'a dyn Object) -> Result<Extracted<'a>, MappingError> {
        let typed = source
            .downcast_ref::<S>()
            .ok_or(MappingError::SourceMismatch {
                expected: S::type_name(),
                found: source.class_name(),
            })?;
        Ok((self.project)(typed).extract())
    }
}

struct FieldSetter<T, F, P> {
    project: P,
    element: Option<ClassInfo>,
    _marker: PhantomData<fn(&mut T) -> &mut F>,
}

impl<T, F, P> Setter for FieldSetter<T, F, P>
where
    T: Class,
    F: TargetField + 'static,
    P: for<'a> Fn(&'a mut T) -> &'a mut F + Send + Sync,
{
    fn declaring_class(&self) -> ClassInfo {
        ClassInfo::of::<T>()
    }

    fn cardinality(&self) -> Cardinality {
        F::CARDINALITY
    }

    fn element_class(&self) -> Option<ClassInfo> {
        self.element
    }

    fn set(&self, target: &mut dyn Object, value: Option<Mapped>) -> Result<(), MappingError> {
        let found = target.class_name();
        let typed = target
            .downcast_mut::<T>()
            .ok_or(MappingError::TargetMismatch {
                expected: T::type_name(),
                found,
            })?;
        (self.project)(typed).assign(value)
    }
}

/// Named getters and setters of one class.
pub struct AccessorTable<T> {
    getters: FxHashMap<String, Arc<dyn Getter>>,
    setters: FxHashMap<String, Arc<dyn Setter>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Class> AccessorTable<T> {
    pub fn new() -> Self {
        Self {
            getters: FxHashMap::default(),
            setters: FxHashMap::default(),
            _marker: PhantomData,
        }
    }

    /// Build the table `T` declares through [`Accessors`].
    pub fn collect() -> Self
    where
        T: Accessors,
    {
        let mut table = Self::new();
        T::accessors(&mut table);
        table
    }

    /// Register a getter. A later registration under the same name replaces it.
    pub fn getter<F, P>(&mut self, name: &str, project: P) -> &mut Self
    where
        F: SourceField + 'static,
        P: for<'a> Fn(&'a T) -> &'a F + Send + Sync + 'static,
    {
        let getter = FieldGetter {
            project,
            _marker: PhantomData,
        };
        self.getters.insert(accessor_key(name), Arc::new(getter));
        self
    }

    /// Register a setter whose element class is inferred from the field type.
    pub fn setter<F, P>(&mut self, name: &str, project: P) -> &mut Self
    where
        F: TargetField + 'static,
        P: for<'a> Fn(&'a mut T) -> &'a mut F + Send + Sync + 'static,
    {
        self.insert_setter(name, project, F::element_class())
    }

    /// Register a setter with an explicit element class `C`.
    ///
    /// Needed when the field holds `Box<dyn Object>` elements, because the
    /// element class cannot be inferred from the field type.
    pub fn setter_of<C, F, P>(&mut self, name: &str, project: P) -> &mut Self
    where
        C: Class,
        F: TargetField + 'static,
        P: for<'a> Fn(&'a mut T) -> &'a mut F + Send + Sync + 'static,
    {
        self.insert_setter(name, project, Some(ClassInfo::of::<C>()))
    }

    fn insert_setter<F, P>(&mut self, name: &str, project: P, element: Option<ClassInfo>) -> &mut Self
    where
        F: TargetField + 'static,
        P: for<'a> Fn(&'a mut T) -> &'a mut F + Send + Sync + 'static,
    {
        let setter = FieldSetter {
            project,
            element,
            _marker: PhantomData,
        };
        self.setters.insert(accessor_key(name), Arc::new(setter));
        self
    }

    /// Find a getter by label or accessor name.
    pub fn find_getter(&self, name: &str) -> Option<&Arc<dyn Getter>> {
        self.getters.get(&accessor_key(name))
    }

    /// Find a setter by label or accessor name.
    pub fn find_setter(&self, name: &str) -> Option<&Arc<dyn Setter>> {
        self.setters.get(&accessor_key(name))
    }

    pub fn getter_count(&self) -> usize {
        self.getters.len()
    }

    pub fn setter_count(&self) -> usize {
        self.setters.len()
    }
}

impl<T: Class> Default for AccessorTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Classes that expose relation accessors.
///
/// Usually derived with `#[derive(Accessors)]`.
pub trait Accessors: Class + Sized {
    fn accessors(table: &mut AccessorTable<Self>);
}
