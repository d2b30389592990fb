//! Class identity for mappable types.
//!
//! Every type that takes part in a mapping (source entities, target DTOs and
//! the marker types that root a polymorphic hierarchy) implements [`Class`].
//! Implementing `Class` makes a type an [`Object`], the object-safe view the
//! mapper works with at runtime.
//!
//! # Inheritance
//!
//! Rust has no subclassing, so a subclass embeds its superclass part as a field
//! and exposes it through [`Class::base`] and [`Class::base_mut`]. Downcasting
//! a `dyn Object` walks this chain, which lets accessors registered for a
//! superclass operate on any of its subclasses.
//!
//! # Example
//!
//! ```
//! use graph_mapper_core::{Class, ClassKind, Object};
//!
//! struct MealEntity {
//!     name: String,
//! }
//!
//! impl Class for MealEntity {
//!     fn type_name() -> &'static str {
//!         "MealEntity"
//!     }
//!
//!     fn kind() -> ClassKind {
//!         ClassKind::Abstract
//!     }
//! }
//!
//! struct SoupEntity {
//!     meal: MealEntity,
//! }
//!
//! impl Class for SoupEntity {
//!     fn type_name() -> &'static str {
//!         "SoupEntity"
//!     }
//!
//!     fn base(&self) -> Option<&dyn Object> {
//!         Some(&self.meal)
//!     }
//!
//!     fn base_mut(&mut self) -> Option<&mut dyn Object> {
//!         Some(&mut self.meal)
//!     }
//! }
//!
//! let soup = SoupEntity { meal: MealEntity { name: "Borscht".into() } };
//! let object: &dyn Object = &soup;
//! assert_eq!(object.class_name(), "SoupEntity");
//! assert_eq!(object.downcast_ref::<MealEntity>().map(|m| m.name.as_str()), Some("Borscht"));
//! ```

use std::any::Any;
use std::fmt;

use crate::TypeHash;

/// What kind of class a type models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    /// An instantiable class.
    Concrete,
    /// A class that is never instantiated itself, only through subclasses.
    Abstract,
    /// A marker type carrying no data. `methods` lists the operations it
    /// declares; an interface that declares none is a union.
    Interface {
        methods: &'static [&'static str],
    },
}

impl ClassKind {
    /// Whether instances of this class exist at runtime.
    pub const fn is_concrete(self) -> bool {
        matches!(self, ClassKind::Concrete)
    }

    pub const fn is_interface(self) -> bool {
        matches!(self, ClassKind::Interface { .. })
    }

    /// An interface declaring no methods.
    pub const fn is_union(self) -> bool {
        matches!(self, ClassKind::Interface { methods } if methods.is_empty())
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassKind::Concrete => write!(f, "concrete class"),
            ClassKind::Abstract => write!(f, "abstract class"),
            ClassKind::Interface { methods } if methods.is_empty() => write!(f, "union"),
            ClassKind::Interface { .. } => write!(f, "interface"),
        }
    }
}

/// Static description of a class, captured once and stored in registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassInfo {
    pub hash: TypeHash,
    pub name: &'static str,
    pub kind: ClassKind,
}

impl ClassInfo {
    /// Describe `T`.
    pub fn of<T: Class>() -> Self {
        Self {
            hash: T::type_hash(),
            name: T::type_name(),
            kind: T::kind(),
        }
    }
}

impl fmt::Display for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Trait for types that can be mapped from or into.
///
/// # Derive Macro
///
/// The recommended way to implement this trait is `#[derive(Class)]` from
/// the `graph-mapper-macros` crate.
pub trait Class: Send + Sync + 'static {
    /// The class name. Also the input of [`Class::type_hash`].
    fn type_name() -> &'static str;

    /// Identity of this class inside registries and dispatch tables.
    fn type_hash() -> TypeHash {
        TypeHash::from_name(Self::type_name())
    }

    fn kind() -> ClassKind {
        ClassKind::Concrete
    }

    /// The embedded superclass part, if this class extends another.
    fn base(&self) -> Option<&dyn Object> {
        None
    }

    fn base_mut(&mut self) -> Option<&mut dyn Object> {
        None
    }
}

/// Object-safe runtime view of a [`Class`] instance.
///
/// Implemented automatically for every `Class`. The runtime class of a
/// `dyn Object` is always its concrete type, never the declared slot type.
pub trait Object: Any + Send + Sync + 'static {
    fn class_hash(&self) -> TypeHash;

    fn class_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;

    fn base_object(&self) -> Option<&dyn Object>;

    fn base_object_mut(&mut self) -> Option<&mut dyn Object>;
}

impl<T: Class> Object for T {
    fn class_hash(&self) -> TypeHash {
        T::type_hash()
    }

    fn class_name(&self) -> &'static str {
        T::type_name()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }

    fn base_object(&self) -> Option<&dyn Object> {
        self.base()
    }

    fn base_object_mut(&mut self) -> Option<&mut dyn Object> {
        self.base_mut()
    }
}

impl dyn Object {
    /// Whether the runtime class is exactly `T`.
    pub fn is<T: Class>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Whether the runtime class is `T` or extends `T`.
    pub fn instance_of<T: Class>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    /// Borrow as `T`, walking the base chain when the runtime class is a subclass.
    pub fn downcast_ref<T: Class>(&self) -> Option<&T> {
        if let Some(this) = self.as_any().downcast_ref::<T>() {
            return Some(this);
        }
        self.base_object()?.downcast_ref::<T>()
    }

    /// Mutably borrow as `T`, walking the base chain.
    pub fn downcast_mut<T: Class>(&mut self) -> Option<&mut T> {
        if self.is::<T>() {
            return self.as_any_mut().downcast_mut::<T>();
        }
        self.base_object_mut()?.downcast_mut::<T>()
    }

    /// Take ownership as `T`. Only succeeds on an exact class match.
    pub fn downcast_box<T: Class>(self: Box<Self>) -> Option<Box<T>> {
        self.into_any().downcast::<T>().ok()
    }
}

impl fmt::Debug for dyn Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({})", self.class_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Base {
        id: u32,
    }

    impl Class for Base {
        fn type_name() -> &'static str {
            "Base"
        }

        fn kind() -> ClassKind {
            ClassKind::Abstract
        }
    }

    struct Derived {
        base: Base,
        extra: bool,
    }

    impl Class for Derived {
        fn type_name() -> &'static str {
            "Derived"
        }

        fn base(&self) -> Option<&dyn Object> {
            Some(&self.base)
        }

        fn base_mut(&mut self) -> Option<&mut dyn Object> {
            Some(&mut self.base)
        }
    }

    enum Marker {}

    impl Class for Marker {
        fn type_name() -> &'static str {
            "Marker"
        }

        fn kind() -> ClassKind {
            ClassKind::Interface { methods: &[] }
        }
    }

    fn derived() -> Derived {
        Derived {
            base: Base { id: 7 },
            extra: true,
        }
    }

    #[test]
    fn runtime_class_is_concrete_type() {
        let value = derived();
        let object: &dyn Object = &value;
        assert_eq!(object.class_name(), "Derived");
        assert_eq!(object.class_hash(), TypeHash::from_name("Derived"));
        assert!(object.is::<Derived>());
        assert!(!object.is::<Base>());
    }

    #[test]
    fn downcast_walks_base_chain() {
        let value = derived();
        let object: &dyn Object = &value;
        assert_eq!(object.downcast_ref::<Base>().map(|b| b.id), Some(7));
        assert!(object.downcast_ref::<Derived>().is_some_and(|d| d.extra));
        assert!(object.instance_of::<Base>());
    }

    #[test]
    fn downcast_mut_reaches_base() {
        let mut value = derived();
        let object: &mut dyn Object = &mut value;
        if let Some(base) = object.downcast_mut::<Base>() {
            base.id = 9;
        }
        assert_eq!(value.base.id, 9);
    }

    #[test]
    fn downcast_box_requires_exact_class() {
        let boxed: Box<dyn Object> = Box::new(derived());
        assert!(boxed.downcast_box::<Base>().is_none());

        let boxed: Box<dyn Object> = Box::new(derived());
        assert!(boxed.downcast_box::<Derived>().is_some());
    }

    #[test]
    fn class_info_captures_kind() {
        let info = ClassInfo::of::<Marker>();
        assert_eq!(info.name, "Marker");
        assert!(info.kind.is_union());
        assert!(info.kind.is_interface());
        assert!(!ClassInfo::of::<Base>().kind.is_concrete());
        assert!(ClassInfo::of::<Derived>().kind.is_concrete());
    }

    #[test]
    fn interface_with_methods_is_not_union() {
        let kind = ClassKind::Interface {
            methods: &["price"],
        };
        assert!(kind.is_interface());
        assert!(!kind.is_union());
        assert_eq!(kind.to_string(), "interface");
    }
}
