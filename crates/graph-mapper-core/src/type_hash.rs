//! Deterministic hash-based class identity.
//!
//! [`TypeHash`] is a 64-bit hash computed from a class name. It is the key of
//! every registry map and every polymorphic dispatch table, so two classes with
//! the same registered name are the same class as far as the mapper is concerned.
//!
//! # Hash Computation
//!
//! Uses XXHash64 with domain-specific mixing constants so that a class named
//! `"items"` never collides with a field label named `"items"`.
//!
//! # Examples
//!
//! ```
//! use graph_mapper_core::TypeHash;
//!
//! let soup = TypeHash::from_name("SoupEntity");
//! assert_eq!(soup, TypeHash::from_name("SoupEntity"));
//! assert_ne!(soup, TypeHash::from_name("LunchEntity"));
//! ```

use std::fmt;
use xxhash_rust::const_xxh64;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants for hash computation.
pub mod hash_constants {
    /// Domain marker for class hashes
    pub const TYPE: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for field label hashes
    pub const IDENT: u64 = 0x1a095090689d4647;
}

/// A deterministic 64-bit hash identifying a class or a field label.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Create a class hash from a class name.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::TYPE ^ xxh64(name.as_bytes(), 0))
    }

    /// Create an identifier hash, usable in `const` context.
    ///
    /// Field labels are declared as constants, so this has to be a `const fn`.
    ///
    /// ```
    /// use graph_mapper_core::TypeHash;
    ///
    /// const MEAL: TypeHash = TypeHash::from_ident("meal");
    /// assert_eq!(MEAL, TypeHash::from_ident("meal"));
    /// assert_ne!(MEAL, TypeHash::from_name("meal"));
    /// ```
    #[inline]
    pub const fn from_ident(name: &str) -> Self {
        TypeHash(hash_constants::IDENT ^ const_xxh64::xxh64(name.as_bytes(), 0))
    }

    /// Check if this is the empty hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the raw u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
