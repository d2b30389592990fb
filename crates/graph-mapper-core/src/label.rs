//! Field labels.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::TypeHash;

/// Identifies one field slot of a class.
///
/// Labels compare by their hashed name, so labels declared as constants and
/// labels built at runtime from request data are interchangeable.
///
/// ```
/// use graph_mapper_core::Label;
///
/// const MEAL_TYPE: Label = Label::new("mealType");
/// assert_eq!(MEAL_TYPE, Label::owned(String::from("mealType")));
/// assert_eq!(MEAL_TYPE.name(), "mealType");
/// ```
#[derive(Clone)]
pub struct Label {
    hash: TypeHash,
    name: Cow<'static, str>,
}

impl Label {
    /// Label of every selection graph root.
    pub const ROOT: Label = Label::new("root");

    pub const fn new(name: &'static str) -> Self {
        Self {
            hash: TypeHash::from_ident(name),
            name: Cow::Borrowed(name),
        }
    }

    /// Build a label from a runtime string.
    pub fn owned(name: String) -> Self {
        Self {
            hash: TypeHash::from_ident(&name),
            name: Cow::Owned(name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> TypeHash {
        self.hash
    }

    pub fn is_root(&self) -> bool {
        self.hash == Self::ROOT.hash
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Label {}

impl Hash for Label {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.hash.cmp(&other.hash))
    }
}

impl From<&'static str> for Label {
    fn from(name: &'static str) -> Self {
        Label::new(name)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label({})", self.name)
    }
}
