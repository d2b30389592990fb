//! Class hierarchy trees.
//!
//! A [`ClassNode`] pairs a target class with the source class it is mapped
//! from. Its children are the subclass pairs, so a tree describes how a
//! polymorphic slot (an abstract class, interface or union) fans out into
//! concrete classes at runtime.
//!
//! ```
//! use graph_mapper_core::{Class, ClassKind, ClassNode};
//!
//! struct Meal;
//! impl Class for Meal {
//!     fn type_name() -> &'static str { "Meal" }
//!     fn kind() -> ClassKind { ClassKind::Interface { methods: &[] } }
//! }
//! # struct MealEntity;
//! # impl Class for MealEntity { fn type_name() -> &'static str { "MealEntity" } }
//! # struct SoupDto;
//! # impl Class for SoupDto { fn type_name() -> &'static str { "SoupDTO" } }
//! # struct SoupEntity;
//! # impl Class for SoupEntity { fn type_name() -> &'static str { "SoupEntity" } }
//!
//! let tree = ClassNode::of::<Meal, MealEntity>()
//!     .with_child(ClassNode::of::<SoupDto, SoupEntity>());
//! assert_eq!(tree.children().len(), 1);
//! assert!(tree.children()[0].is_leaf());
//! ```

use crate::{Class, ClassInfo};

/// One target/source class pair and its subclass pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassNode {
    target: ClassInfo,
    source: ClassInfo,
    children: Vec<ClassNode>,
}

impl ClassNode {
    pub fn new(target: ClassInfo, source: ClassInfo) -> Self {
        Self {
            target,
            source,
            children: Vec::new(),
        }
    }

    /// Pair target class `T` with source class `S`.
    pub fn of<T: Class, S: Class>() -> Self {
        Self::new(ClassInfo::of::<T>(), ClassInfo::of::<S>())
    }

    pub fn with_child(mut self, child: ClassNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = ClassNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn target(&self) -> ClassInfo {
        self.target
    }

    pub fn source(&self) -> ClassInfo {
        self.source
    }

    pub fn children(&self) -> &[ClassNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Every node below this one, parents before their children.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }
}

/// Pre-order iterator over the nodes below a [`ClassNode`].
pub struct Descendants<'a> {
    stack: Vec<&'a ClassNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a ClassNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClassKind;

    macro_rules! class {
        ($ty:ident, $name:literal) => {
            struct $ty;
            impl Class for $ty {
                fn type_name() -> &'static str {
                    $name
                }
            }
        };
    }

    class!(Meal, "Meal");
    class!(MealEntity, "MealEntity");
    class!(Lunch, "LunchDTO");
    class!(LunchEntity, "LunchEntity");
    class!(Soup, "SoupDTO");
    class!(SoupEntity, "SoupEntity");
    class!(ColdSoup, "ColdSoupDTO");
    class!(ColdSoupEntity, "ColdSoupEntity");

    fn tree() -> ClassNode {
        ClassNode::of::<Meal, MealEntity>().with_children([
            ClassNode::of::<Lunch, LunchEntity>(),
            ClassNode::of::<Soup, SoupEntity>().with_child(ClassNode::of::<ColdSoup, ColdSoupEntity>()),
        ])
    }

    #[test]
    fn pairs_target_with_source() {
        let root = tree();
        assert_eq!(root.target().name, "Meal");
        assert_eq!(root.source().name, "MealEntity");
        assert_eq!(root.target().kind, ClassKind::Concrete);
    }

    #[test]
    fn descendants_in_preorder() {
        let names: Vec<_> = tree().descendants().map(|n| n.source().name).collect();
        assert_eq!(names, ["LunchEntity", "SoupEntity", "ColdSoupEntity"]);
    }

    #[test]
    fn leaves_and_branches() {
        let root = tree();
        assert!(!root.is_leaf());
        assert!(root.children()[0].is_leaf());
        assert!(!root.children()[1].is_leaf());
    }
}
