//! Selection graphs.
//!
//! A [`SelectionGraph`] is the tree of labels describing which target
//! relations to populate, at every depth. It is produced by whatever turns a
//! caller's request into a field shape (for example a GraphQL selection set)
//! and may carry arbitrary per-node metadata, which the mapper never reads.
//!
//! ```
//! use graph_mapper_core::{Label, SelectionGraph, SelectionNode};
//!
//! const DAYS: Label = Label::new("days");
//! const ITEMS: Label = Label::new("items");
//!
//! let graph: SelectionGraph = SelectionGraph::new(vec![
//!     SelectionNode::new(DAYS).with_child(SelectionNode::new(ITEMS)),
//! ]);
//!
//! assert!(graph.node_by_path(&[DAYS, ITEMS]).is_some());
//! assert!(graph.node_by_path(&[ITEMS]).is_none());
//! ```

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{Label, TypeHash};

/// One selected field and the fields selected beneath it.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionNode<M = ()> {
    label: Label,
    children: Vec<SelectionNode<M>>,
    metadata: M,
}

impl<M: Default> SelectionNode<M> {
    pub fn new(label: Label) -> Self {
        Self::with_metadata(label, M::default())
    }
}

impl<M> SelectionNode<M> {
    pub fn with_metadata(label: Label, metadata: M) -> Self {
        Self {
            label,
            children: Vec::new(),
            metadata,
        }
    }

    /// Append a child. Children keep insertion order.
    pub fn with_child(mut self, child: SelectionNode<M>) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = SelectionNode<M>>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn children(&self) -> &[SelectionNode<M>] {
        &self.children
    }

    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// First child carrying `label`.
    pub fn child(&self, label: &Label) -> Option<&SelectionNode<M>> {
        self.children.iter().find(|c| &c.label == label)
    }

    /// Follow `path` from this node.
    ///
    /// Each step takes the first child whose label matches, without
    /// backtracking into later siblings with the same label. An empty path
    /// yields this node.
    pub fn find(&self, path: &[Label]) -> Option<&SelectionNode<M>> {
        path.iter().try_fold(self, |node, label| node.child(label))
    }

    /// First label that occurs on more than one child, if any.
    pub fn duplicate_child_label(&self) -> Option<&Label> {
        let mut seen = FxHashSet::default();
        self.children
            .iter()
            .map(|c| &c.label)
            .find(|label| !seen.insert(label.id()))
    }

    /// First node of this subtree, in pre-order, with two children sharing a
    /// label, paired with that label.
    pub fn find_duplicate_label(&self) -> Option<(&SelectionNode<M>, &Label)> {
        if let Some(label) = self.duplicate_child_label() {
            return Some((self, label));
        }
        self.children.iter().find_map(|child| child.find_duplicate_label())
    }
}

/// Group the children of `nodes` by label, in order of first appearance.
///
/// `nodes` are treated as one merged node: their children are concatenated
/// and siblings sharing a label form a single group. Grouping again on a
/// group's members merges the next level the same way.
pub fn group_children<'n, M>(nodes: &[&'n SelectionNode<M>]) -> Vec<(&'n Label, Vec<&'n SelectionNode<M>>)> {
    let mut groups: Vec<(&'n Label, Vec<&'n SelectionNode<M>>)> = Vec::new();
    let mut index: FxHashMap<TypeHash, usize> = FxHashMap::default();

    for child in nodes.iter().copied().flat_map(|node| node.children.iter()) {
        match index.get(&child.label.id()) {
            Some(&at) => groups[at].1.push(child),
            None => {
                index.insert(child.label.id(), groups.len());
                groups.push((&child.label, vec![child]));
            }
        }
    }
    groups
}

/// A complete selection, rooted at a node labelled [`Label::ROOT`].
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionGraph<M = ()> {
    root: SelectionNode<M>,
}

impl<M: Default> SelectionGraph<M> {
    /// Build a graph whose root selects `children`.
    pub fn new(children: impl IntoIterator<Item = SelectionNode<M>>) -> Self {
        Self {
            root: SelectionNode::new(Label::ROOT).with_children(children),
        }
    }
}

impl<M> SelectionGraph<M> {
    /// Wrap an existing tree. Its root label is replaced by [`Label::ROOT`].
    pub fn from_root(mut root: SelectionNode<M>) -> Self {
        root.label = Label::ROOT;
        Self { root }
    }

    pub fn root(&self) -> &SelectionNode<M> {
        &self.root
    }

    /// Look up a node by the labels leading to it from the root.
    pub fn node_by_path(&self, path: &[Label]) -> Option<&SelectionNode<M>> {
        self.root.find(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAYS: Label = Label::new("days");
    const ITEMS: Label = Label::new("items");
    const MEAL: Label = Label::new("meal");
    const MEAL_TYPE: Label = Label::new("mealType");

    fn node(label: Label) -> SelectionNode {
        SelectionNode::new(label)
    }

    #[test]
    fn root_uses_sentinel_label() {
        let graph: SelectionGraph = SelectionGraph::new(vec![node(DAYS)]);
        assert!(graph.root().label().is_root());

        let wrapped = SelectionGraph::from_root(node(DAYS).with_child(node(ITEMS)));
        assert!(wrapped.root().label().is_root());
        assert_eq!(wrapped.root().children().len(), 1);
    }

    #[test]
    fn empty_path_is_root() {
        let graph: SelectionGraph = SelectionGraph::new(vec![node(DAYS)]);
        assert!(graph.node_by_path(&[]).is_some_and(|n| n.label().is_root()));
    }

    #[test]
    fn path_lookup_takes_first_match_without_backtracking() {
        // Only the second `days` node has an `items` child.
        let graph: SelectionGraph = SelectionGraph::new(vec![
            node(DAYS),
            node(DAYS).with_child(node(ITEMS)),
        ]);
        assert!(graph.node_by_path(&[DAYS]).is_some_and(|n| n.is_leaf()));
        assert!(graph.node_by_path(&[DAYS, ITEMS]).is_none());
    }

    #[test]
    fn metadata_is_carried() {
        let n = SelectionNode::with_metadata(MEAL, "alias:m").with_child(SelectionNode::with_metadata(MEAL_TYPE, "t"));
        assert_eq!(*n.metadata(), "alias:m");
        assert_eq!(n.child(&MEAL_TYPE).map(|c| *c.metadata()), Some("t"));
    }

    #[test]
    fn detects_duplicate_children() {
        let n = node(ITEMS).with_children([node(MEAL), node(MEAL_TYPE), node(MEAL)]);
        assert_eq!(n.duplicate_child_label(), Some(&MEAL));
        assert_eq!(node(ITEMS).with_child(node(MEAL)).duplicate_child_label(), None);
    }

    #[test]
    fn finds_duplicates_at_any_depth() {
        let graph: SelectionGraph = SelectionGraph::new(vec![
            node(DAYS).with_child(node(ITEMS)),
            node(MEAL).with_children([node(MEAL_TYPE), node(ITEMS), node(MEAL_TYPE)]),
        ]);
        let (parent, label) = graph.root().find_duplicate_label().unwrap();
        assert_eq!(parent.label(), &MEAL);
        assert_eq!(label, &MEAL_TYPE);

        let clean: SelectionGraph = SelectionGraph::new(vec![node(DAYS).with_child(node(DAYS))]);
        assert!(clean.root().find_duplicate_label().is_none());
    }

    #[test]
    fn grouping_merges_duplicates_in_first_appearance_order() {
        let first = node(ITEMS).with_children([node(MEAL).with_child(node(MEAL_TYPE)), node(DAYS)]);
        let second = node(ITEMS).with_children([node(DAYS), node(MEAL).with_child(node(ITEMS))]);

        let groups = group_children(&[&first, &second]);
        let labels: Vec<_> = groups.iter().map(|(l, _)| l.name()).collect();
        assert_eq!(labels, ["meal", "days"]);
        assert_eq!(groups[0].1.len(), 2);

        let nested = group_children(&groups[0].1);
        let labels: Vec<_> = nested.iter().map(|(l, _)| l.name()).collect();
        assert_eq!(labels, ["mealType", "items"]);
    }
}
