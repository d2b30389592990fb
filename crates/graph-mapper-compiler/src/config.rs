//! Compiler configuration.

/// How sibling selection nodes sharing a label are compiled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateLabels {
    /// Treat the siblings as one node whose children are all of theirs,
    /// in order. Only one reference is compiled per label.
    #[default]
    Merge,
    /// Fail compilation with `InitializationError::DuplicateLabel` when any
    /// node of the selection, reached or not, has two children sharing a label.
    Reject,
    /// Honour the first sibling and ignore the later ones with their subtrees.
    FirstWins,
}

/// Builder for [`MapperFactory`](crate::MapperFactory) options.
///
/// ```
/// use graph_mapper_compiler::{CompilerConfig, DuplicateLabels};
///
/// let config = CompilerConfig::new().with_duplicate_labels(DuplicateLabels::Reject);
/// assert_eq!(config.duplicate_labels(), DuplicateLabels::Reject);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerConfig {
    duplicate_labels: DuplicateLabels,
}

impl CompilerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duplicate_labels(mut self, policy: DuplicateLabels) -> Self {
        self.duplicate_labels = policy;
        self
    }

    pub fn duplicate_labels(&self) -> DuplicateLabels {
        self.duplicate_labels
    }
}
