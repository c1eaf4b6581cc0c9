use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{FieldNode, ModelError};

/// `... on Type { ... }`, inlined directly into the enclosing selection set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineFragment {
    pub on_type: String,
    pub selections: IndexMap<String, FieldNode>,
}

impl InlineFragment {
    pub fn new(on_type: impl Into<String>) -> Self {
        Self {
            on_type: on_type.into(),
            selections: IndexMap::new(),
        }
    }

    /// Inserts `child` into this inline fragment's own selection set,
    /// rejecting a collision with an existing sibling selection key —
    /// the same invariant `FieldNode::insert_child` enforces for a regular
    /// nested selection set.
    pub fn insert_child(&mut self, child: FieldNode) -> Result<(), ModelError> {
        let key = child.selection_key().to_string();
        if self.selections.contains_key(&key) {
            return Err(ModelError::DuplicateSelectionKey {
                key,
                path: format!("... on {}", self.on_type),
            });
        }
        self.selections.insert(key, child);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_child_rejects_duplicate_selection_key() {
        let mut inline = InlineFragment::new("Trainer");
        inline.insert_child(FieldNode::new("name", None)).unwrap();
        let err = inline.insert_child(FieldNode::new("name", None)).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateSelectionKey { .. }));
    }
}
