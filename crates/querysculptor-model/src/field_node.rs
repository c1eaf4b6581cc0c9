use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{ArgValue, Directive, InlineFragment, ModelError};

/// One selected field and everything attached to it: its arguments, its own
/// directives, and its child selection set (nested fields, fragment
/// spreads, inline fragments).
///
/// A field's *selection key* — the name siblings must be unique under — is
/// its alias if one was given, otherwise its field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldNode {
    pub field_name: String,
    pub alias: Option<String>,
    pub args: IndexMap<String, ArgValue>,
    pub directives: Vec<Directive>,
    pub fields: IndexMap<String, FieldNode>,
    pub fragment_spreads: Vec<String>,
    pub inline_fragments: Vec<InlineFragment>,
}

impl FieldNode {
    pub fn new(field_name: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            field_name: field_name.into(),
            alias,
            args: IndexMap::new(),
            directives: Vec::new(),
            fields: IndexMap::new(),
            fragment_spreads: Vec::new(),
            inline_fragments: Vec::new(),
        }
    }

    pub fn selection_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.field_name)
    }

    /// Inserts `child` into this node's selection set, rejecting a
    /// collision with an existing sibling selection key.
    pub fn insert_child(&mut self, child: FieldNode) -> Result<(), ModelError> {
        let key = child.selection_key().to_string();
        if self.fields.contains_key(&key) {
            return Err(ModelError::DuplicateSelectionKey {
                key,
                path: self.field_name.clone(),
            });
        }
        self.fields.insert(key, child);
        Ok(())
    }

}
