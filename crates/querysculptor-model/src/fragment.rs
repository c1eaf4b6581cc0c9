use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::FieldNode;

/// A named fragment definition: `fragment Name on Type { ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentDef {
    pub on_type: String,
    pub fields: IndexMap<String, FieldNode>,
}

impl FragmentDef {
    pub fn new(on_type: impl Into<String>) -> Self {
        Self {
            on_type: on_type.into(),
            fields: IndexMap::new(),
        }
    }
}
