use serde::{Deserialize, Serialize};

use crate::ArgValue;

/// `@name(arg: val, ...)` attached to a field, an inline fragment, or the
/// operation itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<DirectiveArgument>,
}

impl Directive {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn arg(&mut self, name: impl Into<String>, value: ArgValue) {
        self.arguments.push(DirectiveArgument {
            name: name.into(),
            value,
        });
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectiveArgument {
    pub name: String,
    pub value: ArgValue,
}
