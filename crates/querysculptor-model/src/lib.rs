//! The query-state tree every QuerySculptor tool reads and mutates.
//!
//! This crate holds no schema awareness and performs no GraphQL rendering —
//! see `querysculptor-validator` and `querysculptor-builder` respectively.
//! It enforces only the structural invariants that make sense without a
//! schema: unique selection keys among siblings, and path navigation through
//! the tree that tools address with dotted strings.

mod arg_value;
mod directive;
mod error;
mod field_node;
mod fragment;
mod inline_fragment;
mod path;
mod query_state;
mod session;

pub use arg_value::ArgValue;
pub use directive::{Directive, DirectiveArgument};
pub use error::ModelError;
pub use field_node::FieldNode;
pub use fragment::FragmentDef;
pub use inline_fragment::InlineFragment;
pub use path::Path;
pub use query_state::{OperationType, QueryState, QueryStructure};
pub use session::Session;
