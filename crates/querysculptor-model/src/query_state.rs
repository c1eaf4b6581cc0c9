use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Directive, FieldNode, FragmentDef, InlineFragment, ModelError, Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Query => "query",
            OperationType::Mutation => "mutation",
            OperationType::Subscription => "subscription",
        }
    }
}

/// The root selection set: a `FieldNode`'s shape without a name of its own,
/// plus the top-level fragment spreads and inline fragments, kept separate
/// from nested selection sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryStructure {
    pub fields: IndexMap<String, FieldNode>,
    pub fragment_spreads: Vec<String>,
    pub inline_fragments: Vec<InlineFragment>,
}

/// The full serializable state one session's tools build up incrementally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryState {
    pub headers: IndexMap<String, String>,
    pub operation_type: OperationType,
    pub operation_type_name: String,
    pub operation_name: Option<String>,
    pub query_structure: QueryStructure,
    pub fragments: IndexMap<String, FragmentDef>,
    pub variables_schema: IndexMap<String, String>,
    pub variables_defaults: IndexMap<String, serde_json::Value>,
    pub variables_values: IndexMap<String, serde_json::Value>,
    pub operation_directives: Vec<Directive>,
    pub created_at: DateTime<Utc>,
}

impl QueryState {
    pub fn new(operation_type: OperationType, operation_type_name: impl Into<String>) -> Self {
        Self {
            headers: IndexMap::new(),
            operation_type,
            operation_type_name: operation_type_name.into(),
            operation_name: None,
            query_structure: QueryStructure::default(),
            fragments: IndexMap::new(),
            variables_schema: IndexMap::new(),
            variables_defaults: IndexMap::new(),
            variables_values: IndexMap::new(),
            operation_directives: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Inserts `child` at the selection set addressed by `parent_path`,
    /// which may be the root (empty path), a nested field, or — via a
    /// trailing `"on:TypeName"` segment — an inline fragment's own
    /// selection set.
    pub fn insert_field(&mut self, parent_path: &Path, child: FieldNode) -> Result<(), ModelError> {
        let segments = parent_path.segments();
        let target = resolve_selection_set_mut(SelectionSetMut::from_structure(&mut self.query_structure), &segments)?;
        let key = child.selection_key().to_string();
        if target.contains_key(&key) {
            return Err(ModelError::DuplicateSelectionKey {
                key,
                path: parent_path.to_string(),
            });
        }
        target.insert(key, child);
        Ok(())
    }

    /// Mutable access to the field at `path` (must not be the root).
    /// Segments may hop through an inline fragment via an `"on:TypeName"`
    /// marker, e.g. `"pokemons.on:Trainer.name"` addresses `name` inside
    /// `pokemons`'s `... on Trainer { ... }`.
    pub fn field_mut(&mut self, segments: &[&str]) -> Result<&mut FieldNode, ModelError> {
        resolve_field_mut(SelectionSetMut::from_structure(&mut self.query_structure), segments)
    }

    pub fn field(&self, segments: &[&str]) -> Result<&FieldNode, ModelError> {
        resolve_field(SelectionSet::from_structure(&self.query_structure), segments)
    }

    /// Appends a fragment spread at `path` (root or nested selection set).
    pub fn spread_fragment(&mut self, path: &Path, fragment_name: &str) -> Result<(), ModelError> {
        let segments = path.segments();
        if segments.is_empty() {
            self.query_structure
                .fragment_spreads
                .push(fragment_name.to_string());
            return Ok(());
        }
        self.field_mut(&segments)?
            .fragment_spreads
            .push(fragment_name.to_string());
        Ok(())
    }

    /// Appends an inline fragment at `path`.
    pub fn add_inline_fragment(
        &mut self,
        path: &Path,
        inline: InlineFragment,
    ) -> Result<(), ModelError> {
        let segments = path.segments();
        if segments.is_empty() {
            self.query_structure.inline_fragments.push(inline);
            return Ok(());
        }
        self.field_mut(&segments)?.inline_fragments.push(inline);
        Ok(())
    }

    /// Adds a directive either to the operation (`path` is `None`) or to the
    /// field at `path`.
    pub fn add_directive(
        &mut self,
        path: Option<&Path>,
        directive: Directive,
    ) -> Result<(), ModelError> {
        match path {
            None => {
                self.operation_directives.push(directive);
                Ok(())
            }
            Some(path) => {
                let segments = path.segments();
                if segments.is_empty() {
                    self.operation_directives.push(directive);
                    Ok(())
                } else {
                    self.field_mut(&segments)?.directives.push(directive);
                    Ok(())
                }
            }
        }
    }

    /// `true` iff rendering would produce the empty string (builder rule 2).
    pub fn is_empty(&self) -> bool {
        self.query_structure.fields.is_empty()
            && self.query_structure.fragment_spreads.is_empty()
            && self.query_structure.inline_fragments.is_empty()
            && self.fragments.is_empty()
    }
}

/// A path segment `"on:TypeName"` addresses the inline fragment
/// `... on TypeName` within the current selection set. `...TypeName` (the
/// syntax it renders as) can't double as the segment marker: `Path` splits
/// on `.`, and `... on TypeName`'s three literal dots would get sliced into
/// separate segments.
fn inline_fragment_type(segment: &str) -> Option<&str> {
    segment.strip_prefix("on:")
}

fn find_inline_mut<'a>(
    inline_fragments: &'a mut Vec<InlineFragment>,
    type_name: &str,
    segment: &str,
) -> Result<&'a mut InlineFragment, ModelError> {
    inline_fragments
        .iter_mut()
        .find(|f| f.on_type == type_name)
        .ok_or_else(|| ModelError::NotAField {
            segment: segment.to_string(),
            path: segment.to_string(),
        })
}

fn find_inline<'a>(
    inline_fragments: &'a [InlineFragment],
    type_name: &str,
    segment: &str,
) -> Result<&'a InlineFragment, ModelError> {
    inline_fragments
        .iter()
        .find(|f| f.on_type == type_name)
        .ok_or_else(|| ModelError::NotAField {
            segment: segment.to_string(),
            path: segment.to_string(),
        })
}

/// A selection set a path segment may resolve into: a selection set's own
/// field map alongside its inline fragments, so an `"on:TypeName"` segment
/// can be resolved without knowing whether the caller started from the
/// root `QueryStructure` or a nested `FieldNode`.
struct SelectionSetMut<'a> {
    fields: &'a mut IndexMap<String, FieldNode>,
    inline_fragments: &'a mut Vec<InlineFragment>,
}

impl<'a> SelectionSetMut<'a> {
    fn from_structure(s: &'a mut QueryStructure) -> Self {
        Self {
            fields: &mut s.fields,
            inline_fragments: &mut s.inline_fragments,
        }
    }

    fn from_field(f: &'a mut FieldNode) -> Self {
        Self {
            fields: &mut f.fields,
            inline_fragments: &mut f.inline_fragments,
        }
    }
}

struct SelectionSet<'a> {
    fields: &'a IndexMap<String, FieldNode>,
    inline_fragments: &'a [InlineFragment],
}

impl<'a> SelectionSet<'a> {
    fn from_structure(s: &'a QueryStructure) -> Self {
        Self {
            fields: &s.fields,
            inline_fragments: &s.inline_fragments,
        }
    }

    fn from_field(f: &'a FieldNode) -> Self {
        Self {
            fields: &f.fields,
            inline_fragments: &f.inline_fragments,
        }
    }
}

/// Resolves `segments` to the selection-set map a new child should be
/// inserted into — `insert_field`'s addressing, following any mix of field
/// and `"on:TypeName"` inline-fragment hops, landing on the final target's
/// own field map (whether that's a nested field or an inline fragment).
fn resolve_selection_set_mut<'a>(
    set: SelectionSetMut<'a>,
    segments: &[&str],
) -> Result<&'a mut IndexMap<String, FieldNode>, ModelError> {
    let Some((first, rest)) = segments.split_first() else {
        return Ok(set.fields);
    };
    if let Some(type_name) = inline_fragment_type(first) {
        let inline = find_inline_mut(set.inline_fragments, type_name, first)?;
        let Some((next, deeper)) = rest.split_first() else {
            return Ok(&mut inline.selections);
        };
        let child = inline.selections.get_mut(*next).ok_or_else(|| ModelError::NotAField {
            segment: (*next).to_string(),
            path: (*next).to_string(),
        })?;
        return resolve_selection_set_mut(SelectionSetMut::from_field(child), deeper);
    }
    let child = set.fields.get_mut(*first).ok_or_else(|| ModelError::NotAField {
        segment: (*first).to_string(),
        path: (*first).to_string(),
    })?;
    if rest.is_empty() {
        Ok(&mut child.fields)
    } else {
        resolve_selection_set_mut(SelectionSetMut::from_field(child), rest)
    }
}

/// Resolves `segments` to the `FieldNode` they address — used wherever a
/// tool mutates an already-selected field itself (its args, directives, or
/// spreads) rather than inserting a new child beneath it.
fn resolve_field_mut<'a>(set: SelectionSetMut<'a>, segments: &[&str]) -> Result<&'a mut FieldNode, ModelError> {
    let (first, rest) = segments.split_first().ok_or_else(|| ModelError::PathNotFound {
        path: "<root>".to_string(),
    })?;
    if let Some(type_name) = inline_fragment_type(first) {
        let inline = find_inline_mut(set.inline_fragments, type_name, first)?;
        let (next, deeper) = rest.split_first().ok_or_else(|| ModelError::PathNotFound {
            path: (*first).to_string(),
        })?;
        let child = inline.selections.get_mut(*next).ok_or_else(|| ModelError::NotAField {
            segment: (*next).to_string(),
            path: (*next).to_string(),
        })?;
        return if deeper.is_empty() {
            Ok(child)
        } else {
            resolve_field_mut(SelectionSetMut::from_field(child), deeper)
        };
    }
    let child = set.fields.get_mut(*first).ok_or_else(|| ModelError::NotAField {
        segment: (*first).to_string(),
        path: (*first).to_string(),
    })?;
    if rest.is_empty() {
        Ok(child)
    } else {
        resolve_field_mut(SelectionSetMut::from_field(child), rest)
    }
}

fn resolve_field<'a>(set: SelectionSet<'a>, segments: &[&str]) -> Result<&'a FieldNode, ModelError> {
    let (first, rest) = segments.split_first().ok_or_else(|| ModelError::PathNotFound {
        path: "<root>".to_string(),
    })?;
    if let Some(type_name) = inline_fragment_type(first) {
        let inline = find_inline(set.inline_fragments, type_name, first)?;
        let (next, deeper) = rest.split_first().ok_or_else(|| ModelError::PathNotFound {
            path: (*first).to_string(),
        })?;
        let child = inline.selections.get(*next).ok_or_else(|| ModelError::NotAField {
            segment: (*next).to_string(),
            path: (*next).to_string(),
        })?;
        return if deeper.is_empty() {
            Ok(child)
        } else {
            resolve_field(SelectionSet::from_field(child), deeper)
        };
    }
    let child = set.fields.get(*first).ok_or_else(|| ModelError::NotAField {
        segment: (*first).to_string(),
        path: (*first).to_string(),
    })?;
    if rest.is_empty() {
        Ok(child)
    } else {
        resolve_field(SelectionSet::from_field(child), rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_field_at_root() {
        let mut state = QueryState::new(OperationType::Query, "Query");
        state
            .insert_field(&Path::new(""), FieldNode::new("pokemons", None))
            .unwrap();
        assert!(state.query_structure.fields.contains_key("pokemons"));
    }

    #[test]
    fn insert_field_at_nested_path() {
        let mut state = QueryState::new(OperationType::Query, "Query");
        state
            .insert_field(&Path::new(""), FieldNode::new("pokemons", None))
            .unwrap();
        state
            .insert_field(&Path::new("pokemons"), FieldNode::new("name", None))
            .unwrap();
        let name = state.field(&["pokemons", "name"]).unwrap();
        assert_eq!(name.field_name, "name");
    }

    #[test]
    fn empty_state_renders_nothing() {
        let state = QueryState::new(OperationType::Query, "Query");
        assert!(state.is_empty());
    }
}
