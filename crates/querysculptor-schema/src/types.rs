use apollo_compiler::schema::ExtendedType;
use apollo_compiler::validation::Valid;
use apollo_compiler::Schema;
use querysculptor_model::OperationType;

use crate::error::SchemaError;

/// One field's signature as seen from the schema: its own type, and its
/// arguments' types and defaults. Deliberately a plain data copy rather
/// than a borrow into `apollo_compiler`'s types, so callers outside this
/// crate never need to depend on `apollo_compiler` themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSignature {
    pub name: String,
    pub type_string: String,
    pub arguments: Vec<ArgumentSignature>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentSignature {
    pub name: String,
    pub type_string: String,
    pub default_value: Option<String>,
}

/// A validated schema, plus the raw introspection JSON it was synthesized
/// from and the SDL text used to parse it.
pub struct CachedSchema {
    pub endpoint: String,
    pub raw_introspection: serde_json::Value,
    pub sdl: String,
    compiled: Valid<Schema>,
}

impl CachedSchema {
    pub fn from_sdl(
        endpoint: &str,
        sdl: String,
        raw_introspection: serde_json::Value,
    ) -> Result<Self, SchemaError> {
        let compiled = Schema::parse_and_validate(&sdl, "introspection.graphql").map_err(|e| {
            SchemaError::InvalidSchema {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self {
            endpoint: endpoint.to_string(),
            raw_introspection,
            sdl,
            compiled,
        })
    }

    pub fn compiled(&self) -> &Valid<Schema> {
        &self.compiled
    }

    /// The root type name for `op`, e.g. `"Query"`, resolved from the
    /// schema's `schema { query: ... }` definition.
    pub fn root_type_name(&self, op: OperationType) -> Option<&str> {
        let apollo_op = match op {
            OperationType::Query => apollo_compiler::ast::OperationType::Query,
            OperationType::Mutation => apollo_compiler::ast::OperationType::Mutation,
            OperationType::Subscription => apollo_compiler::ast::OperationType::Subscription,
        };
        self.compiled
            .root_operation(apollo_op)
            .map(|name| name.as_str())
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.compiled.types.contains_key(type_name)
    }

    /// All fields declared directly on an object or interface type, in
    /// schema declaration order. Returns `None` for unions, scalars,
    /// enums, input objects, and unknown type names.
    pub fn fields_of(&self, type_name: &str) -> Option<Vec<FieldSignature>> {
        match self.compiled.types.get(type_name)? {
            ExtendedType::Object(obj) => Some(
                obj.fields
                    .values()
                    .map(|f| field_signature(f.name.as_str(), &f.ty.to_string(), &f.arguments))
                    .collect(),
            ),
            ExtendedType::Interface(iface) => Some(
                iface
                    .fields
                    .values()
                    .map(|f| field_signature(f.name.as_str(), &f.ty.to_string(), &f.arguments))
                    .collect(),
            ),
            _ => None,
        }
    }

    pub fn field(&self, type_name: &str, field_name: &str) -> Option<FieldSignature> {
        self.fields_of(type_name)?
            .into_iter()
            .find(|f| f.name == field_name)
    }

    /// Navigates a dotted field path (`"pokemons.moves"`) from `root_type`,
    /// following each segment's declared return type, and returns the
    /// terminal field's signature. A segment of the form `"on:TypeName"`
    /// hops into an inline fragment instead of a field: the current type
    /// switches to `TypeName` directly, without consuming a field
    /// signature, matching `querysculptor_model`'s own path-addressing
    /// convention for reaching a selection nested under `... on TypeName`.
    pub fn field_at_path(&self, root_type: &str, path: &[&str]) -> Option<FieldSignature> {
        let mut current_type = root_type.to_string();
        let mut signature = None;
        for segment in path {
            if let Some(on_type) = segment.strip_prefix("on:") {
                current_type = on_type.to_string();
                continue;
            }
            let sig = self.field(&current_type, segment)?;
            current_type = bare_type_name(&sig.type_string);
            signature = Some(sig);
        }
        signature
    }
}

fn field_signature(
    name: &str,
    type_string: &str,
    arguments: &[apollo_compiler::Node<apollo_compiler::schema::InputValueDefinition>],
) -> FieldSignature {
    FieldSignature {
        name: name.to_string(),
        type_string: type_string.to_string(),
        arguments: arguments
            .iter()
            .map(|a| ArgumentSignature {
                name: a.name.to_string(),
                type_string: a.ty.to_string(),
                default_value: a.default_value.as_ref().map(|v| v.to_string()),
            })
            .collect(),
    }
}

/// Strips `!` and `[...]` wrapping from a GraphQL type string, leaving the
/// named type, e.g. `"[Pokemon!]!"` -> `"Pokemon"`.
pub fn bare_type_name(type_string: &str) -> String {
    type_string
        .trim_end_matches('!')
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim_end_matches('!')
        .to_string()
}
