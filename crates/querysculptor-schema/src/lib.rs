//! Schema cache: fetches a GraphQL endpoint's schema via introspection once
//! per process, and exposes it both as a compiled, validated
//! `apollo_compiler::Schema` and as the small lookup surface
//! (`CachedSchema::field`, `CachedSchema::root_type_name`, ...) the rest of
//! QuerySculptor uses so that callers never need `apollo_compiler` types in
//! their own signatures.

mod cache;
mod error;
mod introspection;
mod sdl;
mod types;

pub use cache::SchemaCache;
pub use error::SchemaError;
pub use introspection::{fetch_introspection, INTROSPECTION_QUERY};
pub use types::{bare_type_name, ArgumentSignature, CachedSchema, FieldSignature};
