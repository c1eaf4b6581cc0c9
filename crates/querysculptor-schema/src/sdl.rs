use crate::introspection::{IntrospectionInputValue, IntrospectionSchema, IntrospectionType};

const BUILTIN_SCALARS: &[&str] = &["Int", "Float", "String", "Boolean", "ID"];

/// Synthesizes GraphQL SDL text from a standard introspection result.
///
/// No published crate performs this conversion in the direction
/// QuerySculptor needs it (introspection JSON to SDL); existing GraphQL
/// tooling in this space only answers introspection *from* a schema. This
/// walks `__schema.types` and emits one type definition per entry, skipping
/// introspection's own meta-types (`__Type`, `__Field`, ...) and the
/// built-in scalars, which `apollo_compiler::Schema` already knows about.
pub fn build_sdl(schema: &IntrospectionSchema) -> String {
    let mut out = String::new();

    out.push_str("schema {\n");
    if let Some(q) = &schema.query_type {
        out.push_str(&format!("  query: {}\n", q.name));
    }
    if let Some(m) = &schema.mutation_type {
        out.push_str(&format!("  mutation: {}\n", m.name));
    }
    if let Some(s) = &schema.subscription_type {
        out.push_str(&format!("  subscription: {}\n", s.name));
    }
    out.push_str("}\n\n");

    for ty in &schema.types {
        let Some(name) = &ty.name else { continue };
        if name.starts_with("__") || BUILTIN_SCALARS.contains(&name.as_str()) {
            continue;
        }
        render_type(&mut out, ty, name);
    }

    out
}

fn render_type(out: &mut String, ty: &IntrospectionType, name: &str) {
    match ty.kind.as_str() {
        "SCALAR" => out.push_str(&format!("scalar {name}\n\n")),
        "OBJECT" => {
            let implements = implements_clause(ty);
            out.push_str(&format!("type {name}{implements} {{\n"));
            render_fields(out, ty);
            out.push_str("}\n\n");
        }
        "INTERFACE" => {
            let implements = implements_clause(ty);
            out.push_str(&format!("interface {name}{implements} {{\n"));
            render_fields(out, ty);
            out.push_str("}\n\n");
        }
        "UNION" => {
            let members = ty
                .possible_types
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|t| t.name.clone())
                .collect::<Vec<_>>()
                .join(" | ");
            out.push_str(&format!("union {name} = {members}\n\n"));
        }
        "ENUM" => {
            out.push_str(&format!("enum {name} {{\n"));
            for v in ty.enum_values.as_deref().unwrap_or_default() {
                out.push_str(&format!("  {}\n", v.name));
            }
            out.push_str("}\n\n");
        }
        "INPUT_OBJECT" => {
            out.push_str(&format!("input {name} {{\n"));
            for f in ty.input_fields.as_deref().unwrap_or_default() {
                out.push_str(&format!("  {}\n", render_input_value(f)));
            }
            out.push_str("}\n\n");
        }
        _ => {}
    }
}

fn implements_clause(ty: &IntrospectionType) -> String {
    let interfaces = ty.interfaces.as_deref().unwrap_or_default();
    if interfaces.is_empty() {
        String::new()
    } else {
        format!(
            " implements {}",
            interfaces
                .iter()
                .map(|i| i.name.as_str())
                .collect::<Vec<_>>()
                .join(" & ")
        )
    }
}

fn render_fields(out: &mut String, ty: &IntrospectionType) {
    for field in ty.fields.as_deref().unwrap_or_default() {
        let args = if field.args.is_empty() {
            String::new()
        } else {
            let rendered = field
                .args
                .iter()
                .map(render_input_value)
                .collect::<Vec<_>>()
                .join(", ");
            format!("({rendered})")
        };
        out.push_str(&format!(
            "  {}{}: {}\n",
            field.name,
            args,
            field.type_ref.render()
        ));
    }
}

fn render_input_value(v: &IntrospectionInputValue) -> String {
    match &v.default_value {
        Some(default) => format!("{}: {} = {}", v.name, v.type_ref.render(), default),
        None => format!("{}: {}", v.name, v.type_ref.render()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspection::{IntrospectionField, NamedRef, TypeRef};

    fn type_ref(name: &str) -> TypeRef {
        TypeRef {
            kind: "SCALAR".into(),
            name: Some(name.into()),
            of_type: None,
        }
    }

    #[test]
    fn synthesizes_a_minimal_query_type() {
        let schema = IntrospectionSchema {
            query_type: Some(NamedRef { name: "Query".into() }),
            mutation_type: None,
            subscription_type: None,
            types: vec![IntrospectionType {
                kind: "OBJECT".into(),
                name: Some("Query".into()),
                description: None,
                fields: Some(vec![IntrospectionField {
                    name: "pokemons".into(),
                    args: vec![],
                    type_ref: type_ref("Int"),
                }]),
                input_fields: None,
                interfaces: None,
                enum_values: None,
                possible_types: None,
            }],
        };
        let sdl = build_sdl(&schema);
        assert!(sdl.contains("query: Query"));
        assert!(sdl.contains("type Query {"));
        assert!(sdl.contains("pokemons: Int"));
    }

    #[test]
    fn skips_introspection_meta_types_and_builtin_scalars() {
        let schema = IntrospectionSchema {
            query_type: Some(NamedRef { name: "Query".into() }),
            mutation_type: None,
            subscription_type: None,
            types: vec![
                IntrospectionType {
                    kind: "OBJECT".into(),
                    name: Some("__Type".into()),
                    description: None,
                    fields: None,
                    input_fields: None,
                    interfaces: None,
                    enum_values: None,
                    possible_types: None,
                },
                IntrospectionType {
                    kind: "SCALAR".into(),
                    name: Some("String".into()),
                    description: None,
                    fields: None,
                    input_fields: None,
                    interfaces: None,
                    enum_values: None,
                    possible_types: None,
                },
            ],
        };
        let sdl = build_sdl(&schema);
        assert!(!sdl.contains("__Type"));
        assert!(!sdl.contains("scalar String"));
    }
}
