use indexmap::IndexMap;
use querysculptor_model::{ArgValue, Directive, FieldNode, InlineFragment, QueryState};
use querysculptor_validator::serialize_graphql_value;

const INDENT: &str = "  ";

/// Renders `state` as GraphQL document text, or the empty string if the
/// state has nothing to render (builder rule 2).
pub fn render_query_state(state: &QueryState) -> String {
    if state.is_empty() {
        return String::new();
    }

    let mut header_tokens = vec![state.operation_type.as_str().to_string()];
    if let Some(name) = &state.operation_name {
        header_tokens.push(name.clone());
    }
    if !state.variables_schema.is_empty() {
        header_tokens.push(format!("({})", render_variable_definitions(state)));
    }
    if !state.operation_directives.is_empty() {
        header_tokens.push(render_directives_joined(&state.operation_directives));
    }

    let mut out = header_tokens.join(" ");
    out.push_str(" {\n");
    render_selection_body(
        &state.query_structure.fields,
        &state.query_structure.fragment_spreads,
        &state.query_structure.inline_fragments,
        1,
        &mut out,
    );
    out.push('}');

    for (name, fragment) in &state.fragments {
        out.push_str("\n\n");
        out.push_str(&format!("fragment {name} on {} {{\n", fragment.on_type));
        render_selection_body(&fragment.fields, &[], &[], 1, &mut out);
        out.push('}');
    }

    out.trim_end().to_string()
}

fn render_variable_definitions(state: &QueryState) -> String {
    state
        .variables_schema
        .iter()
        .map(|(name, type_string)| {
            let bare = name.trim_start_matches('$');
            let mut rendered = format!("${bare}: {type_string}");
            if let Some(default) = state.variables_defaults.get(name) {
                rendered.push_str(&format!(" = {}", serialize_graphql_value(default)));
            }
            rendered
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_selection_body(
    fields: &IndexMap<String, FieldNode>,
    fragment_spreads: &[String],
    inline_fragments: &[InlineFragment],
    indent: usize,
    out: &mut String,
) {
    for field in fields.values() {
        render_field(field, indent, out);
    }
    for spread in fragment_spreads {
        out.push_str(&INDENT.repeat(indent));
        out.push_str("...");
        out.push_str(spread);
        out.push('\n');
    }
    for inline in inline_fragments {
        render_inline_fragment(inline, indent, out);
    }
}

fn render_field(field: &FieldNode, indent: usize, out: &mut String) {
    out.push_str(&INDENT.repeat(indent));
    if let Some(alias) = &field.alias {
        out.push_str(alias);
        out.push_str(": ");
    }
    out.push_str(&field.field_name);
    out.push_str(&render_arguments(&field.args));
    for directive in &field.directives {
        out.push(' ');
        out.push_str(&render_directive(directive));
    }

    let has_children =
        !field.fields.is_empty() || !field.fragment_spreads.is_empty() || !field.inline_fragments.is_empty();
    if has_children {
        out.push_str(" {\n");
        render_selection_body(&field.fields, &field.fragment_spreads, &field.inline_fragments, indent + 1, out);
        out.push_str(&INDENT.repeat(indent));
        out.push('}');
    }
    out.push('\n');
}

fn render_inline_fragment(inline: &InlineFragment, indent: usize, out: &mut String) {
    out.push_str(&INDENT.repeat(indent));
    out.push_str("... on ");
    out.push_str(&inline.on_type);
    out.push_str(" {\n");
    render_selection_body(&inline.selections, &[], &[], indent + 1, out);
    out.push_str(&INDENT.repeat(indent));
    out.push_str("}\n");
}

fn render_arguments(args: &IndexMap<String, ArgValue>) -> String {
    if args.is_empty() {
        return String::new();
    }
    let rendered = args
        .iter()
        .map(|(name, value)| format!("{name}: {}", render_arg_value(value)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("({rendered})")
}

/// Renders a single `ArgValue` per its variant: a variable prints as
/// `$name`, an enum member prints verbatim, and anything carrying a
/// `serde_json::Value` goes through the shared GraphQL value serializer —
/// `PreQuoted` splices its text unchanged, bypassing that serializer
/// entirely, the direct replacement for the `__graphqlString` marker-object
/// trick some JavaScript implementations use.
fn render_arg_value(value: &ArgValue) -> String {
    match value {
        ArgValue::Variable { name } => format!("${name}"),
        ArgValue::Enum { symbol } => symbol.clone(),
        ArgValue::Typed { value, .. } => serialize_graphql_value(value),
        ArgValue::Raw { value } => serialize_graphql_value(value),
        ArgValue::PreQuoted { text } => text.clone(),
    }
}

fn render_directive(directive: &Directive) -> String {
    let mut rendered = format!("@{}", directive.name);
    if !directive.arguments.is_empty() {
        let args = directive
            .arguments
            .iter()
            .map(|a| format!("{}: {}", a.name, render_arg_value(&a.value)))
            .collect::<Vec<_>>()
            .join(", ");
        rendered.push_str(&format!("({args})"));
    }
    rendered
}

fn render_directives_joined(directives: &[Directive]) -> String {
    directives.iter().map(render_directive).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use querysculptor_model::{OperationType, Path};
    use serde_json::json;

    #[test]
    fn empty_state_renders_to_empty_string() {
        let state = QueryState::new(OperationType::Query, "Query");
        assert_eq!(render_query_state(&state), "");
    }

    #[test]
    fn s1_simple_typed_argument_query() {
        let mut state = QueryState::new(OperationType::Query, "Query");
        let mut pokemons = FieldNode::new("pokemons", None);
        pokemons.args.insert(
            "first".to_string(),
            ArgValue::Typed {
                value: json!(10),
                type_name: "Int".to_string(),
            },
        );
        state.insert_field(&Path::new(""), pokemons).unwrap();
        state
            .insert_field(&Path::new("pokemons"), FieldNode::new("name", None))
            .unwrap();

        assert_eq!(
            render_query_state(&state),
            "query {\n  pokemons(first: 10) {\n    name\n  }\n}"
        );
    }

    #[test]
    fn s5_variable_reference_argument() {
        let mut state = QueryState::new(OperationType::Query, "Query");
        state.variables_schema.insert("$n".to_string(), "Int".to_string());
        let mut pokemons = FieldNode::new("pokemons", None);
        pokemons
            .args
            .insert("first".to_string(), ArgValue::Variable { name: "n".to_string() });
        state.insert_field(&Path::new(""), pokemons).unwrap();

        let rendered = render_query_state(&state);
        assert!(rendered.starts_with("query ($n: Int) {"));
        assert!(rendered.contains("pokemons(first: $n)"));
    }

    #[test]
    fn aliases_and_nested_selections_render_with_increasing_indent() {
        let mut state = QueryState::new(OperationType::Query, "Query");
        let mut mons = FieldNode::new("pokemons", Some("mons".to_string()));
        let mut moves = FieldNode::new("moves", None);
        moves.insert_child(FieldNode::new("name", None)).unwrap();
        mons.insert_child(moves).unwrap();
        state.insert_field(&Path::new(""), mons).unwrap();

        assert_eq!(
            render_query_state(&state),
            "query {\n  mons: pokemons {\n    moves {\n      name\n    }\n  }\n}"
        );
    }

    #[test]
    fn fragment_spreads_and_definitions_render_after_operation() {
        use querysculptor_model::FragmentDef;

        let mut state = QueryState::new(OperationType::Query, "Query");
        state
            .spread_fragment(&Path::new(""), "pokemonFields")
            .unwrap();
        let mut fragment = FragmentDef::new("Pokemon");
        fragment.fields.insert("name".to_string(), FieldNode::new("name", None));
        state.fragments.insert("pokemonFields".to_string(), fragment);

        assert_eq!(
            render_query_state(&state),
            "query {\n  ...pokemonFields\n}\n\nfragment pokemonFields on Pokemon {\n  name\n}"
        );
    }

    #[test]
    fn inline_fragments_render_with_on_type_clause() {
        let mut state = QueryState::new(OperationType::Query, "Query");
        let mut inline = InlineFragment::new("Trainer");
        inline.selections.insert("name".to_string(), FieldNode::new("name", None));
        state.add_inline_fragment(&Path::new(""), inline).unwrap();

        assert_eq!(
            render_query_state(&state),
            "query {\n  ... on Trainer {\n    name\n  }\n}"
        );
    }
}
