mod support;

use querysculptor_model::OperationType;
use querysculptor_tools::{
    add_directive, define_fragment, select_field, set_argument, set_variable, set_variable_value, start_session,
    validate_query, AddDirectiveInput, DefineFragmentInput, ErrorKind, SelectFieldInput, SetArgumentInput,
    SetVariableInput, SetVariableValueInput, StartSessionInput, ValidateQueryInput,
};
use support::test_context;

async fn new_session(ctx: &querysculptor_tools::AppContext) -> String {
    start_session(
        ctx,
        StartSessionInput {
            headers: Default::default(),
            operation_type: OperationType::Query,
            operation_name: None,
        },
    )
    .await
    .unwrap()
    .result
    .session_id
}

#[tokio::test]
async fn selecting_an_unknown_field_fails_with_a_schema_error_and_a_suggestion() {
    let ctx = test_context().await;
    let session_id = new_session(&ctx).await;

    let err = select_field(
        &ctx,
        SelectFieldInput {
            session_id,
            parent_path: String::new(),
            field_name: "pokemn".to_string(),
            alias: None,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Schema);
    assert!(err.message.contains("pokemn"));
}

#[tokio::test]
async fn selecting_a_duplicate_sibling_selection_key_is_rejected() {
    let ctx = test_context().await;
    let session_id = new_session(&ctx).await;

    select_field(
        &ctx,
        SelectFieldInput {
            session_id: session_id.clone(),
            parent_path: String::new(),
            field_name: "pokemons".to_string(),
            alias: None,
        },
    )
    .await
    .unwrap();

    let err = select_field(
        &ctx,
        SelectFieldInput {
            session_id,
            parent_path: String::new(),
            field_name: "pokemons".to_string(),
            alias: None,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn an_argument_referencing_an_undeclared_variable_is_rejected() {
    let ctx = test_context().await;
    let session_id = new_session(&ctx).await;

    select_field(
        &ctx,
        SelectFieldInput {
            session_id: session_id.clone(),
            parent_path: String::new(),
            field_name: "pokemon".to_string(),
            alias: None,
        },
    )
    .await
    .unwrap();

    let err = set_argument(
        &ctx,
        SetArgumentInput {
            session_id,
            field_path: "pokemon".to_string(),
            arg_name: "id".to_string(),
            value: serde_json::json!("$missing"),
            is_variable: true,
            is_enum: false,
            is_typed: false,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn s4_declaring_a_variable_with_a_common_type_mistake_is_rejected_with_a_suggestion() {
    let ctx = test_context().await;
    let session_id = new_session(&ctx).await;

    let err = set_variable(
        &ctx,
        SetVariableInput {
            session_id,
            var_name: "$n".to_string(),
            type_string: "integer".to_string(),
            default: None,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.message, "Invalid type 'integer'. Did you mean 'Int'?");
}

#[tokio::test]
async fn declaring_a_variable_then_referencing_it_succeeds() {
    let ctx = test_context().await;
    let session_id = new_session(&ctx).await;

    set_variable(
        &ctx,
        SetVariableInput {
            session_id: session_id.clone(),
            var_name: "$id".to_string(),
            type_string: "ID!".to_string(),
            default: None,
        },
    )
    .await
    .unwrap();

    set_variable_value(
        &ctx,
        SetVariableValueInput {
            session_id: session_id.clone(),
            var_name: "$id".to_string(),
            value: serde_json::json!("25"),
        },
    )
    .await
    .unwrap();

    select_field(
        &ctx,
        SelectFieldInput {
            session_id: session_id.clone(),
            parent_path: String::new(),
            field_name: "pokemon".to_string(),
            alias: None,
        },
    )
    .await
    .unwrap();

    set_argument(
        &ctx,
        SetArgumentInput {
            session_id,
            field_path: "pokemon".to_string(),
            arg_name: "id".to_string(),
            value: serde_json::json!("$id"),
            is_variable: true,
            is_enum: false,
            is_typed: false,
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn a_bare_numeric_string_argument_earns_a_coercion_warning() {
    let ctx = test_context().await;
    let session_id = new_session(&ctx).await;

    select_field(
        &ctx,
        SelectFieldInput {
            session_id: session_id.clone(),
            parent_path: String::new(),
            field_name: "pokemons".to_string(),
            alias: None,
        },
    )
    .await
    .unwrap();

    let outcome = set_argument(
        &ctx,
        SetArgumentInput {
            session_id,
            field_path: "pokemons".to_string(),
            arg_name: "first".to_string(),
            value: serde_json::json!("10"),
            is_variable: false,
            is_enum: false,
            is_typed: false,
        },
    )
    .await
    .unwrap();

    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].contains("set-typed-argument"));
}

#[tokio::test]
async fn a_pagination_argument_over_the_cap_is_rejected() {
    let ctx = test_context().await;
    let session_id = new_session(&ctx).await;

    select_field(
        &ctx,
        SelectFieldInput {
            session_id: session_id.clone(),
            parent_path: String::new(),
            field_name: "pokemons".to_string(),
            alias: None,
        },
    )
    .await
    .unwrap();

    let err = set_argument(
        &ctx,
        SetArgumentInput {
            session_id,
            field_path: "pokemons".to_string(),
            arg_name: "first".to_string(),
            value: serde_json::json!(600),
            is_variable: false,
            is_enum: false,
            is_typed: true,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Limit);
}

#[tokio::test]
async fn defining_a_fragment_on_an_unknown_type_is_rejected() {
    let ctx = test_context().await;
    let session_id = new_session(&ctx).await;

    let err = define_fragment(
        &ctx,
        DefineFragmentInput {
            session_id,
            name: "bogusFields".to_string(),
            on_type: "Nonexistent".to_string(),
            fields: Default::default(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Schema);
}

#[tokio::test]
async fn an_invalid_directive_name_is_rejected_before_touching_the_session() {
    let ctx = test_context().await;
    let session_id = new_session(&ctx).await;

    let err = add_directive(
        &ctx,
        AddDirectiveInput {
            session_id,
            path: "operation".to_string(),
            name: "2invalid".to_string(),
            arguments: vec![],
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn validating_a_query_missing_a_required_argument_fails_schema_validation() {
    // `pokemon(id: ID!)` has no default, so selecting it bare fails
    // apollo-compiler's own required-argument rule before the
    // missing-required-argument warning pass ever gets a chance to run.
    let ctx = test_context().await;
    let session_id = new_session(&ctx).await;

    select_field(
        &ctx,
        SelectFieldInput {
            session_id: session_id.clone(),
            parent_path: String::new(),
            field_name: "pokemon".to_string(),
            alias: None,
        },
    )
    .await
    .unwrap();
    select_field(
        &ctx,
        SelectFieldInput {
            session_id: session_id.clone(),
            parent_path: "pokemon".to_string(),
            field_name: "name".to_string(),
            alias: None,
        },
    )
    .await
    .unwrap();

    let err = validate_query(&ctx, ValidateQueryInput { session_id }).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Schema);
}

#[tokio::test]
async fn validating_a_fully_satisfied_query_succeeds_with_no_warnings() {
    let ctx = test_context().await;
    let session_id = new_session(&ctx).await;

    select_field(
        &ctx,
        SelectFieldInput {
            session_id: session_id.clone(),
            parent_path: String::new(),
            field_name: "pokemons".to_string(),
            alias: None,
        },
    )
    .await
    .unwrap();
    select_field(
        &ctx,
        SelectFieldInput {
            session_id: session_id.clone(),
            parent_path: "pokemons".to_string(),
            field_name: "name".to_string(),
            alias: None,
        },
    )
    .await
    .unwrap();

    let outcome = validate_query(&ctx, ValidateQueryInput { session_id }).await.unwrap();
    assert!(outcome.warnings.is_empty());
    assert!(outcome.result.document.contains("pokemons"));
}
