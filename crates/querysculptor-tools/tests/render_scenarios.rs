mod support;

use indoc::indoc;
use pretty_assertions::assert_eq;
use querysculptor_model::OperationType;
use querysculptor_tools::{
    add_inline_fragment, build_query, select_field, set_argument, start_session, AddInlineFragmentInput,
    BuildQueryInput, SelectFieldInput, SetArgumentInput, StartSessionInput,
};
use support::test_context;

#[tokio::test]
async fn empty_session_renders_nothing() {
    let ctx = test_context().await;
    let started = start_session(
        &ctx,
        StartSessionInput {
            headers: Default::default(),
            operation_type: OperationType::Query,
            operation_name: None,
        },
    )
    .await
    .unwrap()
    .result;

    let built = build_query(
        &ctx,
        BuildQueryInput {
            session_id: started.session_id,
        },
    )
    .await
    .unwrap()
    .result;

    assert_eq!(built.document, "");
}

#[tokio::test]
async fn a_nested_selection_with_an_argument_renders_as_a_document() {
    let ctx = test_context().await;
    let started = start_session(
        &ctx,
        StartSessionInput {
            headers: Default::default(),
            operation_type: OperationType::Query,
            operation_name: Some("GetPokemon".to_string()),
        },
    )
    .await
    .unwrap()
    .result;
    let session_id = started.session_id;

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
            session_id: session_id.clone(),
            field_path: "pokemon".to_string(),
            arg_name: "id".to_string(),
            value: serde_json::json!("25"),
            is_variable: false,
            is_enum: false,
            is_typed: true,
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

    let built = build_query(&ctx, BuildQueryInput { session_id }).await.unwrap().result;

    assert_eq!(
        built.document,
        indoc! {r#"
            query GetPokemon {
              pokemon(id: "25") {
                name
              }
            }"#}
    );
}

#[tokio::test]
async fn an_alias_renders_ahead_of_the_field_name() {
    let ctx = test_context().await;
    let started = start_session(
        &ctx,
        StartSessionInput {
            headers: Default::default(),
            operation_type: OperationType::Query,
            operation_name: None,
        },
    )
    .await
    .unwrap()
    .result;
    let session_id = started.session_id;

    select_field(
        &ctx,
        SelectFieldInput {
            session_id: session_id.clone(),
            parent_path: String::new(),
            field_name: "pokemon".to_string(),
            alias: Some("ash".to_string()),
        },
    )
    .await
    .unwrap();

    let built = build_query(&ctx, BuildQueryInput { session_id }).await.unwrap().result;
    assert!(built.document.contains("ash: pokemon"));
}

#[tokio::test]
async fn an_inline_fragment_selection_renders_a_populated_on_type_block() {
    let ctx = test_context().await;
    let started = start_session(
        &ctx,
        StartSessionInput {
            headers: Default::default(),
            operation_type: OperationType::Query,
            operation_name: None,
        },
    )
    .await
    .unwrap()
    .result;
    let session_id = started.session_id;

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
            field_name: "trainer".to_string(),
            alias: None,
        },
    )
    .await
    .unwrap();

    add_inline_fragment(
        &ctx,
        AddInlineFragmentInput {
            session_id: session_id.clone(),
            path: "pokemon.trainer".to_string(),
            on_type: "Trainer".to_string(),
        },
    )
    .await
    .unwrap();

    select_field(
        &ctx,
        SelectFieldInput {
            session_id: session_id.clone(),
            parent_path: "pokemon.trainer.on:Trainer".to_string(),
            field_name: "name".to_string(),
            alias: None,
        },
    )
    .await
    .unwrap();

    let built = build_query(&ctx, BuildQueryInput { session_id }).await.unwrap().result;

    assert_eq!(
        built.document,
        indoc! {r#"
            query {
              pokemon {
                trainer {
                  ... on Trainer {
                    name
                  }
                }
              }
            }"#}
    );
}
