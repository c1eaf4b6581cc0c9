use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;

use crate::error::SchemaError;

/// The standard GraphQL introspection query, requesting everything
/// `sdl::build_sdl` needs to reconstruct SDL text.
pub const INTROSPECTION_QUERY: &str = r#"
query QuerySculptorIntrospection {
  __schema {
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types {
      kind
      name
      description
      fields(includeDeprecated: true) {
        name
        args { name type { ...TypeRef } defaultValue }
        type { ...TypeRef }
      }
      inputFields {
        name
        type { ...TypeRef }
        defaultValue
      }
      interfaces { name }
      enumValues(includeDeprecated: true) { name }
      possibleTypes { name }
    }
  }
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
        ofType {
          kind
          name
          ofType {
            kind
            name
            ofType {
              kind
              name
            }
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
pub struct IntrospectionEnvelope {
    pub data: Option<IntrospectionData>,
    pub errors: Option<Vec<GraphQlErrorMessage>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlErrorMessage {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct IntrospectionData {
    #[serde(rename = "__schema")]
    pub schema: IntrospectionSchema,
}

#[derive(Debug, Deserialize)]
pub struct IntrospectionSchema {
    #[serde(rename = "queryType")]
    pub query_type: Option<NamedRef>,
    #[serde(rename = "mutationType")]
    pub mutation_type: Option<NamedRef>,
    #[serde(rename = "subscriptionType")]
    pub subscription_type: Option<NamedRef>,
    pub types: Vec<IntrospectionType>,
}

#[derive(Debug, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct IntrospectionType {
    pub kind: String,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<IntrospectionField>>,
    #[serde(rename = "inputFields", default)]
    pub input_fields: Option<Vec<IntrospectionInputValue>>,
    #[serde(default)]
    pub interfaces: Option<Vec<NamedRef>>,
    #[serde(rename = "enumValues", default)]
    pub enum_values: Option<Vec<NamedRef>>,
    #[serde(rename = "possibleTypes", default)]
    pub possible_types: Option<Vec<NamedRef>>,
}

#[derive(Debug, Deserialize)]
pub struct IntrospectionField {
    pub name: String,
    #[serde(default)]
    pub args: Vec<IntrospectionInputValue>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

#[derive(Debug, Deserialize)]
pub struct IntrospectionInputValue {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(rename = "defaultValue")]
    pub default_value: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TypeRef {
    pub kind: String,
    pub name: Option<String>,
    #[serde(rename = "ofType")]
    pub of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    /// Renders this type reference as a GraphQL type string, e.g. `[Int!]!`.
    pub fn render(&self) -> String {
        match self.kind.as_str() {
            "NON_NULL" => format!(
                "{}!",
                self.of_type.as_ref().map(|t| t.render()).unwrap_or_default()
            ),
            "LIST" => format!(
                "[{}]",
                self.of_type.as_ref().map(|t| t.render()).unwrap_or_default()
            ),
            _ => self.name.clone().unwrap_or_default(),
        }
    }
}

/// Performs the one-shot introspection POST with a 10 second timeout,
/// merging environment-default headers under session headers (session
/// wins on key collision).
pub async fn fetch_introspection(
    client: &reqwest::Client,
    endpoint: &str,
    env_headers: &HashMap<String, String>,
    session_headers: &HashMap<String, String>,
) -> Result<(IntrospectionSchema, serde_json::Value), SchemaError> {
    let mut headers = reqwest::header::HeaderMap::new();
    for (k, v) in env_headers.iter().chain(session_headers.iter()) {
        if let (Ok(name), Ok(value)) = (
            reqwest::header::HeaderName::from_bytes(k.as_bytes()),
            reqwest::header::HeaderValue::from_str(v),
        ) {
            headers.insert(name, value);
        }
    }

    let body = serde_json::json!({ "query": INTROSPECTION_QUERY });

    let response = client
        .post(endpoint)
        .headers(headers)
        .json(&body)
        .timeout(Duration::from_secs(10))
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                SchemaError::Timeout {
                    endpoint: endpoint.to_string(),
                }
            } else {
                SchemaError::RequestFailed {
                    endpoint: endpoint.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SchemaError::NonSuccessStatus {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        });
    }

    let raw: serde_json::Value = response.json().await.map_err(|e| SchemaError::RequestFailed {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })?;

    let envelope: IntrospectionEnvelope =
        serde_json::from_value(raw.clone()).map_err(|e| SchemaError::RequestFailed {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;

    if let Some(errors) = envelope.errors.filter(|e| !e.is_empty()) {
        let messages = errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(SchemaError::GraphQlErrors {
            endpoint: endpoint.to_string(),
            messages,
        });
    }

    let schema = envelope
        .data
        .map(|d| d.schema)
        .ok_or_else(|| SchemaError::GraphQlErrors {
            endpoint: endpoint.to_string(),
            messages: "introspection response had no 'data'".to_string(),
        })?;

    let raw_schema = raw
        .get("data")
        .and_then(|d| d.get("__schema"))
        .cloned()
        .unwrap_or(serde_json::Value::Null);

    Ok((schema, raw_schema))
}
