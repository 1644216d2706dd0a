//! Request and response types for the query transport.
//!
//! `QueryRequest` is what the calling surface hands to a fetcher; `QueryResponse`
//! is what comes back, either parsed JSON or the raw body text.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{GqlpadError, Result};

/// A single GraphQL request as sent on the wire.
///
/// Serializes to `{"query": ..., "variables": ..., "operationName": ...}` with
/// absent optional fields omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    variables: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    operation_name: Option<String>,
}

impl QueryRequest {
    /// Creates a request for the given GraphQL document.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
            operation_name: None,
        }
    }

    /// Sets the variables map.
    pub fn with_variables(mut self, variables: Map<String, Value>) -> Self {
        self.variables = Some(variables);
        self
    }

    /// Sets the operation name.
    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Parses a variables argument and attaches it.
    ///
    /// The text must be a JSON object; anything else is rejected.
    pub fn with_variables_json(self, text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| GqlpadError::invalid_request(format!("Variables are not valid JSON: {e}")))?;

        match value {
            Value::Object(map) => Ok(self.with_variables(map)),
            other => Err(GqlpadError::invalid_request(format!(
                "Variables must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn variables(&self) -> Option<&Map<String, Value>> {
        self.variables.as_ref()
    }

    pub fn operation_name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }

    /// Checks the only constraint the transport enforces: a non-blank query.
    ///
    /// Variables and operation name are the backend's business.
    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(GqlpadError::invalid_request("Query must not be empty"));
        }
        Ok(())
    }

    /// Serializes the request to its JSON wire body.
    pub fn to_body(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| GqlpadError::internal(format!("Failed to serialize request: {e}")))
    }
}

/// The result of one query, as seen by the calling surface.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResponse {
    /// The body parsed as JSON (normally a `{data, errors}` envelope).
    Json(Value),
    /// The body was not JSON; kept verbatim for display.
    Text(String),
}

impl QueryResponse {
    /// Interprets a response body: JSON if it parses, raw text otherwise.
    pub fn from_body(body: String) -> Self {
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(body),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Returns the `data` member of a JSON envelope, if any.
    pub fn data(&self) -> Option<&Value> {
        self.as_json().and_then(|v| v.get("data"))
    }

    /// Returns the messages of the envelope's `errors` array.
    ///
    /// Entries without a string `message` are rendered as compact JSON.
    pub fn error_messages(&self) -> Vec<String> {
        let Some(errors) = self
            .as_json()
            .and_then(|v| v.get("errors"))
            .and_then(Value::as_array)
        else {
            return Vec::new();
        };

        errors
            .iter()
            .map(|e| match e.get("message").and_then(Value::as_str) {
                Some(msg) => msg.to_string(),
                None => e.to_string(),
            })
            .collect()
    }

    /// Renders the response for display.
    pub fn render(&self, pretty: bool) -> String {
        match self {
            Self::Json(value) if pretty => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Self::Json(value) => value.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
