//! Schema introspection.
//!
//! Builds the standard introspection request and condenses the answer into a
//! short summary of root operations and named types.

use serde::Deserialize;
use std::fmt;

use crate::transport::{QueryRequest, QueryResponse};

/// Operation name used for the introspection request.
pub const OPERATION_NAME: &str = "IntrospectionQuery";

const INTROSPECTION_QUERY: &str = r"
query IntrospectionQuery {
  __schema {
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types {
      ...FullType
    }
    directives {
      name
      description
      locations
      args {
        ...InputValue
      }
    }
  }
}

fragment FullType on __Type {
  kind
  name
  description
  fields(includeDeprecated: true) {
    name
    description
    args {
      ...InputValue
    }
    type {
      ...TypeRef
    }
    isDeprecated
    deprecationReason
  }
  inputFields {
    ...InputValue
  }
  interfaces {
    ...TypeRef
  }
  enumValues(includeDeprecated: true) {
    name
    description
    isDeprecated
    deprecationReason
  }
  possibleTypes {
    ...TypeRef
  }
}

fragment InputValue on __InputValue {
  name
  description
  type { ...TypeRef }
  defaultValue
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
}
";

/// Returns the introspection request.
pub fn request() -> QueryRequest {
    QueryRequest::new(INTROSPECTION_QUERY.trim()).with_operation_name(OPERATION_NAME)
}

/// A named type declared by the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry {
    pub name: String,
    pub kind: String,
}

/// Condensed view of an introspection result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchemaSummary {
    pub query_type: Option<String>,
    pub mutation_type: Option<String>,
    pub subscription_type: Option<String>,
    /// User-declared types, sorted by name; `__`-prefixed meta types are left out.
    pub types: Vec<TypeEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
    query_type: Option<RawNamed>,
    mutation_type: Option<RawNamed>,
    subscription_type: Option<RawNamed>,
    #[serde(default)]
    types: Vec<RawType>,
}

#[derive(Deserialize)]
struct RawNamed {
    name: Option<String>,
}

#[derive(Deserialize)]
struct RawType {
    kind: String,
    name: Option<String>,
}

impl SchemaSummary {
    /// Extracts a summary from an introspection response.
    ///
    /// Returns `None` for text responses or when `data.__schema` is missing or
    /// malformed.
    pub fn from_response(response: &QueryResponse) -> Option<Self> {
        let schema = response.data()?.get("__schema")?;
        let raw: RawSchema = serde_json::from_value(schema.clone()).ok()?;

        let mut types: Vec<TypeEntry> = raw
            .types
            .into_iter()
            .filter_map(|t| {
                let name = t.name?;
                (!name.starts_with("__")).then_some(TypeEntry { name, kind: t.kind })
            })
            .collect();
        types.sort_by(|a, b| a.name.cmp(&b.name));

        Some(Self {
            query_type: raw.query_type.and_then(|n| n.name),
            mutation_type: raw.mutation_type.and_then(|n| n.name),
            subscription_type: raw.subscription_type.and_then(|n| n.name),
            types,
        })
    }
}

impl fmt::Display for SchemaSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roots = [
            ("query", &self.query_type),
            ("mutation", &self.mutation_type),
            ("subscription", &self.subscription_type),
        ];
        for (label, name) in roots {
            if let Some(name) = name {
                writeln!(f, "{label}: {name}")?;
            }
        }

        writeln!(f, "types ({}):", self.types.len())?;
        for entry in &self.types {
            writeln!(f, "  {:<14} {}", entry.kind, entry.name)?;
        }
        Ok(())
    }
}
