//! Mock fetcher for testing.
//!
//! Returns canned bodies based on the query text and records every request.

use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

use crate::error::{GqlpadError, Result};
use crate::transport::types::{QueryRequest, QueryResponse};
use crate::transport::Fetcher;

/// Body returned when no pattern matches.
const DEFAULT_BODY: &str = r#"{"data":{}}"#;

#[derive(Debug, Clone)]
enum Canned {
    Body(String),
    Unreachable,
}

/// Fetcher that never touches the network.
///
/// Canned bodies go through the same JSON-or-text interpretation as the HTTP
/// fetcher, so a non-JSON body comes back as [`QueryResponse::Text`].
#[derive(Debug, Default)]
pub struct MockFetcher {
    /// Pattern mappings (substring of the query -> outcome), checked in order.
    canned: Vec<(String, Canned)>,
    /// Every request seen, in call order.
    requests: Mutex<Vec<QueryRequest>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// When the query contains `pattern`, respond with `body`.
    pub fn with_response(mut self, pattern: impl Into<String>, body: impl Into<String>) -> Self {
        self.canned
            .push((pattern.into(), Canned::Body(body.into())));
        self
    }

    /// When the query contains `pattern`, fail as if the backend were down.
    pub fn with_unreachable(mut self, pattern: impl Into<String>) -> Self {
        self.canned.push((pattern.into(), Canned::Unreachable));
        self
    }

    /// Returns a copy of the requests received so far.
    pub fn requests(&self) -> Vec<QueryRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn lookup(&self, query: &str) -> Canned {
        self.canned
            .iter()
            .find(|(pattern, _)| query.contains(pattern.as_str()))
            .map(|(_, canned)| canned.clone())
            .unwrap_or_else(|| Canned::Body(DEFAULT_BODY.to_string()))
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn execute(&self, request: &QueryRequest) -> Result<QueryResponse> {
        request.validate()?;

        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        match self.lookup(request.query()) {
            Canned::Body(body) => Ok(QueryResponse::from_body(body)),
            Canned::Unreachable => Err(GqlpadError::transport("Connection refused (mock)")),
        }
    }
}
