//! HTTP fetcher.
//!
//! Posts each request as JSON to the configured `/query` URL and interprets
//! the body as JSON-or-text.

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::config::EndpointConfig;
use crate::error::{GqlpadError, Result};
use crate::transport::types::{QueryRequest, QueryResponse};
use crate::transport::Fetcher;

/// Fetcher backed by a real HTTP client.
///
/// Cloning is cheap and clones share the connection pool and cookie jar, which
/// is how a session cookie set by one response rides along on the next request.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    url: Url,
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher for the given endpoint.
    pub fn new(endpoint: &EndpointConfig) -> Result<Self> {
        let url = endpoint.query_url()?;

        let jar = Arc::new(Jar::default());
        if let Some(cookie) = &endpoint.session_cookie {
            jar.add_cookie_str(cookie, &url);
        }

        let mut builder = Client::builder().cookie_provider(jar);
        if let Some(timeout) = endpoint.timeout()? {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| GqlpadError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { url, client })
    }

    /// The URL every request is posted to.
    pub fn url(&self) -> &Url {
        &self.url
    }

    fn transport_error(&self, e: reqwest::Error) -> GqlpadError {
        if e.is_timeout() {
            GqlpadError::transport(format!("Request to {} timed out", self.url))
        } else if e.is_connect() {
            GqlpadError::transport(format!("Failed to connect to {}: {e}", self.url))
        } else {
            GqlpadError::transport(format!("Request to {} failed: {e}", self.url))
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn execute(&self, request: &QueryRequest) -> Result<QueryResponse> {
        request.validate()?;
        let body = request.to_body()?;

        debug!(
            url = %self.url,
            operation = request.operation_name().unwrap_or("<anonymous>"),
            bytes = body.len(),
            "Sending GraphQL request"
        );

        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        // Non-success statuses still carry a body worth showing.
        let status = response.status();
        if !status.is_success() {
            warn!(%status, url = %self.url, "GraphQL endpoint returned a non-success status");
        }

        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        let parsed = QueryResponse::from_body(text);
        if parsed.as_text().is_some() {
            debug!(%status, "Response body is not JSON, returning raw text");
        }

        Ok(parsed)
    }
}
