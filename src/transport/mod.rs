//! Query transport for gqlpad.
//!
//! A fetcher takes one GraphQL request and produces one response. The calling
//! surface only sees the [`Fetcher`] trait and never deals with HTTP directly.

pub mod http;
pub mod mock;
pub mod types;

pub use http::HttpFetcher;
pub use mock::MockFetcher;
pub use types::{QueryRequest, QueryResponse};

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;

/// Executes GraphQL requests against a backend.
///
/// Implementations must be stateless with respect to individual calls so that
/// several requests can be in flight at once.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Executes a single request.
    ///
    /// A body that is not JSON is returned as [`QueryResponse::Text`], not as an
    /// error. Only failures to send or receive are errors.
    async fn execute(&self, request: &QueryRequest) -> Result<QueryResponse>;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Arc<F> {
    async fn execute(&self, request: &QueryRequest) -> Result<QueryResponse> {
        (**self).execute(request).await
    }
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Box<F> {
    async fn execute(&self, request: &QueryRequest) -> Result<QueryResponse> {
        (**self).execute(request).await
    }
}
