//! Console surface for gqlpad.
//!
//! Plays the part of the editor: builds requests from command-line input,
//! hands them to whatever [`Fetcher`] it is given and prints what comes back.

use futures::future::join_all;
use std::io::{Read, Write};
use tracing::{error, warn};

use crate::cli::{QuerySource, RunArgs};
use crate::error::{GqlpadError, Result};
use crate::introspection::{self, SchemaSummary};
use crate::transport::{Fetcher, QueryRequest, QueryResponse};

/// Reads a query document from its source.
pub fn read_source(source: &QuerySource) -> Result<String> {
    match source {
        QuerySource::Inline(text) => Ok(text.clone()),
        QuerySource::File(path) => std::fs::read_to_string(path).map_err(|e| {
            GqlpadError::invalid_request(format!("Failed to read {}: {e}", path.display()))
        }),
        QuerySource::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| GqlpadError::invalid_request(format!("Failed to read stdin: {e}")))?;
            Ok(text)
        }
    }
}

/// Builds one request per source, sharing variables and operation name.
///
/// Every request is validated here so nothing is sent if any document is blank.
pub fn load_requests(args: &RunArgs) -> Result<Vec<QueryRequest>> {
    args.sources()?
        .iter()
        .map(|source| {
            let mut request = QueryRequest::new(read_source(source)?);
            if let Some(variables) = &args.variables {
                request = request.with_variables_json(variables)?;
            }
            if let Some(name) = &args.operation_name {
                request = request.with_operation_name(name.clone());
            }
            request.validate()?;
            Ok(request)
        })
        .collect()
}

/// Executes all requests concurrently and prints results in issue order.
///
/// Successful results are printed even when other requests fail. The first
/// failure is returned; later ones are logged.
pub async fn run_queries<F, W>(
    fetcher: &F,
    requests: &[QueryRequest],
    pretty: bool,
    out: &mut W,
) -> Result<()>
where
    F: Fetcher + ?Sized,
    W: Write,
{
    let results = join_all(requests.iter().map(|r| fetcher.execute(r))).await;

    let mut first_error = None;
    let mut printed = 0;

    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(response) => {
                if printed > 0 {
                    writeln!(out)?;
                }
                report_graphql_errors(&response);
                writeln!(out, "{}", response.render(pretty))?;
                printed += 1;
            }
            Err(e) if first_error.is_none() => first_error = Some(e),
            Err(e) => error!(index, "Query failed: {e}"),
        }
    }

    out.flush()?;
    first_error.map_or(Ok(()), Err)
}

/// Runs the introspection query and prints a schema summary (or the raw JSON).
pub async fn introspect<F, W>(fetcher: &F, raw: bool, out: &mut W) -> Result<()>
where
    F: Fetcher + ?Sized,
    W: Write,
{
    let response = fetcher.execute(&introspection::request()).await?;
    report_graphql_errors(&response);

    if raw {
        writeln!(out, "{}", response.render(true))?;
        return Ok(());
    }

    match SchemaSummary::from_response(&response) {
        Some(summary) => {
            write!(out, "{summary}")?;
            Ok(())
        }
        None => {
            writeln!(out, "{}", response.render(true))?;
            Err(GqlpadError::schema(
                "Response did not contain an introspection result",
            ))
        }
    }
}

fn report_graphql_errors(response: &QueryResponse) {
    for message in response.error_messages() {
        warn!("GraphQL error: {message}");
    }
}
