//! Command-line argument parsing for gqlpad.
//!
//! Uses clap derive. Global flags pick the endpoint; subcommands pick what to send.

use crate::config::EndpointConfig;
use crate::error::{GqlpadError, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// A lightweight GraphQL query console.
#[derive(Parser, Debug)]
#[command(name = "gqlpad")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Backend origin (e.g., http://localhost:3001); queries go to <origin>/query
    #[arg(short = 'e', long, value_name = "URL", env = "GQLPAD_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Config file path
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Session cookie to send with every request (name=value)
    #[arg(long, value_name = "COOKIE", global = true)]
    pub cookie: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute one or more GraphQL documents
    Run(RunArgs),
    /// Fetch the schema via introspection and summarize it
    Introspect(IntrospectArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// GraphQL document to execute
    #[arg(value_name = "QUERY", required_unless_present = "files", conflicts_with = "files")]
    pub query: Option<String>,

    /// Read a document from a file ("-" for stdin); repeat to run several concurrently
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub files: Vec<String>,

    /// Variables as a JSON object
    #[arg(long, value_name = "JSON")]
    pub variables: Option<String>,

    /// Operation to run when the document defines several
    #[arg(short = 'o', long, value_name = "NAME")]
    pub operation_name: Option<String>,

    /// Print JSON results on a single line
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args, Debug)]
pub struct IntrospectArgs {
    /// Print the full introspection JSON instead of a summary
    #[arg(long)]
    pub raw: bool,
}

/// Where a query document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySource {
    Inline(String),
    File(PathBuf),
    Stdin,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }

    /// Applies command-line overrides on top of the file configuration.
    pub fn apply_to(&self, endpoint: &mut EndpointConfig) {
        endpoint.apply_origin_override(self.endpoint.as_deref());
        if let Some(cookie) = &self.cookie {
            endpoint.session_cookie = Some(cookie.clone());
        }
    }
}

impl RunArgs {
    /// Returns the documents to execute, in argument order.
    ///
    /// Stdin can only be read once, so `-` may appear at most once.
    pub fn sources(&self) -> Result<Vec<QuerySource>> {
        if let Some(query) = &self.query {
            return Ok(vec![QuerySource::Inline(query.clone())]);
        }

        if self.files.iter().filter(|f| f.as_str() == "-").count() > 1 {
            return Err(GqlpadError::invalid_request(
                "Stdin (\"-\") can only be given once with --file",
            ));
        }

        Ok(self
            .files
            .iter()
            .map(|f| match f.as_str() {
                "-" => QuerySource::Stdin,
                path => QuerySource::File(PathBuf::from(path)),
            })
            .collect())
    }
}
