//! gqlpad - A lightweight GraphQL query console.
//!
//! This library exposes the core modules for use in integration tests.

pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod introspection;
pub mod logging;
pub mod transport;
