//! Serves a canned JSON-LD document for evaluating generated API clients
//! against a live endpoint.

pub mod routes;
pub mod server;

pub use server::{serve, ServerConfig};
