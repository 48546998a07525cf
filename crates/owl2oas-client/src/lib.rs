//! Client bindings for the collection endpoints a generated API exposes.
//!
//! The models mirror the JSON-LD payloads the evaluation server serves:
//! every resource carries `@id`, `@type` and optionally an inline
//! `@context`.

pub mod client;
pub mod error;
pub mod models;

pub use client::ApiClient;
pub use error::ClientError;
