//! Generates OpenAPI 3.0 documents from OWL ontologies.
//!
//! An ontology graph is loaded into an in-memory store, projected into a
//! small intermediate model, and then synthesised into one schema and one
//! collection path per named class. Output is deterministic for a given
//! input graph.

pub mod error;
pub mod parser;
pub mod schema;
pub mod types;
pub mod vocab;

pub use error::{GenError, Result};
pub use oxigraph::io::RdfFormat;

/// Parses `source` and produces the full OpenAPI document as JSON.
///
/// `language` selects which `rdfs:label` literals name schemas and
/// properties; labels without a matching tag fall back as described on
/// [`types::resolve_label`].
pub fn generate_document(
    source: &str,
    format: RdfFormat,
    language: &str,
) -> Result<serde_json::Value> {
    let ontology = parser::parse_ontology(source, format)?;
    schema::generate_openapi_document(&ontology, language)
}
