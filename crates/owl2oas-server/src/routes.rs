//! HTTP route handlers.

use axum::{
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};

/// Sample document baked into the binary so the server needs no data
/// directory at runtime.
const SAMPLE_DOCUMENT: &str = include_str!("../data/device-sample.jsonld");

async fn evaluation_sample() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], SAMPLE_DOCUMENT)
}

pub fn routes() -> Router {
    Router::new().route("/api/eval", get(evaluation_sample))
}
