use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use diagnosis_cell::router::diagnosis_routes;
use diagnosis_cell::services::DiagnosisService;

pub fn create_router(service: Arc<DiagnosisService>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic Diagnosis API is running!" }))
        .nest("/diagnosis", diagnosis_routes(service))
}
