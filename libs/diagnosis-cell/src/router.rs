use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::services::DiagnosisService;

pub fn diagnosis_routes(service: Arc<DiagnosisService>) -> Router {
    // Pure computation over the bundled knowledge base; no authentication layer
    Router::new()
        .route("/calculate", post(handlers::calculate_diagnosis))
        .route("/suggest", post(handlers::suggest_symptoms))
        .route("/symptom-categories", get(handlers::get_symptom_categories))
        .route("/conditions", get(handlers::list_conditions))
        .route("/conditions/{name}", get(handlers::get_condition))
        .with_state(service)
}
