pub mod handlers;
pub mod router;
pub mod models;
pub mod services;

// Re-export models and the engine entry points for external use
pub use models::*;
pub use services::*;

pub use router::diagnosis_routes;
pub use services::calculator::{calculate_diagnosis, MAX_DIAGNOSES, MIN_ADJUSTED_SCORE};
pub use services::matcher::symptoms_match;
pub use services::normalizer::normalize_symptom;
pub use services::suggestion::{suggest_symptoms, MAX_SUGGESTIONS};
