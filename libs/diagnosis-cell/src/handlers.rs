use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::error::AppError;

use crate::models::{CalculateDiagnosisRequest, DiagnosisError, SuggestSymptomsRequest};
use crate::services::DiagnosisService;

pub const MAX_SYMPTOMS_PER_REQUEST: usize = 30;
pub const MAX_SYMPTOM_LENGTH: usize = 200;

impl From<DiagnosisError> for AppError {
    fn from(error: DiagnosisError) -> Self {
        match error {
            DiagnosisError::ConditionNotFound(name) => {
                AppError::NotFound(format!("Condition not found: {}", name))
            }
            DiagnosisError::ValidationError(msg) => AppError::ValidationError(msg),
        }
    }
}

fn validate_symptom_text(value: &str, field: &str) -> Result<(), DiagnosisError> {
    if value.chars().count() > MAX_SYMPTOM_LENGTH {
        return Err(DiagnosisError::ValidationError(format!(
            "{} exceeds {} characters",
            field, MAX_SYMPTOM_LENGTH
        )));
    }
    Ok(())
}

fn validate_calculate_request(request: &CalculateDiagnosisRequest) -> Result<(), DiagnosisError> {
    if request.symptoms.len() > MAX_SYMPTOMS_PER_REQUEST {
        return Err(DiagnosisError::ValidationError(format!(
            "At most {} symptoms can be submitted at once",
            MAX_SYMPTOMS_PER_REQUEST
        )));
    }

    request
        .symptoms
        .iter()
        .try_for_each(|symptom| validate_symptom_text(symptom, "symptom"))
}

// ==============================================================================
// PUBLIC HANDLERS (NO AUTHENTICATION REQUIRED)
// ==============================================================================

#[axum::debug_handler]
pub async fn calculate_diagnosis(
    State(service): State<Arc<DiagnosisService>>,
    Json(request): Json<CalculateDiagnosisRequest>,
) -> Result<Json<Value>, AppError> {
    validate_calculate_request(&request)?;

    let diagnoses = service.calculate_diagnosis(&request.symptoms);
    debug!("Returning {} diagnosis candidate(s)", diagnoses.len());

    Ok(Json(json!({
        "diagnoses": diagnoses,
        "total": diagnoses.len()
    })))
}

#[axum::debug_handler]
pub async fn suggest_symptoms(
    State(service): State<Arc<DiagnosisService>>,
    Json(request): Json<SuggestSymptomsRequest>,
) -> Result<Json<Value>, AppError> {
    validate_symptom_text(&request.partial_symptom, "partialSymptom")?;

    let suggestions = service.suggest_symptoms(&request.partial_symptom);

    Ok(Json(json!({
        "suggestions": suggestions
    })))
}

#[axum::debug_handler]
pub async fn get_symptom_categories(
    State(service): State<Arc<DiagnosisService>>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(json!({
        "categories": service.symptom_categories()
    })))
}

#[axum::debug_handler]
pub async fn list_conditions(
    State(service): State<Arc<DiagnosisService>>,
) -> Result<Json<Value>, AppError> {
    let conditions = service.list_conditions();

    Ok(Json(json!({
        "conditions": conditions,
        "total": conditions.len()
    })))
}

#[axum::debug_handler]
pub async fn get_condition(
    State(service): State<Arc<DiagnosisService>>,
    Path(name): Path<String>,
) -> Result<Json<Value>, AppError> {
    let condition = service.get_condition(&name)?;

    Ok(Json(json!(condition)))
}
