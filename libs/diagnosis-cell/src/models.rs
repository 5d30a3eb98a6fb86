use serde::{Deserialize, Serialize};

// Authored labels are Portuguese; English labels are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "baixa", alias = "low")]
    Low,
    #[serde(rename = "media", alias = "média", alias = "moderada", alias = "medium")]
    Medium,
    #[serde(rename = "alta", alias = "high")]
    High,
}

impl Severity {
    /// Ranking bias applied on top of a condition's base probability.
    pub fn multiplier(self) -> f64 {
        match self {
            Severity::High => 1.2,
            Severity::Medium => 1.0,
            Severity::Low => 0.8,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "baixa",
            Severity::Medium => "media",
            Severity::High => "alta",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of the static knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionRecord {
    pub name: String,
    pub known_symptoms: Vec<String>,
    pub base_probability: f64,
    pub severity: Severity,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub preventive_measures: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomCategory {
    pub name: String,
    pub symptoms: Vec<String>,
}

/// A ranked candidate condition. `probability` is a relative ranking score,
/// not a calibrated probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisSuggestion {
    pub condition: String,
    pub probability: f64,
    pub severity: Severity,
    pub specialties: Vec<String>,
    pub medications: Vec<String>,
    pub risk_factors: Vec<String>,
    pub preventive_measures: Vec<String>,
    pub classification_code: Option<String>,
    pub description: Option<String>,
    pub matched_symptoms: Vec<String>,
}

impl DiagnosisSuggestion {
    pub fn from_record(record: &ConditionRecord, score: f64, matched_symptoms: Vec<String>) -> Self {
        Self {
            condition: record.name.clone(),
            probability: score,
            severity: record.severity,
            specialties: record.specialties.clone(),
            medications: record.medications.clone(),
            risk_factors: record.risk_factors.clone(),
            preventive_measures: record.preventive_measures.clone(),
            classification_code: record.classification_code.clone(),
            description: record.description.clone(),
            matched_symptoms,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionSummary {
    pub name: String,
    pub severity: Severity,
    pub classification_code: Option<String>,
    pub specialties: Vec<String>,
}

impl From<&ConditionRecord> for ConditionSummary {
    fn from(record: &ConditionRecord) -> Self {
        Self {
            name: record.name.clone(),
            severity: record.severity,
            classification_code: record.classification_code.clone(),
            specialties: record.specialties.clone(),
        }
    }
}

// Request DTOs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculateDiagnosisRequest {
    #[serde(default)]
    pub symptoms: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestSymptomsRequest {
    #[serde(default)]
    pub partial_symptom: String,
}

// Error types specific to diagnosis operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DiagnosisError {
    ConditionNotFound(String),
    ValidationError(String),
}

impl std::fmt::Display for DiagnosisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosisError::ConditionNotFound(name) => write!(f, "Condition not found: {}", name),
            DiagnosisError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for DiagnosisError {}
