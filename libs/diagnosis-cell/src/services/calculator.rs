use std::collections::HashSet;

use tracing::debug;

use crate::models::{ConditionRecord, DiagnosisSuggestion, Severity};
use crate::services::knowledge_base::KnowledgeBase;
use crate::services::matcher::normalized_match;
use crate::services::normalizer::normalize_symptom;

/// Conditions scoring at or below this value are dropped.
pub const MIN_ADJUSTED_SCORE: f64 = 0.1;
pub const MAX_DIAGNOSES: usize = 3;

/// A caller symptom paired with its normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedInput {
    pub original: String,
    pub normalized: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionScore {
    pub match_count: usize,
    pub match_ratio: f64,
    pub adjusted_score: f64,
    /// Indices into the normalized input list that matched.
    pub matched_inputs: Vec<usize>,
}

/// Normalizes caller symptoms, keeping the first occurrence of each normalized form
/// and dropping entries that are blank once normalized.
pub fn normalize_inputs<S: AsRef<str>>(symptoms: &[S]) -> Vec<NormalizedInput> {
    let mut seen = HashSet::new();

    symptoms
        .iter()
        .filter_map(|symptom| {
            let original = symptom.as_ref();
            let normalized = normalize_symptom(original);
            if normalized.trim().is_empty() || !seen.insert(normalized.clone()) {
                return None;
            }
            Some(NormalizedInput {
                original: original.to_string(),
                normalized,
            })
        })
        .collect()
}

/// Scores one condition against already-normalized inputs.
pub fn score_normalized(
    base_probability: f64,
    severity: Severity,
    normalized_symptoms: &[String],
    inputs: &[NormalizedInput],
) -> ConditionScore {
    let matched_inputs: Vec<usize> = inputs
        .iter()
        .enumerate()
        .filter(|(_, input)| {
            normalized_symptoms
                .iter()
                .any(|known| normalized_match(&input.normalized, known))
        })
        .map(|(index, _)| index)
        .collect();

    let match_count = matched_inputs.len();
    let match_ratio = if normalized_symptoms.is_empty() {
        0.0
    } else {
        match_count as f64 / normalized_symptoms.len() as f64
    };
    let adjusted_score = base_probability * match_ratio * severity.multiplier();

    ConditionScore {
        match_count,
        match_ratio,
        adjusted_score,
        matched_inputs,
    }
}

/// Scores a single record against raw caller symptoms.
pub fn score_condition<S: AsRef<str>>(record: &ConditionRecord, symptoms: &[S]) -> ConditionScore {
    let known: Vec<String> = record
        .known_symptoms
        .iter()
        .map(|phrase| normalize_symptom(phrase))
        .collect();

    score_normalized(
        record.base_probability,
        record.severity,
        &known,
        &normalize_inputs(symptoms),
    )
}

/// Ranked differential diagnosis: at most [`MAX_DIAGNOSES`] conditions scoring above
/// [`MIN_ADJUSTED_SCORE`], highest first. Equal scores keep knowledge-base order.
pub fn calculate_diagnosis<S: AsRef<str>>(
    knowledge_base: &KnowledgeBase,
    symptoms: &[S],
) -> Vec<DiagnosisSuggestion> {
    let inputs = normalize_inputs(symptoms);
    if inputs.is_empty() {
        debug!("No usable symptoms supplied, skipping diagnosis");
        return Vec::new();
    }

    let mut diagnoses: Vec<DiagnosisSuggestion> = knowledge_base
        .indexed_conditions()
        .iter()
        .filter_map(|condition| {
            let score = score_normalized(
                condition.record.base_probability,
                condition.record.severity,
                &condition.normalized_symptoms,
                &inputs,
            );

            if score.adjusted_score <= MIN_ADJUSTED_SCORE {
                return None;
            }

            let matched = score
                .matched_inputs
                .iter()
                .map(|&index| inputs[index].original.clone())
                .collect();

            Some(DiagnosisSuggestion::from_record(
                &condition.record,
                score.adjusted_score,
                matched,
            ))
        })
        .collect();

    // sort_by is stable
    diagnoses.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    diagnoses.truncate(MAX_DIAGNOSES);

    debug!(
        "Computed {} diagnosis candidate(s) from {} symptom(s)",
        diagnoses.len(),
        inputs.len()
    );

    diagnoses
}
