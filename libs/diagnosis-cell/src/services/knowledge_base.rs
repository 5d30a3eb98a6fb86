use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{ConditionRecord, SymptomCategory};
use crate::services::normalizer::normalize_symptom;

const EMBEDDED_KNOWLEDGE_BASE: &str = include_str!("../../data/conditions.json");

#[derive(Error, Debug)]
pub enum KnowledgeBaseError {
    #[error("Failed to parse knowledge base asset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Knowledge base contains no valid condition records")]
    Empty,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KnowledgeBaseAsset {
    conditions: Vec<ConditionRecord>,
    #[serde(default)]
    symptom_categories: Vec<SymptomCategory>,
}

/// A condition record with its symptom phrases pre-normalized for matching.
#[derive(Debug, Clone)]
pub(crate) struct IndexedCondition {
    pub record: ConditionRecord,
    pub normalized_name: String,
    pub normalized_symptoms: Vec<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct KnownSymptom {
    pub phrase: String,
    pub normalized: String,
}

/// Read-only table of condition records, loaded once and shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    conditions: Vec<IndexedCondition>,
    categories: Vec<SymptomCategory>,
    known_symptoms: Vec<KnownSymptom>,
}

impl KnowledgeBase {
    /// Loads the asset compiled into the binary.
    pub fn embedded() -> Result<Self, KnowledgeBaseError> {
        Self::from_json(EMBEDDED_KNOWLEDGE_BASE)
    }

    pub fn from_json(raw: &str) -> Result<Self, KnowledgeBaseError> {
        let asset: KnowledgeBaseAsset = serde_json::from_str(raw)?;
        Self::from_records(asset.conditions, asset.symptom_categories)
    }

    /// Builds the table, skipping (with a warning) records that cannot be scored.
    pub fn from_records(
        records: Vec<ConditionRecord>,
        categories: Vec<SymptomCategory>,
    ) -> Result<Self, KnowledgeBaseError> {
        let total = records.len();
        let mut seen_names = HashSet::new();
        let mut conditions = Vec::with_capacity(total);

        for record in records {
            match index_record(record, &seen_names) {
                Ok(indexed) => {
                    seen_names.insert(indexed.normalized_name.clone());
                    conditions.push(indexed);
                }
                Err((name, reason)) => {
                    warn!("Rejecting condition record '{}': {}", name, reason);
                }
            }
        }

        if conditions.is_empty() {
            return Err(KnowledgeBaseError::Empty);
        }

        let known_symptoms = distinct_symptoms(&conditions);

        info!(
            "Loaded knowledge base: {} of {} conditions, {} distinct symptoms, {} categories",
            conditions.len(),
            total,
            known_symptoms.len(),
            categories.len()
        );

        Ok(Self {
            conditions,
            categories,
            known_symptoms,
        })
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Condition records in authored order.
    pub fn conditions(&self) -> impl Iterator<Item = &ConditionRecord> {
        self.conditions.iter().map(|condition| &condition.record)
    }

    /// Looks a condition up by name, ignoring case and accents.
    pub fn condition(&self, name: &str) -> Option<&ConditionRecord> {
        let wanted = normalize_symptom(name.trim());
        self.conditions
            .iter()
            .find(|condition| condition.normalized_name == wanted)
            .map(|condition| &condition.record)
    }

    pub fn symptom_categories(&self) -> &[SymptomCategory] {
        &self.categories
    }

    /// Distinct known symptom phrases, in order of first appearance.
    pub fn known_symptoms(&self) -> impl Iterator<Item = &str> {
        self.known_symptoms.iter().map(|symptom| symptom.phrase.as_str())
    }

    pub(crate) fn indexed_conditions(&self) -> &[IndexedCondition] {
        &self.conditions
    }

    pub(crate) fn indexed_symptoms(&self) -> &[KnownSymptom] {
        &self.known_symptoms
    }
}

fn distinct_symptoms(conditions: &[IndexedCondition]) -> Vec<KnownSymptom> {
    let mut seen_phrases = HashSet::new();

    conditions
        .iter()
        .flat_map(|condition| {
            condition
                .record
                .known_symptoms
                .iter()
                .zip(condition.normalized_symptoms.iter())
        })
        .filter(|&(phrase, _)| seen_phrases.insert(phrase.as_str()))
        .map(|(phrase, normalized)| KnownSymptom {
            phrase: phrase.clone(),
            normalized: normalized.clone(),
        })
        .collect()
}

fn index_record(
    mut record: ConditionRecord,
    seen_names: &HashSet<String>,
) -> Result<IndexedCondition, (String, String)> {
    let normalized_name = normalize_symptom(record.name.trim());
    if normalized_name.is_empty() {
        return Err((record.name, "empty condition name".to_string()));
    }
    if seen_names.contains(&normalized_name) {
        return Err((record.name, "duplicate condition name".to_string()));
    }

    let probability = record.base_probability;
    if !(probability > 0.0 && probability <= 1.0) {
        return Err((
            record.name,
            format!("base probability {} outside (0, 1]", probability),
        ));
    }

    // A blank phrase would contain-match every input.
    let before = record.known_symptoms.len();
    record
        .known_symptoms
        .retain(|phrase| !normalize_symptom(phrase).trim().is_empty());
    if record.known_symptoms.len() != before {
        debug!(
            "Dropped {} blank symptom phrase(s) from '{}'",
            before - record.known_symptoms.len(),
            record.name
        );
    }

    if record.known_symptoms.is_empty() {
        return Err((record.name, "no known symptoms".to_string()));
    }

    let normalized_symptoms = record
        .known_symptoms
        .iter()
        .map(|phrase| normalize_symptom(phrase))
        .collect();

    Ok(IndexedCondition {
        record,
        normalized_name,
        normalized_symptoms,
    })
}
