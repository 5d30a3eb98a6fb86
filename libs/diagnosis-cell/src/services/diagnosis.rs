use std::sync::Arc;

use tracing::{debug, info};

use shared_config::AppConfig;

use crate::models::{
    ConditionRecord, ConditionSummary, DiagnosisError, DiagnosisSuggestion, SymptomCategory,
};
use crate::services::cache::{DiagnosisCache, MemoryDiagnosisCache};
use crate::services::calculator::{calculate_diagnosis, normalize_inputs};
use crate::services::knowledge_base::{KnowledgeBase, KnowledgeBaseError};
use crate::services::suggestion::suggest_symptoms;

/// Entry point used by the HTTP handlers. Holds the knowledge base and an
/// optional result cache; both are injected by whoever builds the service.
pub struct DiagnosisService {
    knowledge_base: Arc<KnowledgeBase>,
    cache: Option<Arc<dyn DiagnosisCache>>,
}

impl DiagnosisService {
    pub fn new(knowledge_base: Arc<KnowledgeBase>) -> Self {
        Self {
            knowledge_base,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn DiagnosisCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Loads the embedded knowledge base and sizes the cache from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, KnowledgeBaseError> {
        let knowledge_base = Arc::new(KnowledgeBase::embedded()?);
        let service = Self::new(knowledge_base);

        if config.is_cache_enabled() {
            info!(
                "Diagnosis result cache enabled with capacity {}",
                config.diagnosis_cache_capacity
            );
            Ok(service.with_cache(Arc::new(MemoryDiagnosisCache::new(
                config.diagnosis_cache_capacity,
            ))))
        } else {
            Ok(service)
        }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    pub fn calculate_diagnosis(&self, symptoms: &[String]) -> Vec<DiagnosisSuggestion> {
        let Some(cache) = &self.cache else {
            return calculate_diagnosis(&self.knowledge_base, symptoms);
        };

        let key: Vec<String> = normalize_inputs(symptoms)
            .into_iter()
            .map(|input| input.original)
            .collect();

        if let Some(cached) = cache.get(&key) {
            debug!("Diagnosis cache hit for {} symptom(s)", key.len());
            return cached;
        }

        debug!("Diagnosis cache miss for {} symptom(s)", key.len());
        let diagnoses = calculate_diagnosis(&self.knowledge_base, symptoms);
        cache.put(key, diagnoses.clone());
        diagnoses
    }

    pub fn suggest_symptoms(&self, partial_input: &str) -> Vec<String> {
        suggest_symptoms(&self.knowledge_base, partial_input)
    }

    pub fn symptom_categories(&self) -> &[SymptomCategory] {
        self.knowledge_base.symptom_categories()
    }

    pub fn list_conditions(&self) -> Vec<ConditionSummary> {
        self.knowledge_base
            .conditions()
            .map(ConditionSummary::from)
            .collect()
    }

    pub fn get_condition(&self, name: &str) -> Result<&ConditionRecord, DiagnosisError> {
        self.knowledge_base
            .condition(name)
            .ok_or_else(|| DiagnosisError::ConditionNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn symptoms(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cached_result_matches_fresh_computation() {
        let cache = Arc::new(MemoryDiagnosisCache::new(8));
        let kb = Arc::new(KnowledgeBase::embedded().unwrap());
        let cached_service = DiagnosisService::new(kb.clone()).with_cache(cache.clone());
        let plain_service = DiagnosisService::new(kb);

        let input = symptoms(&["espirros", "coriza"]);
        let first = cached_service.calculate_diagnosis(&input);
        assert_eq!(cache.len(), 1);

        let second = cached_service.calculate_diagnosis(&input);
        assert_eq!(first, second);
        assert_eq!(first, plain_service.calculate_diagnosis(&input));
    }

    #[test]
    fn test_blank_entries_share_cache_key() {
        let cache = Arc::new(MemoryDiagnosisCache::new(8));
        let service = DiagnosisService::new(Arc::new(KnowledgeBase::embedded().unwrap()))
            .with_cache(cache.clone());

        service.calculate_diagnosis(&symptoms(&["febre"]));
        service.calculate_diagnosis(&symptoms(&["febre", "  "]));

        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_from_config_respects_cache_capacity() {
        let config = AppConfig {
            diagnosis_cache_capacity: 0,
            ..AppConfig::default()
        };

        let service = DiagnosisService::from_config(&config).unwrap();
        assert!(service.cache.is_none());
        assert_eq!(service.list_conditions().len(), 15);
    }

    #[test]
    fn test_get_condition() {
        let service = DiagnosisService::new(Arc::new(KnowledgeBase::embedded().unwrap()));

        assert_eq!(service.get_condition("asma").unwrap().name, "Asma");
        assert_matches!(
            service.get_condition("Varíola"),
            Err(DiagnosisError::ConditionNotFound(name)) if name == "Varíola"
        );
    }
}
