use tracing::debug;

use crate::services::knowledge_base::KnowledgeBase;
use crate::services::normalizer::normalize_symptom;

pub const MAX_SUGGESTIONS: usize = 5;

/// Autocompletion over the distinct known symptom phrases.
///
/// No minimum input length: an empty input matches every phrase, so callers get
/// the first phrases of the knowledge base.
pub fn suggest_symptoms(knowledge_base: &KnowledgeBase, partial_input: &str) -> Vec<String> {
    let wanted = normalize_symptom(partial_input);

    let suggestions: Vec<String> = knowledge_base
        .indexed_symptoms()
        .iter()
        .filter(|symptom| symptom.normalized.contains(&wanted))
        .take(MAX_SUGGESTIONS)
        .map(|symptom| symptom.phrase.clone())
        .collect();

    debug!("{} suggestion(s) for '{}'", suggestions.len(), partial_input);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knowledge_base() -> KnowledgeBase {
        KnowledgeBase::embedded().unwrap()
    }

    #[test]
    fn test_dor_is_truncated_to_first_five_in_table_order() {
        let kb = knowledge_base();

        let all_dor: Vec<&str> = kb
            .known_symptoms()
            .filter(|s| normalize_symptom(s).contains("dor"))
            .collect();
        assert_eq!(all_dor.len(), 8);

        let suggestions = suggest_symptoms(&kb, "dor");
        assert_eq!(
            suggestions,
            vec!["dor de cabeça", "dor abdominal", "dor nas costas", "dor no peito", "dor muscular"]
        );
    }

    #[test]
    fn test_accent_and_case_insensitive_input() {
        let kb = knowledge_base();

        assert_eq!(suggest_symptoms(&kb, "NAUSEA"), vec!["náusea"]);
        assert_eq!(suggest_symptoms(&kb, "congestão"), vec!["congestão nasal"]);
    }

    #[test]
    fn test_empty_input_returns_first_known_phrases() {
        let kb = knowledge_base();

        let expected: Vec<String> = kb.known_symptoms().take(MAX_SUGGESTIONS).map(String::from).collect();
        assert_eq!(suggest_symptoms(&kb, ""), expected);
    }

    #[test]
    fn test_no_match() {
        assert!(suggest_symptoms(&knowledge_base(), "xyz").is_empty());
    }

    #[test]
    fn test_suggestions_are_distinct() {
        let suggestions = suggest_symptoms(&knowledge_base(), "tosse");
        assert_eq!(suggestions, vec!["tosse"]);
    }
}
