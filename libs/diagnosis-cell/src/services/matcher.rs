use crate::services::normalizer::normalize_symptom;

/// Two-way substring containment between a caller token and a known phrase.
///
/// Symmetric but not transitive: "dor" matches "dor de cabeça" and "dor no peito",
/// which do not match each other.
pub fn symptoms_match(input_token: &str, known_phrase: &str) -> bool {
    normalized_match(&normalize_symptom(input_token), &normalize_symptom(known_phrase))
}

/// Same as [`symptoms_match`] for arguments already passed through the normalizer.
pub fn normalized_match(input_token: &str, known_phrase: &str) -> bool {
    known_phrase.contains(input_token) || input_token.contains(known_phrase)
}
