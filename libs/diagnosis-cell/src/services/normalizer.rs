use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Canonical comparable form of a symptom phrase: lower-cased, decomposed (NFD)
/// and stripped of combining marks, so "Dor de Cabeça" and "dor de cabeca" compare equal.
pub fn normalize_symptom(input: &str) -> String {
    input
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}
