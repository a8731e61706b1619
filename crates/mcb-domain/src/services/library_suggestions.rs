//! Fuzzy library-name suggestions for `validateLibraryExists` (§6, §7).

use strsim::jaro_winkler;

use crate::constants::{LIBRARY_SUGGESTION_COUNT, LIBRARY_SUGGESTION_THRESHOLD};

/// Return up to [`LIBRARY_SUGGESTION_COUNT`] names from `known` whose
/// Jaro-Winkler similarity to `name` is at least
/// [`LIBRARY_SUGGESTION_THRESHOLD`], most similar first.
pub fn suggest_libraries(name: &str, known: &[String]) -> Vec<String> {
    let mut scored: Vec<(f64, &str)> = known
        .iter()
        .map(|candidate| (jaro_winkler(name, candidate), candidate.as_str()))
        .filter(|(score, _)| *score >= LIBRARY_SUGGESTION_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(LIBRARY_SUGGESTION_COUNT)
        .map(|(_, name)| name.to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_closest_match_first() {
        let known = vec!["react".to_owned(), "redux".to_owned(), "vue".to_owned()];
        let suggestions = suggest_libraries("reactt", &known);
        assert_eq!(suggestions.first().map(String::as_str), Some("react"));
    }

    #[test]
    fn excludes_dissimilar_names() {
        let known = vec!["react".to_owned(), "zzz".to_owned()];
        let suggestions = suggest_libraries("react", &known);
        assert!(!suggestions.contains(&"zzz".to_owned()));
    }

    #[test]
    fn caps_at_suggestion_count() {
        let known = vec![
            "reacta".to_owned(),
            "reactb".to_owned(),
            "reactc".to_owned(),
            "reactd".to_owned(),
        ];
        let suggestions = suggest_libraries("react", &known);
        assert_eq!(suggestions.len(), LIBRARY_SUGGESTION_COUNT);
    }
}
