//! `validateLibraryExists` suggestion surfacing (§7).

use mcb_domain::services::suggest_libraries;

#[test]
fn suggestions_are_empty_when_nothing_known() {
    assert!(suggest_libraries("react", &[]).is_empty());
}

#[test]
fn identical_name_is_its_own_top_suggestion() {
    let known = vec!["react".to_owned(), "vue".to_owned(), "svelte".to_owned()];
    let suggestions = suggest_libraries("react", &known);
    assert_eq!(suggestions.first().map(String::as_str), Some("react"));
}
