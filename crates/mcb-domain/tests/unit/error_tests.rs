//! Error taxonomy constructors and classification (§7).

use mcb_domain::error::Error;

#[test]
fn cancelled_is_classified_as_cancellation() {
    let err = Error::cancelled("job cancelled during scraping progress");
    assert!(err.is_cancellation());
}

#[test]
fn other_variants_are_not_cancellation() {
    assert!(!Error::validation("missing url").is_cancellation());
    assert!(!Error::store("invariant violated").is_cancellation());
}

#[test]
fn library_not_found_carries_suggestions() {
    let err = Error::library_not_found("reactt", vec!["react".to_owned()]);
    match err {
        Error::LibraryNotFound { name, suggestions } => {
            assert_eq!(name, "reactt");
            assert_eq!(suggestions, vec!["react".to_owned()]);
        }
        other => panic!("expected LibraryNotFound, got {other:?}"),
    }
}

#[test]
fn dimension_error_reports_both_widths() {
    let err = Error::dimension(3072, 1536);
    assert_eq!(err.to_string(), "embedding dimension 3072 exceeds store width 1536");
}

#[test]
fn connection_with_source_preserves_source() {
    let io_err = std::io::Error::other("disk full");
    let err = Error::connection_with_source("failed to open store", io_err);
    assert!(std::error::Error::source(&err).is_some());
}
