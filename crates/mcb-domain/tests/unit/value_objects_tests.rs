//! Value-object invariants: embedding padding, section hierarchy, RRF
//! scoring, scraper-option round-tripping (P3), cancellation tokens.

use mcb_domain::value_objects::{rrf_score, CancellationToken, Embedding, ScraperOptions, Section};

#[test]
fn embedding_zero_pads_to_store_width() {
    let embedding = Embedding::padded(vec![1.0, 2.0, 3.0], "test-model", 5).unwrap();
    assert_eq!(embedding.vector, vec![1.0, 2.0, 3.0, 0.0, 0.0]);
    assert_eq!(embedding.native_dimensions, 3);
    assert_eq!(embedding.native_slice(), [1.0, 2.0, 3.0]);
}

#[test]
fn embedding_rejects_native_dimension_wider_than_store() {
    let err = Embedding::padded(vec![0.0; 10], "test-model", 5).unwrap_err();
    assert!(matches!(err, mcb_domain::error::Error::Dimension { model: 10, store: 5 }));
}

#[test]
fn section_direct_child_requires_one_extra_path_segment() {
    let parent = Section {
        path: vec!["Guide".to_owned()],
        level: 1,
    };
    let child = Section {
        path: vec!["Guide".to_owned(), "Installation".to_owned()],
        level: 2,
    };
    let unrelated = Section {
        path: vec!["Other".to_owned(), "Installation".to_owned()],
        level: 2,
    };

    assert!(child.is_direct_child_of(&parent));
    assert!(!unrelated.is_direct_child_of(&parent));
    assert!(!parent.is_direct_child_of(&child));
}

#[test]
fn section_parent_pops_last_path_segment() {
    let section = Section {
        path: vec!["Guide".to_owned(), "Installation".to_owned()],
        level: 2,
    };
    let parent = section.parent().unwrap();
    assert_eq!(parent.path, ["Guide"]);
    assert_eq!(parent.level, 1);
    assert!(Section::root().parent().is_none());
}

#[test]
fn rrf_score_sums_over_matching_engines() {
    let both = rrf_score(Some(1), Some(1));
    let vec_only = rrf_score(Some(1), None);
    let fts_only = rrf_score(None, Some(1));

    assert!(both > vec_only);
    assert!(both > fts_only);
    assert!((vec_only - 1.0 / 61.0).abs() < 1e-9);
    assert_eq!(rrf_score(None, None), 0.0);
}

#[test]
fn scraper_options_persistable_strips_runtime_only_fields() {
    let options = ScraperOptions::new("https://example.com", "react", "18.2.0");
    let persisted = options.persistable();

    assert_eq!(persisted.max_pages, options.max_pages);
    assert_eq!(persisted.scope, options.scope);
    // persisted has no url/library/version fields at all; this is enforced
    // at the type level (PersistedScraperOptions has no such fields).
    let _ = persisted;
}

#[test]
fn cancellation_token_observed_across_clones() {
    let token = CancellationToken::new();
    let clone = token.clone();
    assert!(!clone.is_cancelled());
    token.cancel();
    assert!(clone.is_cancelled());
}
