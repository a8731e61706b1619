//! `findBestVersion` scenarios (§6, S5).

use mcb_domain::error::Error;
use mcb_domain::services::find_best_version;
use mcb_domain::value_objects::{VersionId, VersionRow, VersionStatus};
use rstest::rstest;

fn row(version: &str) -> VersionRow {
    VersionRow {
        version: version.to_owned(),
        version_id: VersionId::from_name(version),
        status: VersionStatus::Completed,
        progress_pages: 0,
        progress_max_pages: 0,
        error_message: None,
        source_url: None,
        document_count: 1,
        unique_url_count: 1,
        indexed_at: None,
    }
}

fn semver_and_unversioned() -> Vec<VersionRow> {
    vec![row("1.0.0"), row("1.1.0"), row("2.0.0"), row("")]
}

/// `findBestVersion` against a fixed `1.0.0`/`1.1.0`/`2.0.0`/unversioned
/// catalog, parametrized over the requested selector.
#[rstest]
#[case::exact_match_prefers_exact_over_older("1.0.0", Some("1.0.0"))]
#[case::missing_exact_falls_back_to_latest_older("3.0.0", Some("2.0.0"))]
#[case::plain_numeric_prefix_is_treated_as_tilde_range("1.x", Some("1.1.0"))]
#[case::latest_selector_picks_highest_semver("latest", Some("2.0.0"))]
fn best_version_selection_matches_expected(#[case] requested: &str, #[case] expected: Option<&str>) {
    let result = find_best_version("lib", Some(requested), &semver_and_unversioned()).unwrap();
    assert_eq!(result.best_match.as_deref(), expected);
    assert!(result.has_unversioned);
}

#[test]
fn no_semver_versions_falls_back_to_unversioned() {
    let versions = vec![row("")];
    let result = find_best_version("lib", Some("1.0.0"), &versions).unwrap();
    assert_eq!(result.best_match, None);
    assert!(result.has_unversioned);
}

#[test]
fn no_versions_at_all_is_version_not_found() {
    let err = find_best_version("lib", Some("1.0.0"), &[]).unwrap_err();
    assert!(matches!(err, Error::VersionNotFound { .. }));
}
