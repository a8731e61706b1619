//! `findBestVersion` (§6): picks the best-matching semver version for a
//! library given an optional target selector, falling back to the
//! unversioned variant when no semver entries satisfy it.

use semver::{Version as SemVersion, VersionReq};

use crate::error::{Error, Result};
use crate::value_objects::VersionRow;

/// Outcome of [`find_best_version`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestVersionMatch {
    /// The best matching semver version, or `None` if only the
    /// unversioned variant satisfies the request.
    pub best_match: Option<String>,
    /// Whether an unversioned variant exists for this library.
    pub has_unversioned: bool,
}

/// Parse `target` into the [`VersionReq`] used to filter candidates,
/// following the selection rules in §6.
fn build_requirement(target: &str) -> Option<VersionReq> {
    if target.eq_ignore_ascii_case("latest") {
        return VersionReq::parse("*").ok();
    }
    if let Ok(exact) = SemVersion::parse(target) {
        // Prefer the exact version, otherwise fall back to any older one.
        return VersionReq::parse(&format!("={exact} || <={exact}")).ok();
    }
    if is_plain_numeric_prefix(target) {
        return VersionReq::parse(&format!("~{target}")).ok();
    }
    VersionReq::parse(target).ok()
}

/// Whether `target` looks like a bare numeric prefix (`"1"`, `"1.2"`)
/// rather than a full semver triple or range expression.
fn is_plain_numeric_prefix(target: &str) -> bool {
    !target.is_empty()
        && target
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
        && target.matches('.').count() < 2
}

/// Select the best-matching version among `versions` (raw, as-stored
/// version names; the unversioned entry, if any, is expected as `""` and
/// is excluded from semver comparison but tracked via `has_unversioned`).
///
/// # Errors
///
/// Returns [`Error::VersionNotFound`] when no semver candidate satisfies
/// `target` and no unversioned variant exists.
pub fn find_best_version(
    library: &str,
    target: Option<&str>,
    versions: &[VersionRow],
) -> Result<BestVersionMatch> {
    let has_unversioned = versions.iter().any(|v| v.version.is_empty());
    let mut semver_versions: Vec<(SemVersion, &str)> = versions
        .iter()
        .filter(|v| !v.version.is_empty())
        .filter_map(|v| SemVersion::parse(&v.version).ok().map(|sv| (sv, v.version.as_str())))
        .collect();
    semver_versions.sort_by(|a, b| a.0.cmp(&b.0));

    let requirement = match target.filter(|t| !t.is_empty()) {
        None => VersionReq::parse("*").ok(),
        Some(t) => build_requirement(t),
    };

    let best = requirement.and_then(|req| {
        semver_versions
            .iter()
            .rev()
            .find(|(sv, _)| req.matches(sv))
            .map(|(_, raw)| (*raw).to_owned())
    });

    if best.is_none() && !has_unversioned {
        let available = detail_listing(versions);
        return Err(Error::version_not_found(library, available));
    }

    Ok(BestVersionMatch {
        best_match: best,
        has_unversioned,
    })
}

/// Render the detailed version listing (version, document count, unique
/// URL count, indexed-at) attached to `VersionNotFound` errors.
fn detail_listing(versions: &[VersionRow]) -> String {
    if versions.is_empty() {
        return "no versions are indexed for this library".to_owned();
    }
    versions
        .iter()
        .map(|v| {
            let name = if v.version.is_empty() {
                "unversioned"
            } else {
                v.version.as_str()
            };
            format!(
                "{name} ({} docs, {} urls)",
                v.document_count, v.unique_url_count
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}
