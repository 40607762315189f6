//! Catalog filtering: inclusion pattern, boilerplate exclusions, ordering.
//!
//! Documentation generators emit a handful of entries that are noise in a
//! topic catalog: package-level landing pages, re-exported names, pipe
//! operator shims, internal helpers. This stage strips them, enforces the
//! completeness invariant, and produces the final sorted, deduplicated
//! catalog. Pure and side-effect-free; testable without any network access.

use crate::{Catalog, CatalogRow};
use regex::Regex;

/// Aliases containing this marker are re-exports from another package.
const REEXPORT_MARKER: &str = "reexport";
/// Package-level landing page alias suffix, e.g. `alpha-package`.
const PACKAGE_ALIAS_SUFFIX: &str = "-package";
/// Sentinel alias generators attach to the package-level entry.
const PACKAGE_SENTINEL: &str = "_PACKAGE";
/// The pipe operator re-exported by many packages.
const PIPE_OPERATOR: &str = "%>%";
/// Titles of internal helper pages start with this prefix.
const INTERNAL_TITLE_PREFIX: &str = "Internal";
/// Titles of quasiquotation helper pages start with this prefix.
const TIDY_EVAL_TITLE_PREFIX: &str = "Tidy eval";
/// Title of the pipe operator's own page.
const PIPE_TITLE: &str = "Pipe";
/// Title of the re-export listing page.
const REEXPORT_TITLE: &str = "Objects exported from other packages";

/// Applies the inclusion pattern and the exclusion predicates, then sorts
/// ascending by (alias, package) and deduplicates by (alias, package, url).
///
/// The inclusion pattern runs first: when present, only rows whose alias
/// matches are considered at all. Rows missing any required field are
/// dropped entirely; no partial rows survive.
pub fn filter_catalog(rows: Vec<CatalogRow>, include: Option<&Regex>) -> Catalog {
    let mut kept: Vec<CatalogRow> = rows
        .into_iter()
        .filter(|row| include.is_none_or(|pattern| pattern.is_match(&row.alias)))
        .filter(|row| !is_boilerplate(row))
        .filter(is_complete)
        .collect();

    // Full-key sort keeps equal (alias, package, url) rows adjacent for
    // dedup while satisfying the (alias, package) ordering invariant.
    kept.sort_by(|a, b| {
        (&a.alias, &a.package, &a.url, &a.title).cmp(&(&b.alias, &b.package, &b.url, &b.title))
    });
    kept.dedup_by(|a, b| a.alias == b.alias && a.package == b.package && a.url == b.url);
    kept
}

fn is_boilerplate(row: &CatalogRow) -> bool {
    row.alias.contains(REEXPORT_MARKER)
        || row.alias.ends_with(PACKAGE_ALIAS_SUFFIX)
        || row.alias == PACKAGE_SENTINEL
        || row.alias == PIPE_OPERATOR
        || row.title.starts_with(INTERNAL_TITLE_PREFIX)
        || row.title.starts_with(TIDY_EVAL_TITLE_PREFIX)
        || row.title == PIPE_TITLE
        || row.title == REEXPORT_TITLE
}

fn is_complete(row: &CatalogRow) -> bool {
    !row.alias.is_empty() && !row.url.is_empty() && !row.title.is_empty() && !row.package.is_empty()
}
