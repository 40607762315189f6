//! Joining extracted topic tables into catalog rows.

use crate::{CatalogRow, PackageRequest, RawTopicRecord};
use std::collections::HashMap;

/// Path segment between a documentation site's base URL and its reference
/// pages.
const REFERENCE_SEGMENT: &str = "reference/";

/// Concatenates per-package topic tables and left-joins them against the
/// request set to attach each row's base URL.
///
/// Rows whose package has no matching request are dropped. That should not
/// happen given the fetcher's fail-fast contract, but a stray record must
/// not crash the build. Titles are normalized to a single line here, so
/// everything downstream can assume no embedded breaks.
pub fn join_topics(records: Vec<RawTopicRecord>, requests: &[PackageRequest]) -> Vec<CatalogRow> {
    let base_urls: HashMap<&str, &str> = requests
        .iter()
        .map(|request| (request.id.as_str(), request.docs_url.as_str()))
        .collect();

    records
        .into_iter()
        .filter_map(|record| {
            let base = base_urls.get(record.package.as_str())?;
            Some(CatalogRow {
                url: reference_url(base, &record.file),
                title: normalize_title(&record.title),
                alias: record.alias,
                package: record.package,
            })
        })
        .collect()
}

/// `base_url + "reference/" + file`; a missing trailing slash on the base
/// URL is tolerated.
pub(crate) fn reference_url(base_url: &str, file: &str) -> String {
    let base = base_url.trim_end_matches('/');
    format!("{base}/{REFERENCE_SEGMENT}{file}")
}

/// Replaces every embedded line break with a single space. A `\r\n` pair
/// counts as one break.
pub(crate) fn normalize_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut chars = title.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push(' ');
            },
            '\n' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}
