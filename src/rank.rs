//! Ranking of package file counts.

use serde::Serialize;
use std::collections::HashMap;

/// A ranked package and the number of files it ships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageFiles {
    pub package: String,
    pub files: usize,
}

/// The `limit` packages shipping the most files, most files first.
///
/// Packages with equal counts are ordered lexicographically by identifier,
/// so the ranking is reproducible for any input. Returns fewer entries when
/// the table is smaller than `limit`; an empty table yields an empty list.
pub fn top_packages(file_counts: &HashMap<String, usize>, limit: usize) -> Vec<PackageFiles> {
    let mut ranked: Vec<PackageFiles> = file_counts
        .iter()
        .map(|(package, files)| PackageFiles {
            package: package.clone(),
            files: *files,
        })
        .collect();

    ranked.sort_by(|a, b| b.files.cmp(&a.files).then_with(|| a.package.cmp(&b.package)));
    ranked.truncate(limit);
    ranked
}
