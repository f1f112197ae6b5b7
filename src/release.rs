//! Checksum entries from Debian `Release` files.
//!
//! A Release file describes one suite and lists every index file under
//! `dists/<suite>/` with its size and digests, grouped in sections:
//!
//! ```text
//! SHA256:
//!  3957f28db16e3f28c7b34ae84e1c4ef6...  20972605 contrib/Contents-all.gz
//!  4c65268a0b6e34ba394da add3814f1d...    981254 main/Contents-arm64.gz
//! ```
//!
//! Entry lines are indented by one space; a section ends at the next
//! unindented line. Entry paths are relative to `dists/<suite>/`.

/// One file entry from the `SHA256:` section of a Release file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumEntry {
    /// Lower-case hex SHA-256 digest of the file.
    pub sha256: String,
    /// File size in bytes, as published.
    pub size: u64,
    /// Path relative to `dists/<suite>/`.
    pub path: String,
}

/// Find the `SHA256:` entry for `path` in a Release file.
///
/// Only the `SHA256:` section is consulted; `MD5Sum:` and `SHA1:` sections
/// are skipped. Returns `None` when the section, the entry, or a parseable
/// size is missing.
pub fn find_sha256(release: &str, path: &str) -> Option<ChecksumEntry> {
    let mut in_sha256 = false;

    for line in release.lines() {
        if !line.starts_with(' ') {
            in_sha256 = line.trim_end() == "SHA256:";
            continue;
        }
        if !in_sha256 {
            continue;
        }

        let mut fields = line.split_whitespace();
        let (Some(sha256), Some(size), Some(entry_path)) =
            (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };

        if entry_path == path {
            return Some(ChecksumEntry {
                sha256: sha256.to_owned(),
                size: size.parse().ok()?,
                path: entry_path.to_owned(),
            });
        }
    }

    None
}
