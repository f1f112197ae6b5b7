//! Debian mirror client for Contents indices.
//!
//! This module provides a [`Mirror`] client for downloading package indices
//! from a Debian archive mirror. It handles all communication with the
//! mirror, including timeout management, gzip decompression, and optional
//! SHA-256 verification against the suite's Release file.
//!
//! # Archive layout
//!
//! A Debian mirror serves one `Contents` index per component and
//! architecture, plus a `Release` file describing the suite:
//!
//! ```text
//! {mirror}/dists/{suite}/Release
//! {mirror}/dists/{suite}/{component}/Contents-{architecture}.gz
//! ```
//!
//! For example, the amd64 index for stable/main on the default mirror is
//! `http://ftp.uk.debian.org/debian/dists/stable/main/Contents-amd64.gz`.
//!
//! # Examples
//!
//! ```no_run
//! use debtop::Mirror;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mirror = Mirror::new("http://ftp.uk.debian.org/debian", "stable", "main")?;
//!     let contents = mirror.fetch_contents("amd64", false, None).await?;
//!
//!     println!("index has {} lines", contents.lines().count());
//!     Ok(())
//! }
//! ```

use crate::error::{DebtopError, Result};
use crate::release;
use flate2::read::GzDecoder;
use indicatif::ProgressBar;
use sha2::{Digest, Sha256};
use std::io::Read;
use std::time::Duration;

/// Mirror used when none is given on the command line.
pub const DEFAULT_MIRROR: &str = "http://ftp.uk.debian.org/debian";
/// Suite used when none is given on the command line.
pub const DEFAULT_SUITE: &str = "stable";
/// Component used when none is given on the command line.
pub const DEFAULT_COMPONENT: &str = "main";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Client for one mirror/suite/component combination.
#[derive(Debug, Clone)]
pub struct Mirror {
    client: reqwest::Client,
    base: String,
    suite: String,
    component: String,
}

impl Mirror {
    /// Create a client for the given mirror base URL, suite, and component.
    ///
    /// A trailing slash on the base URL is accepted and ignored.
    pub fn new(base: &str, suite: &str, component: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(format!("debtop/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
            suite: suite.to_string(),
            component: component.to_string(),
        })
    }

    /// Path of the Contents index relative to `dists/{suite}/`.
    ///
    /// This is the form the Release file lists it under.
    pub fn contents_path(&self, architecture: &str) -> String {
        format!("{}/Contents-{}.gz", self.component, architecture)
    }

    /// Full URL of the Contents index for `architecture`.
    pub fn contents_url(&self, architecture: &str) -> String {
        format!(
            "{}/dists/{}/{}",
            self.base,
            self.suite,
            self.contents_path(architecture)
        )
    }

    /// Full URL of the suite's Release file.
    pub fn release_url(&self) -> String {
        format!("{}/dists/{}/Release", self.base, self.suite)
    }

    /// Download and decompress the Contents index for `architecture`.
    ///
    /// With `verify`, the suite's Release file is fetched first and the
    /// compressed index is checked against its published SHA-256 before
    /// decompression. A pre-styled `progress` bar, when given, is fed the
    /// download position as chunks arrive.
    ///
    /// # Errors
    ///
    /// Returns [`DebtopError::Fetch`] when the mirror answers with a
    /// non-success status (a 404 usually means the architecture does not
    /// exist in this suite), [`DebtopError::Decode`] when the body is not
    /// valid gzip, and [`DebtopError::ChecksumMismatch`] when verification
    /// fails.
    pub async fn fetch_contents(
        &self,
        architecture: &str,
        verify: bool,
        progress: Option<&ProgressBar>,
    ) -> Result<String> {
        let url = self.contents_url(architecture);
        tracing::debug!("fetching {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(DebtopError::Fetch {
                architecture: architecture.to_string(),
                status: response.status(),
            });
        }

        let expected = if verify {
            Some(self.expected_sha256(architecture).await?)
        } else {
            None
        };

        let compressed = read_body(response, progress).await?;

        if let Some(entry) = expected {
            let actual = sha256_hex(&compressed);
            if actual != entry.sha256 {
                return Err(DebtopError::ChecksumMismatch {
                    path: entry.path,
                    expected: entry.sha256,
                    actual,
                });
            }
            tracing::debug!("checksum verified for {}", entry.path);
        }

        gunzip(&compressed)
    }

    /// Look up the published SHA-256 for this architecture's index.
    async fn expected_sha256(&self, architecture: &str) -> Result<release::ChecksumEntry> {
        let url = self.release_url();
        tracing::debug!("fetching {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(DebtopError::Release {
                status: response.status(),
            });
        }

        let body = response.text().await?;
        let path = self.contents_path(architecture);
        release::find_sha256(&body, &path).ok_or(DebtopError::MissingChecksum { path })
    }
}

/// Read the response body into memory, feeding the progress bar as
/// chunks arrive.
async fn read_body(
    mut response: reqwest::Response,
    progress: Option<&ProgressBar>,
) -> Result<Vec<u8>> {
    if let Some(pb) = progress {
        if let Some(total) = response.content_length() {
            pb.set_length(total);
        }
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        body.extend_from_slice(&chunk);
        if let Some(pb) = progress {
            pb.set_position(body.len() as u64);
        }
    }

    Ok(body)
}

/// Decompress a gzip body into text.
pub fn gunzip(compressed: &[u8]) -> Result<String> {
    let mut decoder = GzDecoder::new(compressed);
    let mut contents = String::new();
    decoder
        .read_to_string(&mut contents)
        .map_err(DebtopError::Decode)?;
    Ok(contents)
}

fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_contents_url() {
        let mirror = Mirror::new("http://ftp.uk.debian.org/debian", "stable", "main").unwrap();
        assert_eq!(
            mirror.contents_url("amd64"),
            "http://ftp.uk.debian.org/debian/dists/stable/main/Contents-amd64.gz"
        );
    }

    #[test]
    fn test_trailing_slash_in_base_is_ignored() {
        let mirror = Mirror::new("http://deb.debian.org/debian/", "sid", "contrib").unwrap();
        assert_eq!(
            mirror.contents_url("arm64"),
            "http://deb.debian.org/debian/dists/sid/contrib/Contents-arm64.gz"
        );
    }

    #[test]
    fn test_release_url() {
        let mirror = Mirror::new("http://ftp.uk.debian.org/debian", "stable", "main").unwrap();
        assert_eq!(
            mirror.release_url(),
            "http://ftp.uk.debian.org/debian/dists/stable/Release"
        );
    }

    #[test]
    fn test_contents_path_matches_release_listing() {
        let mirror = Mirror::new("http://ftp.uk.debian.org/debian", "stable", "main").unwrap();
        assert_eq!(mirror.contents_path("s390x"), "main/Contents-s390x.gz");
    }

    #[test]
    fn test_gunzip() {
        let compressed = gzip(b"bin/ls coreutils\nbin/cat coreutils\n");
        let contents = gunzip(&compressed).unwrap();
        assert_eq!(contents, "bin/ls coreutils\nbin/cat coreutils\n");
    }

    #[test]
    fn test_gunzip_rejects_plain_text() {
        let err = gunzip(b"not a gzip stream").unwrap_err();
        assert!(matches!(err, DebtopError::Decode(_)));
    }

    #[test]
    fn test_gunzip_rejects_truncated_stream() {
        let mut compressed = gzip(b"bin/ls coreutils\n");
        compressed.truncate(compressed.len() / 2);
        assert!(gunzip(&compressed).is_err());
    }

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            sha256_hex(b"hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    // Network tests - ignored by default
    // Run with: cargo test --lib -- --ignored

    #[tokio::test]
    #[ignore]
    async fn test_fetch_release_checksum() {
        let mirror = Mirror::new(DEFAULT_MIRROR, DEFAULT_SUITE, DEFAULT_COMPONENT).unwrap();
        let entry = mirror.expected_sha256("amd64").await.unwrap();

        assert_eq!(entry.path, "main/Contents-amd64.gz");
        assert_eq!(entry.sha256.len(), 64);
        assert!(entry.size > 0);
    }

    #[tokio::test]
    #[ignore]
    async fn test_fetch_contents_unknown_architecture_is_404() {
        let mirror = Mirror::new(DEFAULT_MIRROR, DEFAULT_SUITE, DEFAULT_COMPONENT).unwrap();
        let err = mirror.fetch_contents("sparc", false, None).await.unwrap_err();

        match err {
            DebtopError::Fetch {
                architecture,
                status,
            } => {
                assert_eq!(architecture, "sparc");
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
            }
            other => panic!("expected fetch error, got: {other}"),
        }
    }
}
