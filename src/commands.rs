//! Command implementations for the debtop CLI.

use crate::contents;
use crate::error::{DebtopError, Result};
use crate::mirror::{self, Mirror};
use crate::rank;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Architectures Debian publishes Contents indices for in current suites.
/// Used only to pick a suggestion after a 404; whatever the user typed is
/// still sent to the mirror as-is.
const KNOWN_ARCHITECTURES: &[&str] = &[
    "all", "amd64", "arm64", "armel", "armhf", "i386", "mips64el", "ppc64el", "riscv64", "s390x",
];

/// Options for one statistics run, resolved from the command line.
#[derive(Debug, Clone)]
pub struct StatsOptions {
    pub architecture: String,
    pub top: usize,
    pub mirror: String,
    pub suite: String,
    pub component: String,
    pub file: Option<PathBuf>,
    pub verify: bool,
    pub json: bool,
}

/// Fetch a Contents index, count files per package, and print the packages
/// with the most files.
///
/// Rows go to stdout as `<package>\t<count>` (or a JSON array with `--json`);
/// progress and hints go to stderr.
pub async fn stats(options: &StatsOptions) -> Result<()> {
    let index = match &options.file {
        Some(path) => read_contents_file(path)?,
        None => download_contents(options).await?,
    };

    let file_counts = contents::parse_contents(&index);
    let ranked = rank::top_packages(&file_counts, options.top);

    tracing::debug!(
        "{} packages in index, printing top {}",
        file_counts.len(),
        ranked.len()
    );

    if options.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else if ranked.is_empty() {
        eprintln!("No packages found in Contents-{}", options.architecture);
    } else {
        for entry in &ranked {
            println!("{}\t{}", entry.package, entry.files);
        }
    }

    Ok(())
}

/// Download the Contents index with a progress bar on interactive terminals.
async fn download_contents(options: &StatsOptions) -> Result<String> {
    let mirror = Mirror::new(&options.mirror, &options.suite, &options.component)?;

    let is_tty = std::io::stderr().is_terminal();
    let progress = if !options.json && is_tty {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message(format!("⬇ Contents-{}", options.architecture));
        pb
    } else {
        ProgressBar::hidden()
    };

    let result = mirror
        .fetch_contents(&options.architecture, options.verify, Some(&progress))
        .await;

    match &result {
        Ok(_) => progress.finish_with_message(format!("✓ Contents-{}", options.architecture)),
        Err(_) => progress.finish_and_clear(),
    }

    if let Err(DebtopError::Fetch {
        architecture,
        status,
    }) = &result
    {
        if *status == reqwest::StatusCode::NOT_FOUND {
            if let Some(suggestion) = suggest_architecture(architecture) {
                eprintln!(
                    "{} no Contents index for '{}' in {}/{}, did you mean '{}'?",
                    "hint:".yellow().bold(),
                    architecture,
                    options.suite,
                    options.component,
                    suggestion.cyan()
                );
            }
        }
    }

    result
}

/// Pick the closest known architecture for a name the mirror rejected.
///
/// Returns `None` for names that are already known (the 404 then has some
/// other cause, like a suite that does not carry the architecture) and for
/// names too far from anything Debian publishes.
fn suggest_architecture(unknown: &str) -> Option<&'static str> {
    if KNOWN_ARCHITECTURES.contains(&unknown) {
        return None;
    }

    KNOWN_ARCHITECTURES
        .iter()
        .map(|candidate| (*candidate, strsim::jaro_winkler(unknown, candidate)))
        .filter(|(_, score)| *score >= 0.8)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate)
}

/// Read a local Contents index, decompressing when it is gzip.
fn read_contents_file(path: &Path) -> Result<String> {
    let data = std::fs::read(path)?;

    // Accept both the .gz as served by mirrors and a decompressed index.
    if data.starts_with(&[0x1f, 0x8b]) {
        mirror::gunzip(&data)
    } else {
        String::from_utf8(data).map_err(|e| {
            DebtopError::Decode(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }
}
