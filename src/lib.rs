//! Library interface for debtop
//!
//! This library exposes the Contents index pipeline (download, parse, rank)
//! for testing and potential future use.

pub mod commands;
pub mod contents;
pub mod error;
pub mod mirror;
pub mod rank;
pub mod release;

// Re-export commonly used items
pub use contents::{parse_contents, parse_line};
pub use error::{DebtopError, Result};
pub use mirror::Mirror;
pub use rank::{PackageFiles, top_packages};
