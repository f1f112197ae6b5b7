//! Parsing of Debian `Contents` index files.
//!
//! A Contents index maps installed file paths to the packages shipping them,
//! one record per line: `<path>[whitespace]<package>[,<package>...]`. The
//! path may itself contain whitespace, so the package list is always the
//! *last* whitespace-delimited token on the line.

use std::collections::HashMap;

/// One parsed index line: a file path and its comma-separated package list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentsEntry<'a> {
    /// Installed file path, relative to the filesystem root.
    pub path: &'a str,
    packages: &'a str,
}

impl<'a> ContentsEntry<'a> {
    /// The package identifiers shipping this file, in line order.
    ///
    /// Always yields at least one identifier. Identifiers may carry a
    /// `section/` prefix in real indexes; they are treated as opaque tokens.
    pub fn packages(&self) -> impl Iterator<Item = &'a str> {
        self.packages.split(',')
    }
}

/// Split one index line into its file path and package list.
///
/// The split happens at the rightmost whitespace run: the token after it is
/// the package list, everything before it (internal whitespace included) is
/// the path. Returns `None` for lines that are unusable:
/// - no whitespace boundary at all (fewer than two fields),
/// - empty or whitespace-only lines,
/// - paths starting with `.` (relative-path markers, not file records).
pub fn parse_line(line: &str) -> Option<ContentsEntry<'_>> {
    let line = line.trim_end();
    let (path, packages) = line.rsplit_once(|c: char| c.is_whitespace())?;

    // Consume the whole separator run; the path keeps any leading whitespace.
    let path = path.trim_end();
    if path.is_empty() || path.starts_with('.') {
        return None;
    }

    Some(ContentsEntry { path, packages })
}

/// Count how many files each package ships across the whole index text.
///
/// Single pass over the text; unusable lines contribute nothing. Every
/// package listed on a line is credited one file, so a file shared by three
/// packages adds three associations.
pub fn parse_contents(contents: &str) -> HashMap<String, usize> {
    let mut file_counts: HashMap<String, usize> = HashMap::new();

    for line in contents.lines() {
        let Some(entry) = parse_line(line) else {
            continue;
        };

        for package in entry.packages() {
            match file_counts.get_mut(package) {
                Some(count) => *count += 1,
                None => {
                    file_counts.insert(package.to_owned(), 1);
                }
            }
        }
    }

    file_counts
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
usr/bin/foo packageA,packageB
usr/bin/bar packageB
usr/lib/bar packageB
usr/sbin/baz packageC,packageA
./usr/local/bin/foobar packageA
file/without/package
";

    #[test]
    fn test_parse_line_single_package() {
        let entry = parse_line("usr/bin/bar packageB").unwrap();
        assert_eq!(entry.path, "usr/bin/bar");
        assert_eq!(entry.packages().collect::<Vec<_>>(), vec!["packageB"]);
    }

    #[test]
    fn test_parse_line_comma_list() {
        let entry = parse_line("usr/bin/foo packageA,packageB").unwrap();
        assert_eq!(
            entry.packages().collect::<Vec<_>>(),
            vec!["packageA", "packageB"]
        );
    }

    #[test]
    fn test_parse_line_path_with_spaces() {
        let entry = parse_line("usr/share/doc/my file.txt utils/some-package").unwrap();
        assert_eq!(entry.path, "usr/share/doc/my file.txt");
        assert_eq!(
            entry.packages().collect::<Vec<_>>(),
            vec!["utils/some-package"]
        );
    }

    #[test]
    fn test_parse_line_separator_run_consumed() {
        let entry = parse_line("usr/bin/tool \t  packageA").unwrap();
        assert_eq!(entry.path, "usr/bin/tool");
        assert_eq!(entry.packages().collect::<Vec<_>>(), vec!["packageA"]);
    }

    #[test]
    fn test_parse_line_trailing_whitespace_ignored() {
        let entry = parse_line("usr/bin/tool packageA   ").unwrap();
        assert_eq!(entry.packages().collect::<Vec<_>>(), vec!["packageA"]);
    }

    #[test]
    fn test_parse_line_discards_single_token() {
        assert!(parse_line("file/without/package").is_none());
    }

    #[test]
    fn test_parse_line_discards_blank_lines() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
    }

    #[test]
    fn test_parse_line_discards_leading_dot_paths() {
        assert!(parse_line("./usr/local/bin/foobar packageA").is_none());
        assert!(parse_line(". packageA").is_none());
    }

    #[test]
    fn test_parse_line_leading_whitespace_leaves_one_field() {
        // The separator run eats the entire prefix, so no path remains.
        assert!(parse_line("  packageA").is_none());
    }

    #[test]
    fn test_parse_contents_counts_files_per_package() {
        let counts = parse_contents(SAMPLE);
        assert_eq!(counts.len(), 3);
        assert_eq!(counts["packageA"], 2);
        assert_eq!(counts["packageB"], 3);
        assert_eq!(counts["packageC"], 1);
    }

    #[test]
    fn test_parse_contents_empty_input() {
        assert!(parse_contents("").is_empty());
    }

    #[test]
    fn test_parse_contents_is_idempotent() {
        assert_eq!(parse_contents(SAMPLE), parse_contents(SAMPLE));
    }

    #[test]
    fn test_parse_contents_total_matches_associations() {
        // Four parseable lines carrying 2 + 1 + 1 + 2 package identifiers.
        let total: usize = parse_contents(SAMPLE).values().sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn test_parse_contents_no_trailing_newline() {
        let counts = parse_contents("usr/bin/a pkg\nusr/bin/b pkg");
        assert_eq!(counts["pkg"], 2);
    }
}
