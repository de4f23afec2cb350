//! Common-Password Word List
//!
//! Loads a newline-delimited list of disallowed passwords once at process
//! start. The resulting set is immutable and is shared behind an `Arc`
//! without locking; membership checks are exact (no case folding, no
//! normalization).

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use thiserror::Error;

/// Word list loading errors
#[derive(Debug, Error)]
pub enum WordListError {
    #[error("Failed to read word list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Immutable set of disallowed passwords
///
/// One entry per line in the source file; surrounding whitespace is
/// trimmed (so CRLF files work), blank lines are skipped.
#[derive(Debug, Clone)]
pub struct CommonPasswordSet {
    entries: HashSet<String>,
}

impl CommonPasswordSet {
    /// Load the word list from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WordListError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| WordListError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Self::from_lines(content.lines()))
    }

    /// Build the set from in-memory lines
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = lines
            .into_iter()
            .map(|line| line.as_ref().trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        Self { entries }
    }

    /// Exact-match membership check
    pub fn contains(&self, candidate: &str) -> bool {
        self.entries.contains(candidate)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lines_skips_blanks_and_trims() {
        let set = CommonPasswordSet::from_lines(["password123\r", "", "  letmein  ", "qwerty"]);
        assert_eq!(set.len(), 3);
        assert!(set.contains("password123"));
        assert!(set.contains("letmein"));
        assert!(set.contains("qwerty"));
    }

    #[test]
    fn test_membership_is_exact() {
        let set = CommonPasswordSet::from_lines(["Password123"]);
        assert!(set.contains("Password123"));
        assert!(!set.contains("password123"));
        assert!(!set.contains("Password12"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = CommonPasswordSet::load("/nonexistent/word-list.txt");
        assert!(matches!(result, Err(WordListError::Io { .. })));
    }

    #[test]
    fn test_load_roundtrip() {
        let path = std::env::temp_dir().join("common-passwords-test.txt");
        fs::write(&path, "abc123\nhunter2\n\n").unwrap();

        let set = CommonPasswordSet::load(&path).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("hunter2"));

        fs::remove_file(&path).ok();
    }
}
