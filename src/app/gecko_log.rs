// geckolog - app/gecko_log.rs
//
// Path-holding handle over the gecko log written by the browser under test.
// Every query re-reads the file from the start: the log is append-only and
// written by an external process, so there is no cached state to go stale
// and nothing to invalidate across calls.

use crate::core::classify;
use crate::core::model::FilterOptions;
use crate::core::whitelist::Whitelist;
use crate::util::constants;
use crate::util::error::LogReadError;
use std::path::{Path, PathBuf};

/// Read-side view of a gecko log file.
///
/// Holds the path and the whitelist; all line data is ephemeral,
/// reconstructed per call from the file's current contents.
#[derive(Debug)]
pub struct GeckoLog {
    path: PathBuf,
    whitelist: Whitelist,
}

impl GeckoLog {
    /// Open a handle with the built-in whitelist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_whitelist(path, Whitelist::builtin())
    }

    /// Open a handle with a caller-assembled whitelist (built-in rules plus
    /// user rules, or an empty list in tests).
    pub fn with_whitelist(path: impl Into<PathBuf>, whitelist: Whitelist) -> Self {
        Self {
            path: path.into(),
            whitelist,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // -------------------------------------------------------------------------
    // Line subsets
    // -------------------------------------------------------------------------

    /// All lines of the log, in order. The final empty element produced by
    /// a trailing newline is dropped.
    pub fn all_lines(&self) -> Result<Vec<String>, LogReadError> {
        let bytes = std::fs::read(&self.path).map_err(|e| LogReadError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        let content = String::from_utf8(bytes).map_err(|e| LogReadError::InvalidEncoding {
            path: self.path.clone(),
            source: e,
        })?;

        let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
        if lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        Ok(lines)
    }

    /// The maximal trailing run of lines back to and including the most
    /// recent line containing the test-start marker. The whole log when no
    /// marker exists. Order is chronological (oldest first).
    pub fn lines_of_current_test(&self) -> Result<Vec<String>, LogReadError> {
        let mut lines = self.all_lines()?;
        if let Some(idx) = lines
            .iter()
            .rposition(|line| line.contains(constants::TEST_START_MARKER))
        {
            lines.drain(..idx);
        }
        Ok(lines)
    }

    /// All lines strictly before the first line containing the test-start
    /// marker. The whole log when no marker exists.
    pub fn lines_before_first_test(&self) -> Result<Vec<String>, LogReadError> {
        let mut lines = self.all_lines()?;
        if let Some(idx) = lines
            .iter()
            .position(|line| line.contains(constants::TEST_START_MARKER))
        {
            lines.truncate(idx);
        }
        Ok(lines)
    }

    // -------------------------------------------------------------------------
    // Error-line queries
    // -------------------------------------------------------------------------

    /// Genuine error lines across the whole log.
    pub fn all_error_lines(&self, opts: &FilterOptions) -> Result<Vec<String>, LogReadError> {
        let lines = self.all_lines()?;
        Ok(classify::filter_error_lines(&lines, opts, &self.whitelist))
    }

    /// Genuine error lines within the current test.
    pub fn error_lines_of_current_test(
        &self,
        opts: &FilterOptions,
    ) -> Result<Vec<String>, LogReadError> {
        let lines = self.lines_of_current_test()?;
        Ok(classify::filter_error_lines(&lines, opts, &self.whitelist))
    }

    /// Genuine error lines preceding the first test (startup noise).
    pub fn error_lines_before_first_test(
        &self,
        opts: &FilterOptions,
    ) -> Result<Vec<String>, LogReadError> {
        let lines = self.lines_before_first_test()?;
        Ok(classify::filter_error_lines(&lines, opts, &self.whitelist))
    }
}
