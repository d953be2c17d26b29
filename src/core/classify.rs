// geckolog - core/classify.rs
//
// Per-line error classification: console-header merging, suppression-region
// tracking, error-likeness, domain ownership, and whitelist filtering.
// Core layer: pure logic over line slices, no I/O.

use crate::core::model::FilterOptions;
use crate::core::region::{RegionKind, RegionTracker};
use crate::core::whitelist::Whitelist;
use crate::util::constants;
use regex::Regex;
use std::sync::OnceLock;

/// A console-record header with no message body: `console.` followed by a
/// word-character sequence and nothing but whitespace/colon after it. Such
/// records put the message on the following physical line.
fn is_bare_console_header(line: &str) -> bool {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    let re = HEADER.get_or_init(|| {
        // Static pattern, covered by the unit tests below.
        Regex::new(r"^console\.\w+[\s:]*$").expect("console header: invalid regex")
    });
    re.is_match(line)
}

/// Error-likeness gate.
///
/// Generic console records (`console.log`, `console.info`, `console.warn`)
/// are excluded even when their body mentions an error keyword; only
/// `console.error` passes the gate. Surviving lines must contain at least
/// one of the error keywords, case-insensitively.
fn is_error_like(line: &str) -> bool {
    let lower = line.to_lowercase();
    if lower.starts_with(constants::CONSOLE_PREFIX)
        && !lower.starts_with(constants::CONSOLE_ERROR_PREFIX)
    {
        return false;
    }
    constants::ERROR_KEYWORDS
        .iter()
        .any(|keyword| lower.contains(keyword))
}

/// Full ownership check: error-like, attributable to the extension, not
/// third-party, not whitelisted.
fn is_extension_error(line: &str, whitelist: &Whitelist) -> bool {
    if !is_error_like(line) {
        return false;
    }

    // Lines lacking both domain markers belong to the browser or another
    // add-on, not to the extension under test.
    if !line.contains(constants::EXTENSION_LOG_PREFIX)
        && !line.contains(constants::EXTENSION_RESOURCE_SCHEME)
    {
        return false;
    }

    if line.contains(constants::THIRD_PARTY_MARKER) {
        return false;
    }

    !whitelist.matches(line)
}

/// Filter a line subset down to the genuine error lines, in original order.
///
/// The scan is left-to-right and single-pass:
///   1. A bare console header is held back and prepended to the next line,
///      which is then classified once as the merged logical line. Exactly
///      one continuation line is assumed; a header at end-of-input is
///      dropped.
///   2. Every active region tracker is updated with the candidate line; a
///      line inside any suppressed region (sentinels included) is excluded
///      before further checks.
///   3. Survivors pass through the error-likeness / ownership / whitelist
///      gates.
pub fn filter_error_lines(
    lines: &[String],
    opts: &FilterOptions,
    whitelist: &Whitelist,
) -> Vec<String> {
    let mut trackers = Vec::new();
    if !opts.return_ignored_as_well {
        trackers.push(RegionTracker::new(RegionKind::Ignore));
    }
    if !opts.return_expected_as_well {
        trackers.push(RegionTracker::new(RegionKind::Expect));
    }

    let mut error_lines = Vec::new();
    let mut pending_header: Option<&str> = None;

    for line in lines {
        let merged;
        let candidate: &str = match pending_header.take() {
            Some(header) => {
                merged = format!("{header} {line}");
                &merged
            }
            None => {
                if is_bare_console_header(line) {
                    pending_header = Some(line.as_str());
                    continue;
                }
                line
            }
        };

        // All active trackers must see every scanned line: a line inside
        // one region may simultaneously be a sentinel for the other kind.
        let mut suppressed = false;
        for tracker in &mut trackers {
            if tracker.update_and_check(candidate) {
                suppressed = true;
            }
        }
        if suppressed {
            continue;
        }

        if is_extension_error(candidate, whitelist) {
            error_lines.push(candidate.to_string());
        }
    }

    error_lines
}
