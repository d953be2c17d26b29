// geckolog - util/constants.rs
//
// Single source of truth for all named constants, sentinel strings, and
// defaults. The sentinel and marker strings must match the values emitted
// by the test harness byte-for-byte; classification is exact-match only.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "geckolog";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Suppression-region sentinels
// =============================================================================
//
// These exact lines are written into the gecko log by the automation driver
// to open and close suppression windows. They must appear as a full line and
// nowhere else; recognition is by string equality, never substring match.

/// Opens an "ignore" region: matching lines are excluded from all
/// error-filtering output.
pub const IGNORE_ERRORS_START: &str = "[RP Puppeteer] GeckoLog ignore errors: start";

/// Closes an "ignore" region. The end line itself still counts as inside.
pub const IGNORE_ERRORS_END: &str = "[RP Puppeteer] GeckoLog ignore errors: end";

/// Opens an "expect" region: matching lines are excluded only from the
/// "this is unexpected" classification (`return_expected_as_well = false`).
pub const EXPECT_ERRORS_START: &str = "[RP Puppeteer] GeckoLog expect errors: start";

/// Closes an "expect" region.
pub const EXPECT_ERRORS_END: &str = "[RP Puppeteer] GeckoLog expect errors: end";

// =============================================================================
// Test-boundary and domain markers
// =============================================================================

/// Substring marking the start of a test in the log. Unlike the region
/// sentinels this is a substring match: the harness embeds it in a longer
/// status line.
pub const TEST_START_MARKER: &str = "TEST-START";

/// Diagnostic log prefix identifying lines produced by the extension itself.
pub const EXTENSION_LOG_PREFIX: &str = "[RequestPolicy]";

/// URI-scheme prefix identifying the extension's internal resource namespace.
/// Script errors reported against these URIs belong to the extension even
/// when the log prefix is absent.
pub const EXTENSION_RESOURCE_SCHEME: &str = "chrome://rpcontinued/";

/// Lines mentioning bundled third-party code are never attributed to the
/// extension, even when they carry a domain marker.
pub const THIRD_PARTY_MARKER: &str = "jquery.min.js";

// =============================================================================
// Error-likeness
// =============================================================================

/// Keywords that make a (lower-cased) line error-like.
pub const ERROR_KEYWORDS: &[&str] = &["error", "warning", "exception"];

/// Generic console-message prefix. Lines starting with this are excluded
/// from error-likeness unless they start with `CONSOLE_ERROR_PREFIX`.
pub const CONSOLE_PREFIX: &str = "console.";

/// The one console prefix that is retained as error-like.
pub const CONSOLE_ERROR_PREFIX: &str = "console.error";

// =============================================================================
// Whitelist limits
// =============================================================================

/// Maximum regex pattern length for user whitelist rules (ReDoS guard).
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4_096;

// =============================================================================
// Sentinel-wait polling
// =============================================================================

/// Total time the suppression session waits for an emitted sentinel to be
/// flushed into the log before giving up with a timeout error.
pub const SENTINEL_WAIT_TIMEOUT_MS: u64 = 5_000;

/// How often the log is re-read while waiting for a sentinel to appear.
pub const SENTINEL_POLL_INTERVAL_MS: u64 = 100;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
