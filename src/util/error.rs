// geckolog - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors preserve the causal chain
// for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all geckolog operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum GeckoLogError {
    /// Reading or decoding the log file failed.
    Read(LogReadError),

    /// Whitelist loading or validation failed.
    Whitelist(WhitelistError),

    /// Live suppression-session operation failed.
    Session(SessionError),
}

impl fmt::Display for GeckoLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(e) => write!(f, "Log read error: {e}"),
            Self::Whitelist(e) => write!(f, "Whitelist error: {e}"),
            Self::Session(e) => write!(f, "Session error: {e}"),
        }
    }
}

impl std::error::Error for GeckoLogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read(e) => Some(e),
            Self::Whitelist(e) => Some(e),
            Self::Session(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Log read errors
// ---------------------------------------------------------------------------

/// Errors reading the gecko log from disk.
///
/// These propagate immediately to the caller — no retry, no partial result.
/// The caller (CLI or test harness) chooses how to report and which exit
/// code to use.
#[derive(Debug)]
pub enum LogReadError {
    /// I/O error opening or reading the log file.
    Io { path: PathBuf, source: io::Error },

    /// Log file content is not valid UTF-8.
    InvalidEncoding {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },
}

impl fmt::Display for LogReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "'{}': I/O error: {source}", path.display())
            }
            Self::InvalidEncoding { path, source } => {
                write!(f, "'{}': invalid UTF-8 encoding: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for LogReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidEncoding { source, .. } => Some(source),
        }
    }
}

impl From<LogReadError> for GeckoLogError {
    fn from(e: LogReadError) -> Self {
        Self::Read(e)
    }
}

// ---------------------------------------------------------------------------
// Whitelist errors
// ---------------------------------------------------------------------------

/// Errors loading and compiling user whitelist rules.
///
/// A malformed rule file is a configuration defect surfaced at load time,
/// never a runtime condition to recover from mid-classification.
#[derive(Debug)]
pub enum WhitelistError {
    /// TOML file could not be parsed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A rule declares neither `prefix` nor `pattern`.
    MissingMatcher { path: PathBuf, index: usize },

    /// A rule declares both `prefix` and `pattern`.
    ConflictingMatchers { path: PathBuf, index: usize },

    /// A rule's regex pattern is invalid.
    InvalidRegex {
        path: PathBuf,
        index: usize,
        pattern: String,
        source: regex::Error,
    },

    /// A rule's regex pattern exceeds the maximum allowed length.
    RegexTooLong {
        path: PathBuf,
        index: usize,
        length: usize,
        max_length: usize,
    },

    /// I/O error reading the rule file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for WhitelistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Failed to parse TOML '{}': {source}", path.display())
            }
            Self::MissingMatcher { path, index } => write!(
                f,
                "Rule {index} in '{}': declare either 'prefix' or 'pattern'",
                path.display()
            ),
            Self::ConflictingMatchers { path, index } => write!(
                f,
                "Rule {index} in '{}': 'prefix' and 'pattern' are mutually exclusive",
                path.display()
            ),
            Self::InvalidRegex {
                path,
                index,
                pattern,
                source,
            } => write!(
                f,
                "Rule {index} in '{}': invalid regex '{pattern}': {source}",
                path.display()
            ),
            Self::RegexTooLong {
                path,
                index,
                length,
                max_length,
            } => write!(
                f,
                "Rule {index} in '{}': pattern is {length} chars, \
                 exceeds maximum of {max_length}",
                path.display()
            ),
            Self::Io { path, source } => {
                write!(
                    f,
                    "I/O error reading whitelist '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for WhitelistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::InvalidRegex { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<WhitelistError> for GeckoLogError {
    fn from(e: WhitelistError) -> Self {
        Self::Whitelist(e)
    }
}

// ---------------------------------------------------------------------------
// Session errors
// ---------------------------------------------------------------------------

/// Errors from the live suppression-session API.
#[derive(Debug)]
pub enum SessionError {
    /// `start_ignoring_errors` called while a region is already open.
    /// Programmer error in the calling test code.
    AlreadyIgnoring,

    /// `stop_ignoring_errors` called while no region is open.
    /// Programmer error in the calling test code.
    NotIgnoring,

    /// The notifier failed to emit the sentinel message.
    Notify { message: String, source: io::Error },

    /// The emitted sentinel did not appear in the log within the deadline.
    SentinelTimeout { sentinel: String, waited_ms: u64 },

    /// Reading the log back during the wait loop failed.
    Read(LogReadError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyIgnoring => {
                write!(f, "start_ignoring_errors: a suppression region is already open")
            }
            Self::NotIgnoring => {
                write!(f, "stop_ignoring_errors: no suppression region is open")
            }
            Self::Notify { message, source } => {
                write!(f, "Failed to emit sentinel '{message}': {source}")
            }
            Self::SentinelTimeout {
                sentinel,
                waited_ms,
            } => write!(
                f,
                "Sentinel '{sentinel}' did not appear in the log within {waited_ms} ms"
            ),
            Self::Read(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Notify { source, .. } => Some(source),
            Self::Read(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LogReadError> for SessionError {
    fn from(e: LogReadError) -> Self {
        Self::Read(e)
    }
}

impl From<SessionError> for GeckoLogError {
    fn from(e: SessionError) -> Self {
        Self::Session(e)
    }
}

/// Convenience type alias for geckolog results.
pub type Result<T> = std::result::Result<T, GeckoLogError>;
