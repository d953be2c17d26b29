// geckolog - app/suppress.rs
//
// Live suppression toggling: emits region sentinels into the running
// browser's log through an external notifier and synchronises on their
// appearance in the log tail.
//
// Region state is never held in memory. `currently_ignoring_errors` scans
// the log backward for the most recent start/end sentinel on every call,
// so the answer survives process restarts mid-test and stays correct when
// several harness processes share one log. Do not "optimise" this into
// cached flags.

use crate::app::gecko_log::GeckoLog;
use crate::core::region::RegionKind;
use crate::util::constants;
use crate::util::error::{LogReadError, SessionError};
use std::io;
use std::time::{Duration, Instant};

/// Channel through which sentinel lines reach the log.
///
/// The production implementation forwards the message to the automation
/// driver's observer-notification mechanism, which the browser echoes into
/// its log. Tests substitute an implementation that appends to the log
/// file directly.
pub trait SentinelNotifier {
    fn notify(&mut self, message: &str) -> io::Result<()>;
}

/// Stateful wrapper toggling suppression regions on a live log.
pub struct SuppressionSession<N: SentinelNotifier> {
    log: GeckoLog,
    notifier: N,
    poll_interval: Duration,
    wait_timeout: Duration,
}

impl<N: SentinelNotifier> SuppressionSession<N> {
    pub fn new(log: GeckoLog, notifier: N) -> Self {
        Self {
            log,
            notifier,
            poll_interval: Duration::from_millis(constants::SENTINEL_POLL_INTERVAL_MS),
            wait_timeout: Duration::from_millis(constants::SENTINEL_WAIT_TIMEOUT_MS),
        }
    }

    /// Override the polling cadence and deadline (tests use short values).
    pub fn with_wait(mut self, poll_interval: Duration, wait_timeout: Duration) -> Self {
        self.poll_interval = poll_interval;
        self.wait_timeout = wait_timeout;
        self
    }

    pub fn log(&self) -> &GeckoLog {
        &self.log
    }

    // -------------------------------------------------------------------------
    // Public operations
    // -------------------------------------------------------------------------

    /// True when the most recent region sentinel in the log (of either
    /// kind) is a start sentinel.
    pub fn currently_ignoring_errors(&self) -> Result<bool, SessionError> {
        Ok(self.current_region_kind()?.is_some())
    }

    /// Open a suppression region. `expected` selects an "expect" region
    /// instead of a full "ignore" region.
    ///
    /// Calling this while a region is already open is a programmer error
    /// in the test code and fails with `SessionError::AlreadyIgnoring`.
    pub fn start_ignoring_errors(&mut self, expected: bool) -> Result<(), SessionError> {
        if self.currently_ignoring_errors()? {
            return Err(SessionError::AlreadyIgnoring);
        }
        let kind = if expected {
            RegionKind::Expect
        } else {
            RegionKind::Ignore
        };
        self.dump_and_wait(kind.start_sentinel())
    }

    /// Close the currently open suppression region, whichever kind it is.
    ///
    /// Fails with `SessionError::NotIgnoring` when no region is open.
    pub fn stop_ignoring_errors(&mut self) -> Result<(), SessionError> {
        let kind = self.current_region_kind()?.ok_or(SessionError::NotIgnoring)?;
        self.dump_and_wait(kind.end_sentinel())
    }

    /// Backward scan for the most recent line (at index >= `min_line`)
    /// equal to one of `needles`.
    pub fn find(
        &self,
        needles: &[&str],
        min_line: usize,
    ) -> Result<Option<String>, LogReadError> {
        let all_lines = self.log.all_lines()?;
        for line in all_lines.iter().skip(min_line).rev() {
            if needles.iter().any(|needle| line == needle) {
                return Ok(Some(line.clone()));
            }
        }
        Ok(None)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// The kind of the currently open region, recomputed from the log.
    fn current_region_kind(&self) -> Result<Option<RegionKind>, LogReadError> {
        for kind in [RegionKind::Ignore, RegionKind::Expect] {
            let last = self.find(&[kind.start_sentinel(), kind.end_sentinel()], 0)?;
            if last.as_deref() == Some(kind.start_sentinel()) {
                return Ok(Some(kind));
            }
        }
        Ok(None)
    }

    /// Emit `message` through the notifier, then poll the log until the
    /// exact line appears past the pre-emit line count or the deadline
    /// elapses.
    fn dump_and_wait(&mut self, message: &str) -> Result<(), SessionError> {
        let min_line = self.log.all_lines()?.len();

        tracing::debug!(sentinel = message, min_line, "Emitting region sentinel");
        self.notifier
            .notify(message)
            .map_err(|e| SessionError::Notify {
                message: message.to_string(),
                source: e,
            })?;

        let deadline = Instant::now() + self.wait_timeout;
        loop {
            if self.find(&[message], min_line)?.is_some() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                tracing::warn!(sentinel = message, "Sentinel wait timed out");
                return Err(SessionError::SentinelTimeout {
                    sentinel: message.to_string(),
                    waited_ms: self.wait_timeout.as_millis() as u64,
                });
            }
            std::thread::sleep(self.poll_interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::OpenOptions;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    /// Appends the sentinel to the log file directly, standing in for the
    /// browser echoing an observer notification into its log.
    struct FileAppendNotifier {
        path: PathBuf,
    }

    impl SentinelNotifier for FileAppendNotifier {
        fn notify(&mut self, message: &str) -> io::Result<()> {
            let mut file = OpenOptions::new().append(true).open(&self.path)?;
            writeln!(file, "{message}")
        }
    }

    /// Swallows the message without ever flushing it to the log.
    struct NullNotifier;

    impl SentinelNotifier for NullNotifier {
        fn notify(&mut self, _message: &str) -> io::Result<()> {
            Ok(())
        }
    }

    fn make_log(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn session(file: &NamedTempFile) -> SuppressionSession<FileAppendNotifier> {
        SuppressionSession::new(
            GeckoLog::new(file.path()),
            FileAppendNotifier {
                path: file.path().to_path_buf(),
            },
        )
        .with_wait(Duration::from_millis(1), Duration::from_millis(200))
    }

    #[test]
    fn test_start_and_stop_ignore_cycle() {
        let file = make_log("preamble\n");
        let mut session = session(&file);

        assert!(!session.currently_ignoring_errors().unwrap());
        session.start_ignoring_errors(false).unwrap();
        assert!(session.currently_ignoring_errors().unwrap());
        session.stop_ignoring_errors().unwrap();
        assert!(!session.currently_ignoring_errors().unwrap());

        // The sentinels landed in the log in order.
        let lines = session.log().all_lines().unwrap();
        assert_eq!(
            lines,
            vec![
                "preamble",
                constants::IGNORE_ERRORS_START,
                constants::IGNORE_ERRORS_END,
            ]
        );
    }

    #[test]
    fn test_expected_region_uses_expect_sentinels() {
        let file = make_log("");
        let mut session = session(&file);

        session.start_ignoring_errors(true).unwrap();
        assert!(session.currently_ignoring_errors().unwrap());
        session.stop_ignoring_errors().unwrap();

        let lines = session.log().all_lines().unwrap();
        assert_eq!(
            lines,
            vec![constants::EXPECT_ERRORS_START, constants::EXPECT_ERRORS_END]
        );
    }

    #[test]
    fn test_double_start_is_invariant_violation() {
        let file = make_log("");
        let mut session = session(&file);
        session.start_ignoring_errors(false).unwrap();
        assert!(matches!(
            session.start_ignoring_errors(false),
            Err(SessionError::AlreadyIgnoring)
        ));
    }

    #[test]
    fn test_stop_without_start_is_invariant_violation() {
        let file = make_log("some line\n");
        let mut session = session(&file);
        assert!(matches!(
            session.stop_ignoring_errors(),
            Err(SessionError::NotIgnoring)
        ));
    }

    #[test]
    fn test_unflushed_sentinel_times_out() {
        let file = make_log("");
        let mut session = SuppressionSession::new(GeckoLog::new(file.path()), NullNotifier)
            .with_wait(Duration::from_millis(1), Duration::from_millis(10));
        assert!(matches!(
            session.start_ignoring_errors(false),
            Err(SessionError::SentinelTimeout { .. })
        ));
    }

    /// State is derived from the log, not from the session object: a fresh
    /// session over the same log sees the region opened by the first one.
    #[test]
    fn test_state_survives_session_restart() {
        let file = make_log("");
        let mut first = session(&file);
        first.start_ignoring_errors(false).unwrap();
        drop(first);

        let mut second = session(&file);
        assert!(second.currently_ignoring_errors().unwrap());
        second.stop_ignoring_errors().unwrap();
        assert!(!second.currently_ignoring_errors().unwrap());
    }

    #[test]
    fn test_find_honours_min_line() {
        let file = make_log("needle\nother\n");
        let session = session(&file);
        assert_eq!(
            session.find(&["needle"], 0).unwrap().as_deref(),
            Some("needle")
        );
        assert_eq!(session.find(&["needle"], 1).unwrap(), None);
    }
}
