// geckolog - core/region.rs
//
// Suppression-region tracking: a two-state machine per region kind, driven
// by a left-to-right scan over the log lines.
// Core layer: pure logic, no I/O.

use crate::util::constants;

/// The two concurrently-active suppression-region kinds.
///
/// `Ignore` regions suppress matching lines from all error-filtering
/// output. `Expect` regions suppress them only when the caller asks for
/// unexpected errors (`return_expected_as_well = false`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Ignore,
    Expect,
}

impl RegionKind {
    /// The exact sentinel line that opens a region of this kind.
    pub fn start_sentinel(self) -> &'static str {
        match self {
            Self::Ignore => constants::IGNORE_ERRORS_START,
            Self::Expect => constants::EXPECT_ERRORS_START,
        }
    }

    /// The exact sentinel line that closes a region of this kind.
    pub fn end_sentinel(self) -> &'static str {
        match self {
            Self::Ignore => constants::IGNORE_ERRORS_END,
            Self::Expect => constants::EXPECT_ERRORS_END,
        }
    }
}

/// Tracks whether the scan is currently inside a suppression region of one
/// kind.
///
/// States: outside (initial) and inside. The start sentinel transitions to
/// inside, the end sentinel back to outside — and both sentinel lines
/// themselves report as inside, so they are suppressed along with the
/// region body.
///
/// A stray end sentinel (no matching start) or a duplicated start sentinel
/// is not detected: the machine toggles on whatever sentinel it sees next.
#[derive(Debug)]
pub struct RegionTracker {
    kind: RegionKind,
    inside: bool,
}

impl RegionTracker {
    pub fn new(kind: RegionKind) -> Self {
        Self {
            kind,
            inside: false,
        }
    }

    /// Feed one scan line through the state machine and report whether that
    /// line is inside the region (sentinel lines included).
    pub fn update_and_check(&mut self, line: &str) -> bool {
        if line == self.kind.start_sentinel() {
            self.inside = true;
            true
        } else if line == self.kind.end_sentinel() {
            self.inside = false;
            true
        } else {
            self.inside
        }
    }
}
