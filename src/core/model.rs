// geckolog - core/model.rs
//
// Shared vocabulary types for the classification pipeline.
// Pure data definitions with no I/O.

/// Options controlling which suppression regions are honoured during
/// error filtering.
///
/// Both flags widen the result set when true: `return_ignored_as_well`
/// disables "ignore" region suppression, `return_expected_as_well`
/// disables "expect" region suppression. The defaults (false / true)
/// reproduce the normal test-harness view: ignored lines hidden, expected
/// lines shown.
#[derive(Debug, Clone, Copy)]
pub struct FilterOptions {
    /// When false (default), lines inside an "ignore" region — sentinel
    /// lines included — are excluded from the result.
    pub return_ignored_as_well: bool,

    /// When false, lines inside an "expect" region are additionally
    /// excluded. Defaults to true.
    pub return_expected_as_well: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            return_ignored_as_well: false,
            return_expected_as_well: true,
        }
    }
}

impl FilterOptions {
    /// The "anything unexpected is a failure" view used by the log-check
    /// CLI: both region kinds suppress.
    pub fn unexpected_only() -> Self {
        Self {
            return_ignored_as_well: false,
            return_expected_as_well: false,
        }
    }
}
