use aptly_core::stats::SessionTotals;

/// External percentile/achievement calculator.
///
/// The actual ranking rules ship with the platform's content team and are
/// injected by the application shell; this crate only defines the seam and
/// treats the implementation as a pure function of the reconciled totals.
pub trait MotivationCalculator: Send + Sync {
    /// Motivational copy for a finished session, e.g. a percentile label.
    ///
    /// Returns `None` when the calculator has nothing to say for these
    /// totals; the view simply omits the copy.
    fn percentile_label(&self, totals: &SessionTotals) -> Option<String>;
}
