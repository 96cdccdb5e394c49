//! Run progress reporting.

/// Progress snapshot published once per entry and once at completion.
///
/// Mutated only by the orchestrator; the index is non-decreasing for the
/// duration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// Zero-based index of the entry currently in flight (equals `total`
    /// in the final completion snapshot).
    pub current: usize,

    /// Roster size for this run.
    pub total: usize,

    /// Whole-number percent complete.
    pub percent: u8,

    /// Cleared in the final snapshot.
    pub running: bool,
}

/// Progress callback for batch runs.
pub type ProgressCallback = Box<dyn Fn(BatchProgress) + Send>;

/// Percent complete before processing entry `index` of `total`.
///
/// Floor semantics: reaches 100 only via the forced completion snapshot.
pub fn percent_complete(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (index * 100 / total) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_floors() {
        assert_eq!(percent_complete(0, 3), 0);
        assert_eq!(percent_complete(1, 3), 33);
        assert_eq!(percent_complete(2, 3), 66);
        assert_eq!(percent_complete(3, 3), 100);
    }

    #[test]
    fn percent_stays_below_100_while_entries_remain() {
        for total in 1..200 {
            for index in 0..total {
                assert!(percent_complete(index, total) < 100);
            }
        }
    }
}
