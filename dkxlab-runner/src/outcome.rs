//! Typed per-symbol outcomes and the run summary.
//!
//! Every symbol that enters a worker leaves it as exactly one
//! `SymbolOutcome`; failures are data, not control flow, so one symbol can
//! never take down its shard.

/// Why a symbol was skipped without evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer bars than the configured minimum — treated as newly listed.
    InsufficientHistory { got: usize },
}

/// What happened to one symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeStatus {
    /// The cross-up rule fired on the latest bar.
    CrossUp,
    /// Evaluated, no signal.
    NoSignal,
    /// Not evaluated.
    Skipped(SkipReason),
    /// Fetch or parse failure, contained at the worker boundary.
    Failed(String),
}

/// One symbol's screen result.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolOutcome {
    pub symbol: String,
    pub status: OutcomeStatus,
}

impl SymbolOutcome {
    pub fn new(symbol: impl Into<String>, status: OutcomeStatus) -> Self {
        Self {
            symbol: symbol.into(),
            status,
        }
    }
}

/// Aggregate result of a full screen run.
#[derive(Debug, Clone, Default)]
pub struct ScreenSummary {
    pub total: usize,
    /// Symbols that fired, in processing order.
    pub crossed: Vec<String>,
    pub no_signal: usize,
    pub skipped: usize,
    pub failed: usize,
    /// (symbol, error detail) for every failure.
    pub errors: Vec<(String, String)>,
}

impl ScreenSummary {
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = SymbolOutcome>) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            summary.total += 1;
            match outcome.status {
                OutcomeStatus::CrossUp => summary.crossed.push(outcome.symbol),
                OutcomeStatus::NoSignal => summary.no_signal += 1,
                OutcomeStatus::Skipped(_) => summary.skipped += 1,
                OutcomeStatus::Failed(detail) => {
                    summary.failed += 1;
                    summary.errors.push((outcome.symbol, detail));
                }
            }
        }
        summary
    }

    /// True when no symbol failed (skips are not failures).
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_partitions_outcomes() {
        let outcomes = vec![
            SymbolOutcome::new("000001", OutcomeStatus::CrossUp),
            SymbolOutcome::new("000002", OutcomeStatus::NoSignal),
            SymbolOutcome::new(
                "000003",
                OutcomeStatus::Skipped(SkipReason::InsufficientHistory { got: 42 }),
            ),
            SymbolOutcome::new("000004", OutcomeStatus::Failed("HTTP 500".into())),
            SymbolOutcome::new("000005", OutcomeStatus::CrossUp),
        ];

        let summary = ScreenSummary::from_outcomes(outcomes);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.crossed, vec!["000001", "000005"]);
        assert_eq!(summary.no_signal, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.errors, vec![("000004".into(), "HTTP 500".into())]);
        assert!(!summary.all_succeeded());
    }

    #[test]
    fn empty_run_is_clean() {
        let summary = ScreenSummary::from_outcomes(Vec::new());
        assert_eq!(summary.total, 0);
        assert!(summary.all_succeeded());
    }
}
