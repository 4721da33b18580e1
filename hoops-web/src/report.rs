//! Error reporting
//!
//! Controllers hand every repository failure to an injected
//! [`ErrorReporter`] after logging it. The default reporter keeps a tally per
//! failure kind, which the health endpoint exposes.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::api::error::{Failure, FailureKind};

/// Collaborator notified of every failed controller action
pub trait ErrorReporter: Send + Sync {
    /// Record one failure
    fn report(&self, failure: &Failure);

    /// Failures seen so far, by kind
    fn counts(&self) -> BTreeMap<FailureKind, u64> {
        BTreeMap::new()
    }
}

/// Default reporter: counts failures and traces them at debug level
#[derive(Debug, Default)]
pub struct TracingReporter {
    tally: [AtomicU64; 4],
}

impl TracingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(kind: FailureKind) -> usize {
        match kind {
            FailureKind::Transport => 0,
            FailureKind::Decoding => 1,
            FailureKind::Rejected => 2,
            FailureKind::Cancelled => 3,
        }
    }
}

impl ErrorReporter for TracingReporter {
    fn report(&self, failure: &Failure) {
        let total = self.tally[Self::slot(failure.kind)].fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(
            operation = %failure.operation,
            entity = failure.entity,
            id = ?failure.id,
            kind = %failure.kind,
            total,
            "Failure reported"
        );
    }

    fn counts(&self) -> BTreeMap<FailureKind, u64> {
        FailureKind::ALL
            .into_iter()
            .map(|kind| (kind, self.tally[Self::slot(kind)].load(Ordering::Relaxed)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::Operation;

    fn failure(kind: FailureKind) -> Failure {
        Failure {
            operation: Operation::List,
            entity: "team",
            id: None,
            kind,
        }
    }

    #[test]
    fn test_tally_per_kind() {
        let reporter = TracingReporter::new();
        reporter.report(&failure(FailureKind::Transport));
        reporter.report(&failure(FailureKind::Transport));
        reporter.report(&failure(FailureKind::Decoding));

        let counts = reporter.counts();
        assert_eq!(counts[&FailureKind::Transport], 2);
        assert_eq!(counts[&FailureKind::Decoding], 1);
        assert_eq!(counts[&FailureKind::Rejected], 0);
        assert_eq!(counts.len(), 4);
    }
}
