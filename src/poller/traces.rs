//! Trace list reconciliation.

use crate::client::TraceSummary;
use std::collections::HashSet;

/// Difference between the previously retained trace list and a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraceDelta {
    /// Traces in the fresh list
    pub total: usize,
    /// Traces whose id was not in the previous list (all, if none retained)
    pub added: usize,
    /// Previous traces no longer present
    pub dropped: usize,
}

/// Compare trace ids of `previous` and `next`. Records without an id count
/// as added.
pub fn reconcile(previous: Option<&TraceSummary>, next: &TraceSummary) -> TraceDelta {
    let known: HashSet<&str> = previous
        .map(|p| p.traces.iter().filter_map(|t| t.trace_id.as_deref()).collect())
        .unwrap_or_default();
    let fresh: HashSet<&str> = next
        .traces
        .iter()
        .filter_map(|t| t.trace_id.as_deref())
        .collect();

    let added = next
        .traces
        .iter()
        .filter(|t| t.trace_id.as_deref().is_none_or(|id| !known.contains(id)))
        .count();
    let dropped = known.difference(&fresh).count();

    TraceDelta {
        total: next.len(),
        added,
        dropped,
    }
}
