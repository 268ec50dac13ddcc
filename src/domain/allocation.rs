//! Greedy allocation of a newly created fundable against the open pool of its counterpart kind.
//!
//! The engine is pure: it takes ownership of the incoming entity and the candidate pool,
//! moves capacity between them, and hands back everything that changed. Persisting the
//! result is the caller's job.

use super::funding::Fundable;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Result of one allocation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation<I, C> {
    /// The incoming entity in its final state.
    pub incoming: I,
    /// Candidates that received capacity, in the order they were visited.
    pub touched: Vec<C>,
}

/// Invests `incoming` into `candidates` until it is fully invested or the pool runs out.
///
/// `candidates` must be open and sorted oldest first (see [`super::funding::oldest_first`]).
/// Every entity closed during the pass is stamped with `now`.
pub fn allocate<I, C>(
    mut incoming: I,
    candidates: impl IntoIterator<Item = C>,
    now: DateTime<Utc>,
) -> Allocation<I, C>
where
    I: Fundable,
    C: Fundable,
{
    let mut touched = Vec::new();

    for mut candidate in candidates {
        if incoming.funding().is_fully_invested() {
            break;
        }
        if candidate.funding().is_fully_invested() {
            continue;
        }

        let moved = incoming
            .funding()
            .remaining()
            .min(candidate.funding().remaining());
        incoming.funding_mut().invest(moved, now);
        candidate.funding_mut().invest(moved, now);

        debug!(
            incoming = incoming.id(),
            candidate = candidate.id(),
            moved = %moved.value(),
            candidate_closed = candidate.funding().is_fully_invested(),
            "allocated"
        );
        touched.push(candidate);
    }

    Allocation { incoming, touched }
}
