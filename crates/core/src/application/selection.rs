//! Shortest-queue selection
//!
//! Each cycle the producer scans every queue's advisory length, keeps the
//! set of queues tied at the minimum, and picks one of them uniformly at
//! random. Ties are the common case (every queue starts empty), so picking
//! the first-seen minimum would starve later queues.

use crate::domain::{BoundedQueue, QueueGroup};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;
use tracing::trace;

/// All queues currently observed at the minimum length, in group order
///
/// Lengths are read one queue at a time while consumers keep draining, so
/// the result is best-effort rather than an exact snapshot.
pub fn shortest_tie_set(group: &QueueGroup) -> Vec<&Arc<BoundedQueue>> {
    let mut shortest = usize::MAX;
    let mut ties = Vec::with_capacity(group.len());

    for queue in group.iter() {
        let len = queue.len();
        if len < shortest {
            shortest = len;
            ties.clear();
            ties.push(queue);
        } else if len == shortest {
            ties.push(queue);
        }
    }

    trace!(shortest, ties = ties.len(), "Scanned queue lengths");
    ties
}

/// Pick one of the shortest queues uniformly at random
///
/// Returns `None` only for an empty group, which `QueueGroup` never allows.
pub fn select_shortest<'a, R: Rng + ?Sized>(
    group: &'a QueueGroup,
    rng: &mut R,
) -> Option<&'a Arc<BoundedQueue>> {
    shortest_tie_set(group).choose(rng).copied()
}
