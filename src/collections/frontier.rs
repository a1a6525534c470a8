//! Pending visits of a diffusion job.
//!
//! A frontier holds visit records keyed by node id: a node that is already queued is
//! never queued twice, its paint is merged into the [`PaintTracker`] instead. The two
//! implementations differ only in draining order.

use std::collections::{BTreeMap, HashSet, VecDeque};

use crate::collections::PaintTracker;
use crate::graph::NodeId;

/// A queued visit. Only the node id takes part in frontier identity; any other fields
/// are carried data.
pub trait Visit: Copy {
    /// Node this visit targets.
    fn node(&self) -> NodeId;
}

impl Visit for NodeId {
    #[inline]
    fn node(&self) -> NodeId {
        *self
    }
}

/// Queue of pending visits.
pub trait Frontier<V: Visit>: Default {
    /// Queues `visit` with `paint`, or merges `paint` into the already-queued entry for
    /// the same node (keeping that entry's carried data).
    fn enqueue(&mut self, visit: V, paint: f64, tracker: &mut PaintTracker);

    /// Removes the next visit according to this frontier's draining order.
    fn pop(&mut self) -> Option<V>;

    /// Number of queued visits.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is queued.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First-in first-out frontier with an O(1) membership index.
#[derive(Debug, Clone)]
pub struct FifoFrontier<V> {
    queue: VecDeque<V>,
    queued: HashSet<NodeId>,
}

impl<V> Default for FifoFrontier<V> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            queued: HashSet::new(),
        }
    }
}

impl<V: Visit> Frontier<V> for FifoFrontier<V> {
    fn enqueue(&mut self, visit: V, paint: f64, tracker: &mut PaintTracker) {
        let node = visit.node();
        if self.queued.insert(node) {
            self.queue.push_back(visit);
            tracker.put(node, paint);
        } else {
            tracker.add(node, paint);
        }
    }

    fn pop(&mut self) -> Option<V> {
        let visit = self.queue.pop_front()?;
        self.queued.remove(&visit.node());
        Some(visit)
    }

    #[inline]
    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Frontier that always yields the smallest queued node id, independent of insertion
/// order.
#[derive(Debug, Clone)]
pub struct OrderedFrontier<V> {
    entries: BTreeMap<NodeId, V>,
}

impl<V> Default for OrderedFrontier<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<V: Visit> Frontier<V> for OrderedFrontier<V> {
    fn enqueue(&mut self, visit: V, paint: f64, tracker: &mut PaintTracker) {
        let node = visit.node();
        if self.entries.contains_key(&node) {
            tracker.add(node, paint);
        } else {
            self.entries.insert(node, visit);
            tracker.put(node, paint);
        }
    }

    fn pop(&mut self) -> Option<V> {
        self.entries.pop_first().map(|(_, visit)| visit)
    }

    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }
}
