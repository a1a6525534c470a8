//! Outstanding ("wet") paint per node, owned by a single job.

use std::collections::HashMap;

use crate::graph::NodeId;

/// Mapping `node -> wet paint` for the nodes a job has touched.
///
/// Entries are created on first visit and overwritten or topped up afterwards; they
/// are never removed while the job runs.
#[derive(Debug, Default, Clone)]
pub struct PaintTracker {
    paint: HashMap<NodeId, f64>,
}

impl PaintTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wet paint of `node`, replacing what was there.
    #[inline]
    pub fn put(&mut self, node: NodeId, paint: f64) {
        self.paint.insert(node, paint);
    }

    /// Adds `paint` to `node`.
    #[inline]
    pub fn add(&mut self, node: NodeId, paint: f64) {
        *self.paint.entry(node).or_insert(0.0) += paint;
    }

    /// Wet paint currently assigned to `node`.
    #[inline]
    pub fn get(&self, node: NodeId) -> f64 {
        self.paint.get(&node).copied().unwrap_or(0.0)
    }

    /// Number of nodes touched so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.paint.len()
    }

    /// Returns `true` if no node has been touched.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paint.is_empty()
    }
}
