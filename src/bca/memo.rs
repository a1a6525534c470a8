//! Finished sub-results that the semantic variant merges instead of re-expanding.
//!
//! A memo is read concurrently by many jobs. Writing to it while jobs read it is only
//! sound if an entry becomes visible after it is complete and never changes afterwards.
//! [`MemoTable`] enforces exactly that with one write-once slot per node: `publish`
//! completes an entry atomically, and a second publish for the same node is an error.
//! Plain `HashMap`s are accepted too, but they can only be shared once fully built.

use std::collections::HashMap;
use std::sync::OnceLock;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::bca::{DiffusionParams, SemanticJob};
use crate::collections::SparseVector;
use crate::error::{BcaError, Result};
use crate::graph::{Neighborhoods, NodeId, TypedGraph};
use crate::macros::bca_debug;

/// Read access to precomputed vectors.
pub trait Memo {
    /// The finished vector for `node`, if one is available.
    fn get(&self, node: NodeId) -> Option<&SparseVector>;
}

/// A memo that never has an entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMemo;

impl Memo for NoMemo {
    #[inline]
    fn get(&self, _node: NodeId) -> Option<&SparseVector> {
        None
    }
}

impl Memo for HashMap<NodeId, SparseVector> {
    #[inline]
    fn get(&self, node: NodeId) -> Option<&SparseVector> {
        HashMap::get(self, &node)
    }
}

/// Dense write-once memo, one slot per node.
#[derive(Debug, Default)]
pub struct MemoTable {
    slots: Vec<OnceLock<SparseVector>>,
}

impl MemoTable {
    /// Creates an empty table for `node_count` nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            slots: (0..node_count).map(|_| OnceLock::new()).collect(),
        }
    }

    /// Makes `vector` the finished result for `node`.
    ///
    /// # Errors
    /// - [`BcaError::NodeOutOfRange`] if `node` has no slot
    /// - [`BcaError::MemoAlreadyPublished`] if the slot is already filled
    pub fn publish(&self, node: NodeId, vector: SparseVector) -> Result<()> {
        let slot = self.slots.get(node).ok_or(BcaError::NodeOutOfRange {
            node,
            node_count: self.slots.len(),
        })?;
        slot.set(vector)
            .map_err(|_| BcaError::MemoAlreadyPublished(node))
    }

    /// Returns `true` if `node` has a published entry.
    pub fn contains(&self, node: NodeId) -> bool {
        self.slots.get(node).is_some_and(|s| s.get().is_some())
    }

    /// Number of published entries.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.get().is_some()).count()
    }

    /// Returns `true` if nothing has been published.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Solves `nodes` with the semantic variant against an empty memo and publishes the
    /// results.
    ///
    /// Every entry is finished before the table is returned, so the table can be handed
    /// to dependent jobs without further synchronization.
    ///
    /// # Errors
    /// The first job failure, or [`BcaError::MemoAlreadyPublished`] if `nodes` repeats a
    /// node.
    pub fn precompute(
        graph: &TypedGraph,
        neighborhoods: &Neighborhoods,
        nodes: &[NodeId],
        params: DiffusionParams,
    ) -> Result<Self> {
        let table = Self::new(graph.node_count());
        let solve = |&node: &NodeId| -> Result<()> {
            let vector = SemanticJob::new(graph, neighborhoods, &NoMemo, node, params).run()?;
            table.publish(node, vector)
        };

        #[cfg(feature = "parallel")]
        nodes.par_iter().try_for_each(solve)?;
        #[cfg(not(feature = "parallel"))]
        nodes.iter().try_for_each(solve)?;

        bca_debug!("memo precomputed for {} nodes", nodes.len());
        Ok(table)
    }
}

impl Memo for MemoTable {
    #[inline]
    fn get(&self, node: NodeId) -> Option<&SparseVector> {
        self.slots.get(node).and_then(OnceLock::get)
    }
}

impl<M: Memo + ?Sized> Memo for &M {
    #[inline]
    fn get(&self, node: NodeId) -> Option<&SparseVector> {
        (**self).get(node)
    }
}
