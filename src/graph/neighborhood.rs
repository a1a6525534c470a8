//! Precomputed forward and reverse neighbor-id arrays.
//!
//! Jobs read these instead of walking the graph's edge rows so that callers can supply
//! arrays built elsewhere (possibly in a different order) and share one copy across
//! every concurrently running job.

use serde::{Deserialize, Serialize};

use crate::error::{BcaError, Result};
use crate::graph::{NodeId, TypedGraph};

/// Which way a job follows edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Follow edges tail to head.
    #[default]
    Forward,
    /// Follow edges head to tail.
    Reverse,
}

/// Forward and reverse neighbor lists, indexed by node.
///
/// A neighbor appears once per connecting edge, so parallel edges show up as repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighborhoods {
    forward: Vec<Vec<NodeId>>,
    reverse: Vec<Vec<NodeId>>,
}

impl Neighborhoods {
    /// Collects both neighbor lists from `graph`, in edge-id order.
    pub fn from_graph(graph: &TypedGraph) -> Self {
        let n = graph.node_count();
        let forward = (0..n).map(|u| graph.out_neighbors(u).collect()).collect();
        let reverse = (0..n).map(|u| graph.in_neighbors(u).collect()).collect();
        Self { forward, reverse }
    }

    /// Accepts caller-built lists after checking them against `graph`.
    ///
    /// Lists may be in any order. Whether every listed pair is backed by an edge is
    /// checked lazily, by the edge resolver, when a job expands the node.
    ///
    /// # Errors
    /// - [`BcaError::InconsistentNeighborhood`] if a list count or a row length disagrees
    ///   with the graph's degrees
    /// - [`BcaError::NodeOutOfRange`] if a listed neighbor is not a vertex
    pub fn from_parts(
        graph: &TypedGraph,
        forward: Vec<Vec<NodeId>>,
        reverse: Vec<Vec<NodeId>>,
    ) -> Result<Self> {
        let n = graph.node_count();
        if forward.len() != n {
            return Err(BcaError::InconsistentNeighborhood {
                node: forward.len().min(n),
                reason: "forward list count differs from node count",
            });
        }
        if reverse.len() != n {
            return Err(BcaError::InconsistentNeighborhood {
                node: reverse.len().min(n),
                reason: "reverse list count differs from node count",
            });
        }
        for u in 0..n {
            if forward[u].len() != graph.out_degree(u) {
                return Err(BcaError::InconsistentNeighborhood {
                    node: u,
                    reason: "forward row length differs from out-degree",
                });
            }
            if reverse[u].len() != graph.in_degree(u) {
                return Err(BcaError::InconsistentNeighborhood {
                    node: u,
                    reason: "reverse row length differs from in-degree",
                });
            }
            for &v in forward[u].iter().chain(&reverse[u]) {
                graph.check_node(v)?;
            }
        }
        Ok(Self { forward, reverse })
    }

    /// Number of nodes covered.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.forward.len()
    }

    /// Out-neighbors of `node`.
    ///
    /// # Panics
    /// Panics if `node >= node_count()`.
    #[inline]
    pub fn forward(&self, node: NodeId) -> &[NodeId] {
        &self.forward[node]
    }

    /// In-neighbors of `node`.
    ///
    /// # Panics
    /// Panics if `node >= node_count()`.
    #[inline]
    pub fn reverse(&self, node: NodeId) -> &[NodeId] {
        &self.reverse[node]
    }

    /// Neighbors of `node` when traversing in `direction`.
    ///
    /// # Panics
    /// Panics if `node >= node_count()`.
    #[inline]
    pub fn neighbors(&self, node: NodeId, direction: Direction) -> &[NodeId] {
        match direction {
            Direction::Forward => self.forward(node),
            Direction::Reverse => self.reverse(node),
        }
    }

    /// Checks that these lists were built for a graph of the same size as `graph`.
    ///
    /// # Errors
    /// [`BcaError::InconsistentNeighborhood`] on a size mismatch.
    pub fn ensure_matches(&self, graph: &TypedGraph) -> Result<()> {
        if self.forward.len() == graph.node_count() && self.reverse.len() == graph.node_count() {
            Ok(())
        } else {
            Err(BcaError::InconsistentNeighborhood {
                node: self.forward.len().min(graph.node_count()),
                reason: "neighbor lists were built for a different graph",
            })
        }
    }
}
