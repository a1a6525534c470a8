//! Weighted diffusion with ordered draining and per-edge pruning.
//!
//! Meant to feed co-occurrence factorization: shares follow edge weights, the frontier
//! drains by ascending node id so the processing order never depends on arrival order,
//! and each share below `epsilon` is dropped on its own instead of pruning the whole
//! node.

use crate::bca::{diffuse, DiffusionParams, Expansion, Pruning, Relation};
use crate::collections::{OrderedFrontier, SparseVector};
use crate::error::Result;
use crate::graph::{Direction, EdgeId, EdgeResolver, Neighborhoods, NodeId, TypedGraph};
use crate::macros::bca_debug;

/// Diffusion job whose shares are proportional to edge weight.
#[derive(Debug)]
pub struct StableJob<'a> {
    graph: &'a TypedGraph,
    neighborhoods: &'a Neighborhoods,
    bookmark: NodeId,
    direction: Direction,
    params: DiffusionParams,
    resolver: EdgeResolver<'a>,
    edges: Vec<EdgeId>,
}

impl<'a> StableJob<'a> {
    /// Prepares a job rooted at `bookmark`.
    pub fn new(
        graph: &'a TypedGraph,
        neighborhoods: &'a Neighborhoods,
        bookmark: NodeId,
        direction: Direction,
        params: DiffusionParams,
    ) -> Self {
        Self {
            graph,
            neighborhoods,
            bookmark,
            direction,
            params,
            resolver: EdgeResolver::new(graph),
            edges: Vec::new(),
        }
    }

    /// Runs the job to completion.
    ///
    /// # Errors
    /// Parameter violations or consistency failures; see [`diffuse`].
    pub fn run(mut self) -> Result<SparseVector> {
        self.neighborhoods.ensure_matches(self.graph)?;
        bca_debug!("stable job for bookmark {} ({:?})", self.bookmark, self.direction);
        let (bookmark, params) = (self.bookmark, self.params);
        diffuse(&mut self, bookmark, &params)
    }
}

impl Expansion for StableJob<'_> {
    type Visit = NodeId;
    type Frontier = OrderedFrontier<NodeId>;
    const PRUNING: Pruning = Pruning::PerEdge;

    fn graph(&self) -> &TypedGraph {
        self.graph
    }

    fn root(&self, bookmark: NodeId) -> NodeId {
        bookmark
    }

    fn relations(&mut self, focus: &NodeId, out: &mut Vec<Relation<NodeId>>) -> Result<()> {
        let focus = *focus;
        let neighbors = self.neighborhoods.neighbors(focus, self.direction);
        if neighbors.is_empty() {
            return Ok(());
        }

        self.edges.clear();
        self.resolver
            .resolve_row(focus, neighbors, self.direction, &mut self.edges)?;

        let total_weight: f64 = self.edges.iter().map(|&e| self.graph.weight(e)).sum();
        // All-zero weights leave nothing to split.
        if total_weight <= 0.0 {
            return Ok(());
        }

        out.extend(
            neighbors
                .iter()
                .zip(&self.edges)
                .map(|(&neighbor, &edge)| Relation {
                    visit: neighbor,
                    predicate: self.graph.predicate(edge),
                    fraction: self.graph.weight(edge) / total_weight,
                }),
        );
        Ok(())
    }
}
