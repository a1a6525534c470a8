//! Uniform fan-out diffusion.

use crate::bca::{diffuse, DiffusionParams, Expansion, Pruning, Relation};
use crate::collections::{FifoFrontier, SparseVector};
use crate::error::Result;
use crate::graph::{Direction, EdgeId, EdgeResolver, Neighborhoods, NodeId, TypedGraph};
use crate::macros::bca_debug;

/// Diffusion job that splits forwarded paint evenly over a node's full neighbor row.
///
/// In [`Direction::Reverse`] the in-neighbor row is used and edges are resolved as
/// `neighbor -> focus`.
#[derive(Debug)]
pub struct VanillaJob<'a> {
    graph: &'a TypedGraph,
    neighborhoods: &'a Neighborhoods,
    bookmark: NodeId,
    direction: Direction,
    params: DiffusionParams,
    resolver: EdgeResolver<'a>,
    edges: Vec<EdgeId>,
}

impl<'a> VanillaJob<'a> {
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
        bca_debug!("vanilla job for bookmark {} ({:?})", self.bookmark, self.direction);
        let (bookmark, params) = (self.bookmark, self.params);
        diffuse(&mut self, bookmark, &params)
    }
}

impl Expansion for VanillaJob<'_> {
    type Visit = NodeId;
    type Frontier = FifoFrontier<NodeId>;
    const PRUNING: Pruning = Pruning::Bulk;

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

        let fraction = 1.0 / neighbors.len() as f64;
        out.extend(
            neighbors
                .iter()
                .zip(&self.edges)
                .map(|(&neighbor, &edge)| Relation {
                    visit: neighbor,
                    predicate: self.graph.predicate(edge),
                    fraction,
                }),
        );
        // Queue order must not depend on how the row was listed.
        out.sort_unstable_by_key(|r| (r.visit, r.predicate));
        Ok(())
    }
}
