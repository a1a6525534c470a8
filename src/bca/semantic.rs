//! Relation-aware diffusion.
//!
//! Entities forward paint along their out-edges like the vanilla variant. Literals are
//! sinks, so they forward along their in-edges instead, but only along edges carrying
//! the predicate the literal was reached by: two resources sharing a value through the
//! same relation are related, two resources sharing it through different relations
//! are not. A visit never goes straight back to the node it came from.
//!
//! Nodes with an entry in the memo are not expanded; their finished vector, scaled by
//! the arriving paint, is merged instead.

use crate::bca::{diffuse, DiffusionParams, Expansion, Memo, Pruning, Relation};
use crate::collections::{FifoFrontier, SparseVector, Visit};
use crate::error::Result;
use crate::graph::{Direction, EdgeId, EdgeResolver, Neighborhoods, NodeId, PredicateId, TypedGraph};
use crate::macros::bca_debug;

/// Frontier entry of the semantic variant.
///
/// Only `node` is identity; `predicate` and `previous` describe how the first queued
/// visit arrived and are kept when later paint is merged into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemanticVisit {
    /// Node to expand.
    pub node: NodeId,
    /// Predicate of the edge used to arrive; `None` for the bookmark.
    pub predicate: Option<PredicateId>,
    /// Node the visit came from; `None` for the bookmark.
    pub previous: Option<NodeId>,
}

impl Visit for SemanticVisit {
    #[inline]
    fn node(&self) -> NodeId {
        self.node
    }
}

/// Diffusion job that respects predicates around literal nodes.
#[derive(Debug)]
pub struct SemanticJob<'a, M: ?Sized> {
    graph: &'a TypedGraph,
    neighborhoods: &'a Neighborhoods,
    memo: &'a M,
    bookmark: NodeId,
    params: DiffusionParams,
    resolver: EdgeResolver<'a>,
    edges: Vec<EdgeId>,
}

impl<'a, M: Memo + ?Sized> SemanticJob<'a, M> {
    /// Prepares a job rooted at `bookmark` that consults `memo`.
    ///
    /// `memo` must not change while the job runs.
    pub fn new(
        graph: &'a TypedGraph,
        neighborhoods: &'a Neighborhoods,
        memo: &'a M,
        bookmark: NodeId,
        params: DiffusionParams,
    ) -> Self {
        Self {
            graph,
            neighborhoods,
            memo,
            bookmark,
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
        bca_debug!("semantic job for bookmark {}", self.bookmark);
        let (bookmark, params) = (self.bookmark, self.params);
        diffuse(&mut self, bookmark, &params)
    }
}

impl<M: Memo + ?Sized> Expansion for SemanticJob<'_, M> {
    type Visit = SemanticVisit;
    type Frontier = FifoFrontier<SemanticVisit>;
    const PRUNING: Pruning = Pruning::Bulk;

    fn graph(&self) -> &TypedGraph {
        self.graph
    }

    fn root(&self, bookmark: NodeId) -> SemanticVisit {
        SemanticVisit {
            node: bookmark,
            predicate: None,
            previous: None,
        }
    }

    fn memo(&self, node: NodeId) -> Option<&SparseVector> {
        self.memo.get(node)
    }

    fn relations(
        &mut self,
        visit: &SemanticVisit,
        out: &mut Vec<Relation<SemanticVisit>>,
    ) -> Result<()> {
        let focus = visit.node;
        let literal = self.graph.is_literal(focus);
        let direction = if literal {
            Direction::Reverse
        } else {
            Direction::Forward
        };
        let neighbors = self.neighborhoods.neighbors(focus, direction);
        if neighbors.is_empty() {
            return Ok(());
        }

        self.edges.clear();
        self.resolver
            .resolve_row(focus, neighbors, direction, &mut self.edges)?;

        let graph = self.graph;
        let arrived_by = visit.predicate;
        let follows = |edge: EdgeId| -> bool {
            !literal || arrived_by.map_or(true, |p| graph.predicate(edge) == p)
        };

        // Neighbors behind a different predicate do not count towards the split.
        let neighbor_count = self.edges.iter().filter(|&&e| follows(e)).count();
        if neighbor_count == 0 {
            return Ok(());
        }
        let fraction = 1.0 / neighbor_count as f64;

        for (&neighbor, &edge) in neighbors.iter().zip(&self.edges) {
            if !follows(edge) || visit.previous == Some(neighbor) {
                continue;
            }
            let predicate = graph.predicate(edge);
            out.push(Relation {
                visit: SemanticVisit {
                    node: neighbor,
                    predicate: Some(predicate),
                    previous: Some(focus),
                },
                predicate,
                fraction,
            });
        }
        Ok(())
    }
}
