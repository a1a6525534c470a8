//! Edge resolution: recovering the edge id behind an adjacent `(from, to)` pair.

use std::collections::HashMap;

use crate::error::{BcaError, Result};
use crate::graph::{Direction, EdgeId, NodeId, TypedGraph};

/// Returns the edge `from -> to` present in both caches.
///
/// `from_cache` holds the outgoing edge ids of `from` and `to_cache` the incoming edge
/// ids of `to`, both as produced by [`TypedGraph::out_edges`] / [`TypedGraph::in_edges`]
/// (ascending). With parallel edges the lowest matching id in `from_cache` order wins.
///
/// # Errors
/// - [`BcaError::EdgeOutOfRange`] if `from_cache` holds an id that is not an edge
/// - [`BcaError::MissingEdge`] if no cached edge connects the pair
pub fn resolve_edge(
    graph: &TypedGraph,
    from: NodeId,
    to: NodeId,
    from_cache: &[EdgeId],
    to_cache: &[EdgeId],
) -> Result<EdgeId> {
    resolve_nth(graph, from, to, from_cache, to_cache, 0)
}

/// Like [`resolve_edge`] but skips the first `nth` matching edges.
fn resolve_nth(
    graph: &TypedGraph,
    from: NodeId,
    to: NodeId,
    from_cache: &[EdgeId],
    to_cache: &[EdgeId],
    nth: usize,
) -> Result<EdgeId> {
    let edge_count = graph.edge_count();
    let mut seen = 0usize;
    for &edge in from_cache {
        if edge >= edge_count {
            return Err(BcaError::EdgeOutOfRange { edge, edge_count });
        }
        let record = graph.edge(edge);
        if record.source != from || record.target != to {
            continue;
        }
        if to_cache.binary_search(&edge).is_err() {
            continue;
        }
        if seen == nth {
            return Ok(edge);
        }
        seen += 1;
    }
    Err(BcaError::MissingEdge { from, to })
}

/// Resolves whole neighbor rows, one edge per listed neighbor.
///
/// A neighbor listed `k` times (parallel edges) resolves to `k` distinct edges, so each
/// parallel relation is accounted for separately. The occurrence table is scratch space
/// reused across rows.
#[derive(Debug)]
pub struct EdgeResolver<'g> {
    graph: &'g TypedGraph,
    occurrences: HashMap<NodeId, usize>,
}

impl<'g> EdgeResolver<'g> {
    /// Creates a resolver over `graph`.
    pub fn new(graph: &'g TypedGraph) -> Self {
        Self {
            graph,
            occurrences: HashMap::new(),
        }
    }

    /// Appends to `out` the edge connecting `focus` with each entry of `neighbors`.
    ///
    /// For [`Direction::Forward`] each edge is `focus -> neighbor`, for
    /// [`Direction::Reverse`] it is `neighbor -> focus`.
    ///
    /// # Errors
    /// Any error of [`resolve_edge`], and [`BcaError::NodeOutOfRange`] for a listed
    /// neighbor that is not a vertex.
    pub fn resolve_row(
        &mut self,
        focus: NodeId,
        neighbors: &[NodeId],
        direction: Direction,
        out: &mut Vec<EdgeId>,
    ) -> Result<()> {
        let graph = self.graph;
        self.occurrences.clear();
        out.reserve(neighbors.len());
        for &neighbor in neighbors {
            graph.check_node(neighbor)?;
            let slot = self.occurrences.entry(neighbor).or_insert(0);
            let nth = *slot;
            *slot += 1;
            let edge = match direction {
                Direction::Forward => resolve_nth(
                    graph,
                    focus,
                    neighbor,
                    graph.out_edges(focus),
                    graph.in_edges(neighbor),
                    nth,
                )?,
                Direction::Reverse => resolve_nth(
                    graph,
                    neighbor,
                    focus,
                    graph.out_edges(neighbor),
                    graph.in_edges(focus),
                    nth,
                )?,
            };
            out.push(edge);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VertexColor;

    fn graph() -> TypedGraph {
        // e0: 0 -> 1 (p0), e1: 1 -> 2 (p1), e2: 0 -> 1 (p2), e3: 2 -> 0 (p0)
        let mut b = TypedGraph::builder(vec![VertexColor::Entity; 3]);
        b.add_edge(0, 1, 0);
        b.add_edge(1, 2, 1);
        b.add_edge(0, 1, 2);
        b.add_edge(2, 0, 0);
        b.build().unwrap()
    }

    #[test]
    fn test_resolve_edge_finds_connecting_edge() {
        let g = graph();
        assert_eq!(resolve_edge(&g, 1, 2, g.out_edges(1), g.in_edges(2)), Ok(1));
        assert_eq!(resolve_edge(&g, 0, 1, g.out_edges(0), g.in_edges(1)), Ok(0));
    }

    #[test]
    fn test_resolve_edge_respects_orientation() {
        let g = graph();
        assert_eq!(
            resolve_edge(&g, 2, 1, g.out_edges(2), g.in_edges(1)),
            Err(BcaError::MissingEdge { from: 2, to: 1 })
        );
    }

    #[test]
    fn test_resolve_edge_rejects_foreign_cache() {
        let g = graph();
        // Out-edges of 1 never connect 0 -> 1.
        assert!(resolve_edge(&g, 0, 1, g.out_edges(1), g.in_edges(1)).is_err());
        assert_eq!(
            resolve_edge(&g, 0, 1, &[17], g.in_edges(1)),
            Err(BcaError::EdgeOutOfRange { edge: 17, edge_count: 4 })
        );
    }

    #[test]
    fn test_row_resolution_splits_parallel_edges() {
        let g = graph();
        let mut r = EdgeResolver::new(&g);
        let mut out = Vec::new();
        r.resolve_row(0, &[1, 1], Direction::Forward, &mut out).unwrap();
        assert_eq!(out, vec![0, 2]);

        out.clear();
        r.resolve_row(1, &[0, 0], Direction::Reverse, &mut out).unwrap();
        assert_eq!(out, vec![0, 2]);

        out.clear();
        let err = r.resolve_row(0, &[1, 1, 1], Direction::Forward, &mut out).unwrap_err();
        assert_eq!(err, BcaError::MissingEdge { from: 0, to: 1 });
    }
}
