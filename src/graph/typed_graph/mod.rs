//! An immutable, typed, directed multigraph in paired CSR/CSC form.
//!
//! Vertices are colored [`VertexColor::Entity`] or [`VertexColor::Literal`]; every edge
//! carries a predicate id and an optional weight. Parallel edges between the same
//! ordered pair are allowed, which is the normal case for knowledge graphs where two
//! resources are related by several predicates.
//!
//! Memory layout:
//! - `edges`: `Vec<EdgeRecord>` indexed by edge id
//! - `out_offsets` / `out_edge_ids`: CSR rows, edge ids of outgoing edges per vertex
//! - `in_offsets` / `in_edge_ids`: CSC columns, edge ids of incoming edges per vertex
//!
//! Both edge-id rows are filled by a single scan in edge-id order, so every row is
//! sorted ascending. The edge resolver relies on this to binary-search the target side.

use crate::error::{BcaError, Result};

/// Dense vertex handle.
pub type NodeId = usize;
/// Dense edge handle.
pub type EdgeId = usize;
/// Relation label of an edge.
pub type PredicateId = usize;

/// Vertex kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexColor {
    /// A resource that relations start from.
    Entity,
    /// A terminal value; conventionally a sink of the graph.
    Literal,
}

/// One directed, typed edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRecord {
    /// Tail vertex.
    pub source: NodeId,
    /// Head vertex.
    pub target: NodeId,
    /// Relation label.
    pub predicate: PredicateId,
    /// Optional edge weight; absent weights read as `1.0`.
    pub weight: Option<f32>,
}

impl EdgeRecord {
    /// Creates an unweighted edge.
    pub fn new(source: NodeId, target: NodeId, predicate: PredicateId) -> Self {
        Self {
            source,
            target,
            predicate,
            weight: None,
        }
    }

    /// Creates a weighted edge.
    pub fn weighted(source: NodeId, target: NodeId, predicate: PredicateId, weight: f32) -> Self {
        Self {
            source,
            target,
            predicate,
            weight: Some(weight),
        }
    }
}

/// Immutable typed multigraph.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `from_edges` | \(O(n + m)\) | Builds CSR and CSC rows in one pass each |
/// | `out_edges` / `in_edges` | \(O(1)\) | Returns a sorted edge-id slice |
/// | `out_neighbors` / `in_neighbors` | \(O(1)\) | Iterator over the row |
/// | `edge` | \(O(1)\) | Direct index |
#[derive(Debug, Clone)]
pub struct TypedGraph {
    colors: Vec<VertexColor>,
    edges: Vec<EdgeRecord>,
    out_offsets: Vec<usize>,
    out_edge_ids: Vec<EdgeId>,
    in_offsets: Vec<usize>,
    in_edge_ids: Vec<EdgeId>,
    predicate_count: usize,
}

impl TypedGraph {
    /// Starts an incremental builder over the given vertex colors.
    pub fn builder(colors: Vec<VertexColor>) -> GraphBuilder {
        GraphBuilder {
            colors,
            edges: Vec::new(),
        }
    }

    /// Builds the graph from vertex colors and an edge list. Edge ids are list positions.
    ///
    /// # Errors
    /// - [`BcaError::NodeOutOfRange`] if an edge references a vertex `>= colors.len()`
    /// - [`BcaError::InvalidWeight`] if a weight is negative or not finite
    pub fn from_edges(colors: Vec<VertexColor>, edges: Vec<EdgeRecord>) -> Result<Self> {
        let n = colors.len();

        let mut out_degrees = vec![0usize; n];
        let mut in_degrees = vec![0usize; n];
        let mut predicate_count = 0usize;
        for (id, e) in edges.iter().enumerate() {
            for node in [e.source, e.target] {
                if node >= n {
                    return Err(BcaError::NodeOutOfRange { node, node_count: n });
                }
            }
            if let Some(weight) = e.weight {
                if !weight.is_finite() || weight < 0.0 {
                    return Err(BcaError::InvalidWeight { edge: id, weight });
                }
            }
            out_degrees[e.source] += 1;
            in_degrees[e.target] += 1;
            predicate_count = predicate_count.max(e.predicate + 1);
        }

        let out_offsets = prefix_offsets(&out_degrees);
        let in_offsets = prefix_offsets(&in_degrees);

        // Fill rows by position (stable: increasing edge id).
        let m = edges.len();
        let mut out_edge_ids = vec![0usize; m];
        let mut in_edge_ids = vec![0usize; m];
        let mut out_pos = out_offsets[..n].to_vec();
        let mut in_pos = in_offsets[..n].to_vec();
        for (id, e) in edges.iter().enumerate() {
            out_edge_ids[out_pos[e.source]] = id;
            out_pos[e.source] += 1;
            in_edge_ids[in_pos[e.target]] = id;
            in_pos[e.target] += 1;
        }

        Ok(Self {
            colors,
            edges,
            out_offsets,
            out_edge_ids,
            in_offsets,
            in_edge_ids,
            predicate_count,
        })
    }

    /// Number of vertices.
    pub fn node_count(&self) -> usize {
        self.colors.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// One past the largest predicate id in use.
    pub fn predicate_count(&self) -> usize {
        self.predicate_count
    }

    /// Color of `node`.
    ///
    /// # Panics
    /// Panics if `node >= node_count()`; see [`TypedGraph::check_node`].
    pub fn vertex_color(&self, node: NodeId) -> VertexColor {
        assert!(node < self.node_count(), "node {node} out of bounds");
        self.colors[node]
    }

    /// Returns `true` if `node` is a literal.
    ///
    /// # Panics
    /// Panics if `node >= node_count()`.
    #[inline]
    pub fn is_literal(&self, node: NodeId) -> bool {
        self.vertex_color(node) == VertexColor::Literal
    }

    /// The record of `edge`.
    ///
    /// # Panics
    /// Panics if `edge >= edge_count()`.
    #[inline]
    pub fn edge(&self, edge: EdgeId) -> &EdgeRecord {
        assert!(edge < self.edge_count(), "edge {edge} out of bounds");
        &self.edges[edge]
    }

    /// Predicate id of `edge`.
    #[inline]
    pub fn predicate(&self, edge: EdgeId) -> PredicateId {
        self.edge(edge).predicate
    }

    /// Weight of `edge`, with absent weights reading as `1.0`.
    #[inline]
    pub fn weight(&self, edge: EdgeId) -> f64 {
        f64::from(self.edge(edge).weight.unwrap_or(1.0))
    }

    /// Edge ids leaving `node`, ascending.
    ///
    /// # Panics
    /// Panics if `node >= node_count()`.
    pub fn out_edges(&self, node: NodeId) -> &[EdgeId] {
        assert!(node < self.node_count(), "node {node} out of bounds");
        &self.out_edge_ids[self.out_offsets[node]..self.out_offsets[node + 1]]
    }

    /// Edge ids entering `node`, ascending.
    ///
    /// # Panics
    /// Panics if `node >= node_count()`.
    pub fn in_edges(&self, node: NodeId) -> &[EdgeId] {
        assert!(node < self.node_count(), "node {node} out of bounds");
        &self.in_edge_ids[self.in_offsets[node]..self.in_offsets[node + 1]]
    }

    /// Heads of the edges leaving `node`, in edge-id order.
    pub fn out_neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out_edges(node).iter().map(move |&e| self.edges[e].target)
    }

    /// Tails of the edges entering `node`, in edge-id order.
    pub fn in_neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.in_edges(node).iter().map(move |&e| self.edges[e].source)
    }

    /// Out-degree of `node`, counting parallel edges.
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.out_edges(node).len()
    }

    /// In-degree of `node`, counting parallel edges.
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.in_edges(node).len()
    }

    /// Checks `node` against the vertex range.
    ///
    /// # Errors
    /// [`BcaError::NodeOutOfRange`] if `node >= node_count()`.
    #[inline]
    pub fn check_node(&self, node: NodeId) -> Result<()> {
        if node < self.node_count() {
            Ok(())
        } else {
            Err(BcaError::NodeOutOfRange {
                node,
                node_count: self.node_count(),
            })
        }
    }
}

/// Incremental construction of a [`TypedGraph`].
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    colors: Vec<VertexColor>,
    edges: Vec<EdgeRecord>,
}

impl GraphBuilder {
    /// Appends an unweighted edge and returns its id.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, predicate: PredicateId) -> EdgeId {
        self.edges.push(EdgeRecord::new(source, target, predicate));
        self.edges.len() - 1
    }

    /// Appends a weighted edge and returns its id.
    pub fn add_weighted_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        predicate: PredicateId,
        weight: f32,
    ) -> EdgeId {
        self.edges
            .push(EdgeRecord::weighted(source, target, predicate, weight));
        self.edges.len() - 1
    }

    /// Validates and freezes the graph.
    ///
    /// # Errors
    /// See [`TypedGraph::from_edges`].
    pub fn build(self) -> Result<TypedGraph> {
        TypedGraph::from_edges(self.colors, self.edges)
    }
}

fn prefix_offsets(degrees: &[usize]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(degrees.len() + 1);
    offsets.push(0);
    let mut total = 0usize;
    for &deg in degrees {
        total += deg;
        offsets.push(total);
    }
    offsets
}

#[cfg(test)]
mod tests;
