//! The read-only graph side of a diffusion job.
//!
//! - `typed_graph`: the immutable typed multigraph (vertex colors, predicates, weights)
//! - `neighborhood`: precomputed forward/reverse neighbor arrays shared by all jobs
//! - `resolver`: recovery of edge ids from adjacent node pairs

pub mod neighborhood;
pub mod resolver;
pub mod typed_graph;

pub use neighborhood::{Direction, Neighborhoods};
pub use resolver::{resolve_edge, EdgeResolver};
pub use typed_graph::{
    EdgeId, EdgeRecord, GraphBuilder, NodeId, PredicateId, TypedGraph, VertexColor,
};
