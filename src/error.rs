//! Error type shared by graph construction, parameter validation and diffusion jobs.

use core::fmt;

/// Errors produced by this crate.
///
/// Two families exist:
/// - *parameter violations* (`InvalidAlpha`, `InvalidEpsilon`, `UnknownBookmark`) are
///   reported before a job performs any work;
/// - *consistency failures* (everything else) signal malformed graph or adjacency input.
///   They are fatal for the job that hits them and never retried.
#[derive(Debug, Clone, PartialEq)]
pub enum BcaError {
    /// Retention factor outside the open interval `(0, 1)`.
    InvalidAlpha(f64),
    /// Cutoff threshold not strictly positive (or not finite).
    InvalidEpsilon(f64),
    /// The bookmark is not a vertex of the graph.
    UnknownBookmark {
        /// Requested root.
        bookmark: usize,
        /// Number of vertices in the graph.
        node_count: usize,
    },
    /// A node id outside `0..node_count` was found in graph or adjacency input.
    NodeOutOfRange {
        /// Offending node id.
        node: usize,
        /// Number of vertices in the graph.
        node_count: usize,
    },
    /// An edge id outside `0..edge_count` was found in an edge cache.
    EdgeOutOfRange {
        /// Offending edge id.
        edge: usize,
        /// Number of edges in the graph.
        edge_count: usize,
    },
    /// An edge weight was negative or not finite.
    InvalidWeight {
        /// Edge carrying the weight.
        edge: usize,
        /// The rejected weight.
        weight: f32,
    },
    /// Edge resolution found no edge connecting `from -> to`.
    MissingEdge {
        /// Source endpoint.
        from: usize,
        /// Target endpoint.
        to: usize,
    },
    /// Precomputed neighbor arrays do not match the graph they are used with.
    InconsistentNeighborhood {
        /// Node whose neighbor list disagrees with the graph.
        node: usize,
        /// What disagreed.
        reason: &'static str,
    },
    /// A memo entry was published twice for the same node.
    MemoAlreadyPublished(usize),
}

impl fmt::Display for BcaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAlpha(alpha) => {
                write!(f, "alpha must lie in (0, 1), got {alpha}")
            }
            Self::InvalidEpsilon(epsilon) => {
                write!(f, "epsilon must be positive and finite, got {epsilon}")
            }
            Self::UnknownBookmark { bookmark, node_count } => {
                write!(f, "bookmark {bookmark} is not a vertex (node_count={node_count})")
            }
            Self::NodeOutOfRange { node, node_count } => {
                write!(f, "node {node} is out of bounds for n={node_count}")
            }
            Self::EdgeOutOfRange { edge, edge_count } => {
                write!(f, "edge {edge} is out of bounds for m={edge_count}")
            }
            Self::InvalidWeight { edge, weight } => {
                write!(f, "edge {edge} has invalid weight {weight}")
            }
            Self::MissingEdge { from, to } => {
                write!(f, "no edge connects {from}->{to} in the supplied edge caches")
            }
            Self::InconsistentNeighborhood { node, reason } => {
                write!(f, "neighborhood of node {node} is inconsistent: {reason}")
            }
            Self::MemoAlreadyPublished(node) => {
                write!(f, "memo entry for node {node} was already published")
            }
        }
    }
}

impl std::error::Error for BcaError {}

/// Convenience alias for results carrying a [`BcaError`].
pub type Result<T> = core::result::Result<T, BcaError>;
