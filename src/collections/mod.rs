//! Job-local containers: the sparse accumulator, the paint tracker and the frontier.

pub mod frontier;
pub mod paint_tracker;
pub mod sparse_vector;

pub use frontier::{FifoFrontier, Frontier, OrderedFrontier, Visit};
pub use paint_tracker::PaintTracker;
pub use sparse_vector::{Feature, FeatureSpace, SparseVector};
