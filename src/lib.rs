//! # `bca` - Bookmark Coloring over Typed Graphs
//!
//! Computes, for each node of a directed typed graph, a sparse feature vector
//! describing its neighborhood. One unit of paint is placed on the node (the
//! *bookmark*) and diffused: every node reached keeps a fraction `alpha` of the paint
//! arriving at it and forwards the rest along its relations until the amounts fall
//! below `epsilon`. Retained paint is recorded per node, forwarded paint per predicate.
//! The vectors are meant to be stacked into a co-occurrence matrix for GloVe-style
//! factorization.
//!
//! ## Architecture
//!
//! 1. **Graph side** ([`graph`]), shared read-only by every job:
//!    - [`TypedGraph`]: immutable multigraph with vertex colors, predicates and weights
//!    - [`Neighborhoods`]: precomputed forward/reverse neighbor arrays
//!    - [`EdgeResolver`]: recovers the edge behind an adjacent node pair
//!
//! 2. **Job side** ([`collections`]), owned by exactly one job:
//!    - [`SparseVector`]: the result accumulator, keyed by [`Feature`]
//!    - [`PaintTracker`]: outstanding paint per node
//!    - [`Frontier`]: pending visits, FIFO or smallest-id-first
//!
//! 3. **Diffusion** ([`bca`]): one control loop ([`bca::diffuse`]) and three strategies:
//!    [`VanillaJob`], [`SemanticJob`] and [`StableJob`].
//!
//! 4. **Batch** ([`batch`]): runs one job per node (in parallel with the `parallel`
//!    feature) and stacks the results into a [`CooccurrenceMatrix`].
//!
//! ## Guarantees
//!
//! - **Determinism**: no sampling; a job's result depends only on the graph, the
//!   neighbor arrays and its parameters. The stable variant additionally drains nodes
//!   in ascending id order.
//! - **Conservation**: retained node paint sums to at most `1`.
//! - **Termination**: forwarded paint shrinks geometrically and nothing below
//!   `epsilon` is expanded.
//! - **Isolation**: a failing job reports its own [`BcaError`] and touches no shared
//!   state.
//!
//! ## Example
//!
//! ```rust
//! use bca::{Direction, DiffusionParams, Feature, Neighborhoods, TypedGraph, VanillaJob, VertexColor};
//!
//! let mut builder = TypedGraph::builder(vec![VertexColor::Entity; 3]);
//! builder.add_edge(0, 1, 0);
//! builder.add_edge(0, 2, 1);
//! let graph = builder.build().unwrap();
//! let neighborhoods = Neighborhoods::from_graph(&graph);
//!
//! let params = DiffusionParams::new(0.25, 0.1).unwrap();
//! let vector = VanillaJob::new(&graph, &neighborhoods, 0, Direction::Forward, params)
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(vector.get(Feature::Node(0)), 0.25);
//! assert_eq!(vector.get(Feature::Predicate(0)), 0.375);
//! assert_eq!(vector.get(Feature::Node(1)), 0.09375);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

mod macros;

pub mod batch;
pub mod bca;
pub mod collections;
pub mod config;
pub mod error;
pub mod graph;

pub use batch::{CooccurrenceMatrix, Embedder};
pub use bca::{DiffusionParams, Memo, MemoTable, NoMemo, SemanticJob, StableJob, VanillaJob};
pub use collections::{Feature, FeatureSpace, Frontier, PaintTracker, SparseVector};
pub use config::{BcaConfig, Variant};
pub use error::BcaError;
pub use graph::{Direction, EdgeResolver, Neighborhoods, TypedGraph, VertexColor};
