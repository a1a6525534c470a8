//! Running one job per node and assembling the results.
//!
//! Jobs share the graph, the neighbor arrays and (for the semantic variant) a frozen
//! [`MemoTable`] by reference; everything mutable is owned by the job. With the
//! `parallel` feature the jobs are spread over the rayon pool.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::bca::{MemoTable, NoMemo, SemanticJob, StableJob, VanillaJob};
use crate::collections::{FeatureSpace, SparseVector};
use crate::config::{BcaConfig, Variant};
use crate::error::Result;
use crate::graph::{Neighborhoods, NodeId, TypedGraph};
use crate::macros::bca_debug;

pub mod matrix;

pub use matrix::{Cell, CooccurrenceMatrix};

/// Per-node scheduler.
#[derive(Debug, Clone, Copy)]
pub struct Embedder<'a> {
    graph: &'a TypedGraph,
    neighborhoods: &'a Neighborhoods,
    config: BcaConfig,
    memo: Option<&'a MemoTable>,
}

impl<'a> Embedder<'a> {
    /// Creates a scheduler over shared, read-only inputs.
    pub fn new(graph: &'a TypedGraph, neighborhoods: &'a Neighborhoods, config: BcaConfig) -> Self {
        Self {
            graph,
            neighborhoods,
            config,
            memo: None,
        }
    }

    /// Lets semantic jobs reuse the finished entries of `memo`.
    ///
    /// Build the table (e.g. with [`MemoTable::precompute`]) before handing it over;
    /// entries published while jobs run are picked up by whichever jobs look later.
    #[must_use]
    pub fn with_memo(mut self, memo: &'a MemoTable) -> Self {
        self.memo = Some(memo);
        self
    }

    /// The column layout of the produced matrix.
    pub fn feature_space(&self) -> FeatureSpace {
        FeatureSpace::new(self.graph.node_count(), self.graph.predicate_count())
    }

    /// Runs the configured variant for one bookmark.
    ///
    /// # Errors
    /// Parameter violations or consistency failures of that job.
    pub fn embed(&self, bookmark: NodeId) -> Result<SparseVector> {
        let params = self.config.params()?;
        let (graph, neighborhoods) = (self.graph, self.neighborhoods);
        match self.config.variant {
            Variant::Vanilla => {
                VanillaJob::new(graph, neighborhoods, bookmark, self.config.direction, params)
                    .run()
            }
            Variant::Stable => {
                StableJob::new(graph, neighborhoods, bookmark, self.config.direction, params)
                    .run()
            }
            Variant::Semantic => match self.memo {
                Some(memo) => SemanticJob::new(graph, neighborhoods, memo, bookmark, params).run(),
                None => SemanticJob::new(graph, neighborhoods, &NoMemo, bookmark, params).run(),
            },
        }
    }

    /// Embeds every node of the graph.
    ///
    /// # Errors
    /// See [`Embedder::run_nodes`].
    pub fn run(&self) -> Result<CooccurrenceMatrix> {
        let nodes: Vec<NodeId> = (0..self.graph.node_count()).collect();
        self.run_nodes(&nodes)
    }

    /// Embeds `nodes` and stacks the vectors into a matrix.
    ///
    /// A failing job does not disturb the others; the first failure is returned.
    ///
    /// # Errors
    /// Invalid configuration, or the error of a failing job.
    pub fn run_nodes(&self, nodes: &[NodeId]) -> Result<CooccurrenceMatrix> {
        self.config.validate()?;

        #[cfg(feature = "parallel")]
        let vectors: Vec<SparseVector> = nodes
            .par_iter()
            .map(|&node| self.embed(node))
            .collect::<Result<_>>()?;
        #[cfg(not(feature = "parallel"))]
        let vectors: Vec<SparseVector> = nodes
            .iter()
            .map(|&node| self.embed(node))
            .collect::<Result<_>>()?;

        let matrix = CooccurrenceMatrix::from_vectors(self.feature_space(), &vectors);
        bca_debug!(
            "{:?} embedding of {} nodes: {} non-zeros over {} features",
            self.config.variant,
            nodes.len(),
            matrix.nnz(),
            matrix.feature_count()
        );
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests;
