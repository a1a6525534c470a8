//! Bookmark coloring: paint diffusion from a root node.
//!
//! One unit of paint is placed on the bookmark. Each node drained from the frontier
//! keeps `alpha` of its wet paint and, if that paint is at least `epsilon`, forwards
//! the rest across its relations. Every forwarded share is also recorded against the
//! relation's predicate. The result is a [`SparseVector`] over node and predicate
//! features.
//!
//! The control loop lives in [`diffuse`]. The variants only decide which relations a
//! node has, how the forwarded paint is split, how the frontier drains, and how
//! negligible shares are pruned:
//!
//! | Variant | Fan-out | Frontier | Pruning |
//! |---------|---------|----------|---------|
//! | [`VanillaJob`] | uniform over the neighbor row | FIFO | whole node |
//! | [`SemanticJob`] | uniform, literal rows filtered by arriving predicate | FIFO | whole node |
//! | [`StableJob`] | proportional to edge weight | smallest node id first | per edge |
//!
//! Termination: forwarded paint shrinks by at least `1 - alpha` per hop and nothing
//! below `epsilon` is expanded; re-reaching a queued node merges paint into its entry
//! instead of creating work.

use serde::{Deserialize, Serialize};

use crate::collections::{Feature, Frontier, PaintTracker, SparseVector, Visit};
use crate::error::{BcaError, Result};
use crate::graph::{NodeId, PredicateId, TypedGraph};
use crate::macros::{bca_debug, bca_trace};

pub mod memo;
pub mod semantic;
pub mod stable;
pub mod vanilla;

pub use memo::{Memo, MemoTable, NoMemo};
pub use semantic::{SemanticJob, SemanticVisit};
pub use stable::StableJob;
pub use vanilla::VanillaJob;

/// The two tunable numbers of a job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiffusionParams {
    /// Fraction of arriving paint retained at a node, in `(0, 1)`.
    pub alpha: f64,
    /// Paint below this is not expanded further; strictly positive.
    pub epsilon: f64,
}

impl DiffusionParams {
    /// Validated constructor.
    ///
    /// # Errors
    /// See [`DiffusionParams::validate`].
    pub fn new(alpha: f64, epsilon: f64) -> Result<Self> {
        let params = Self { alpha, epsilon };
        params.validate()?;
        Ok(params)
    }

    /// Checks `0 < alpha < 1` and `0 < epsilon < inf`.
    ///
    /// # Errors
    /// [`BcaError::InvalidAlpha`] or [`BcaError::InvalidEpsilon`].
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(BcaError::InvalidAlpha(self.alpha));
        }
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(BcaError::InvalidEpsilon(self.epsilon));
        }
        Ok(())
    }
}

/// How a variant discards negligible shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pruning {
    /// If any share of a node is below `epsilon` the node forwards nothing at all.
    /// Only meaningful for uniform splits, where all shares are equal.
    Bulk,
    /// Each share below `epsilon` is dropped on its own; the others still propagate.
    PerEdge,
}

/// One outgoing relation of a focus node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relation<V> {
    /// Visit record to queue for the neighbor.
    pub visit: V,
    /// Predicate credited with the forwarded share.
    pub predicate: PredicateId,
    /// Fraction of the forwarded paint `(1 - alpha) * w` carried by this relation.
    pub fraction: f64,
}

/// The variant-specific half of a diffusion job.
pub trait Expansion {
    /// Frontier entry; identity is the node id.
    type Visit: Visit;
    /// Draining policy.
    type Frontier: Frontier<Self::Visit>;
    /// Pruning policy.
    const PRUNING: Pruning;

    /// The graph the job runs on.
    fn graph(&self) -> &TypedGraph;

    /// Visit record for the bookmark.
    fn root(&self, bookmark: NodeId) -> Self::Visit;

    /// A finished vector for `node` that replaces its expansion, if one exists.
    fn memo(&self, _node: NodeId) -> Option<&SparseVector> {
        None
    }

    /// Appends the relations `visit` forwards paint along.
    ///
    /// # Errors
    /// Consistency failures while resolving edges.
    fn relations(
        &mut self,
        visit: &Self::Visit,
        out: &mut Vec<Relation<Self::Visit>>,
    ) -> Result<()>;
}

/// Runs the diffusion loop for `bookmark` with the relations supplied by `strategy`.
///
/// # Errors
/// Parameter violations are reported before any work is done; consistency failures
/// abort the job.
pub fn diffuse<E: Expansion>(
    strategy: &mut E,
    bookmark: NodeId,
    params: &DiffusionParams,
) -> Result<SparseVector> {
    params.validate()?;
    let node_count = strategy.graph().node_count();
    if bookmark >= node_count {
        return Err(BcaError::UnknownBookmark {
            bookmark,
            node_count,
        });
    }

    let DiffusionParams { alpha, epsilon } = *params;
    let memo_floor = epsilon * alpha;

    let mut frontier = E::Frontier::default();
    let mut tracker = PaintTracker::new();
    let mut bcv = SparseVector::new(bookmark);
    let mut relations = Vec::new();

    frontier.enqueue(strategy.root(bookmark), 1.0, &mut tracker);

    while let Some(visit) = frontier.pop() {
        let focus = visit.node();
        let wet_paint = tracker.get(focus);

        if let Some(precomputed) = strategy.memo(focus) {
            bcv.merge_scaled(precomputed, wet_paint, memo_floor);
            continue;
        }

        bcv.add(Feature::Node(focus), alpha * wet_paint);

        if wet_paint < epsilon {
            continue;
        }

        relations.clear();
        strategy.relations(&visit, &mut relations)?;
        if relations.is_empty() {
            continue;
        }

        let forwarded = (1.0 - alpha) * wet_paint;
        if E::PRUNING == Pruning::Bulk
            && relations.iter().any(|r| forwarded * r.fraction < epsilon)
        {
            continue;
        }

        bca_trace!(
            "bookmark {} focus {} wet paint {} relations {} queued {}",
            bookmark,
            focus,
            wet_paint,
            relations.len(),
            frontier.len()
        );

        for relation in relations.drain(..) {
            let partial = forwarded * relation.fraction;
            if partial < epsilon {
                continue;
            }
            bcv.add(Feature::Predicate(relation.predicate), partial);
            frontier.enqueue(relation.visit, partial, &mut tracker);
        }
    }

    bca_debug!(
        "bookmark {} finished: {} features, {} nodes touched",
        bookmark,
        bcv.len(),
        tracker.len()
    );
    Ok(bcv)
}
