//! The per-job sparse accumulator and the flat feature layout used by aggregators.

use std::collections::HashMap;

use crate::graph::{NodeId, PredicateId};

/// A feature index.
///
/// Node retention and relation usage live in disjoint key spaces, so a node id can
/// never collide with a predicate id even when the integers coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    /// Paint retained at a vertex.
    Node(NodeId),
    /// Paint forwarded along an edge with this predicate.
    Predicate(PredicateId),
}

/// Sparse mapping `Feature -> f64` built by one diffusion job.
///
/// Absent keys read as `0.0`. Merging is summation, so the result does not depend on
/// the order in which contributions arrive (up to floating-point rounding).
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    bookmark: NodeId,
    weights: HashMap<Feature, f64>,
}

impl SparseVector {
    /// Creates an empty accumulator for `bookmark`.
    pub fn new(bookmark: NodeId) -> Self {
        Self {
            bookmark,
            weights: HashMap::new(),
        }
    }

    /// The root this vector describes.
    #[inline]
    pub fn bookmark(&self) -> NodeId {
        self.bookmark
    }

    /// Adds `weight` to `feature`.
    #[inline]
    pub fn add(&mut self, feature: Feature, weight: f64) {
        *self.weights.entry(feature).or_insert(0.0) += weight;
    }

    /// Current weight of `feature`, `0.0` if absent.
    #[inline]
    pub fn get(&self, feature: Feature) -> f64 {
        self.weights.get(&feature).copied().unwrap_or(0.0)
    }

    /// Sums every entry of `other` into `self`.
    pub fn merge(&mut self, other: &SparseVector) {
        for (&feature, &weight) in &other.weights {
            self.add(feature, weight);
        }
    }

    /// Sums `other * scale` into `self`, dropping scaled entries below `floor`.
    pub fn merge_scaled(&mut self, other: &SparseVector, scale: f64, floor: f64) {
        for (&feature, &weight) in &other.weights {
            let scaled = weight * scale;
            if scaled >= floor {
                self.add(feature, scaled);
            }
        }
    }

    /// Number of stored features.
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns `true` if nothing was accumulated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Iterates entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        self.weights.iter().map(|(&f, &w)| (f, w))
    }

    /// Entries sorted by feature: node features first, then predicate features.
    pub fn to_sorted_vec(&self) -> Vec<(Feature, f64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by_key(|&(f, _)| f);
        entries
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Sum of node-retention weights.
    pub fn node_mass(&self) -> f64 {
        self.iter()
            .filter(|(f, _)| matches!(f, Feature::Node(_)))
            .map(|(_, w)| w)
            .sum()
    }

    /// Sum of relation-usage weights.
    pub fn predicate_mass(&self) -> f64 {
        self.iter()
            .filter(|(f, _)| matches!(f, Feature::Predicate(_)))
            .map(|(_, w)| w)
            .sum()
    }
}

/// Flattens [`Feature`]s into dense column indices.
///
/// Nodes occupy `[0, node_count)`, predicates `[node_count, node_count + predicate_count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSpace {
    node_count: usize,
    predicate_count: usize,
}

impl FeatureSpace {
    /// Creates a layout for the given vertex and predicate ranges.
    pub fn new(node_count: usize, predicate_count: usize) -> Self {
        Self {
            node_count,
            predicate_count,
        }
    }

    /// Total number of columns.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.node_count + self.predicate_count
    }

    /// Column of `feature`, or `None` if it lies outside this layout.
    #[inline]
    pub fn index(&self, feature: Feature) -> Option<usize> {
        match feature {
            Feature::Node(n) if n < self.node_count => Some(n),
            Feature::Predicate(p) if p < self.predicate_count => Some(self.node_count + p),
            _ => None,
        }
    }

    /// Inverse of [`FeatureSpace::index`].
    #[inline]
    pub fn feature(&self, column: usize) -> Option<Feature> {
        if column < self.node_count {
            Some(Feature::Node(column))
        } else if column < self.dimension() {
            Some(Feature::Predicate(column - self.node_count))
        } else {
            None
        }
    }
}
