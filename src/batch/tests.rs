//! Tests for the scheduler and the co-occurrence matrix.

use super::*;
use crate::collections::Feature;
use crate::error::BcaError;
use crate::graph::{Direction, VertexColor};

/// A(0) -P1-> B(1), A -P2-> C(2).
fn fork() -> TypedGraph {
    let mut b = TypedGraph::builder(vec![VertexColor::Entity; 3]);
    b.add_edge(0, 1, 1);
    b.add_edge(0, 2, 2);
    b.build().unwrap()
}

fn config(variant: Variant) -> BcaConfig {
    BcaConfig {
        variant,
        direction: Direction::Forward,
        alpha: 0.25,
        epsilon: 0.1,
    }
}

#[test]
fn test_matrix_rows_follow_feature_space() {
    let g = fork();
    let nb = Neighborhoods::from_graph(&g);
    let m = Embedder::new(&g, &nb, config(Variant::Vanilla)).run().unwrap();

    // 3 nodes + predicates 0..=2.
    assert_eq!(m.feature_count(), 6);
    assert_eq!(m.rows().collect::<Vec<_>>(), vec![0, 1, 2]);

    let row0: Vec<(usize, f64)> = m.row(0).iter().map(|c| (c.column, c.value)).collect();
    assert_eq!(
        row0,
        vec![(0, 0.25), (1, 0.09375), (2, 0.09375), (4, 0.375), (5, 0.375)]
    );
    assert_eq!(m.row(1).len(), 1);
    assert_eq!(m.get(2, 2), 0.25);
    assert_eq!(m.get(2, 0), 0.0);
    assert_eq!(m.nnz(), 7);
    assert_eq!(m.max_value(), 0.375);
}

#[test]
fn test_embed_dispatches_on_variant() {
    let g = fork();
    let nb = Neighborhoods::from_graph(&g);
    for variant in [Variant::Vanilla, Variant::Semantic, Variant::Stable] {
        let v = Embedder::new(&g, &nb, config(variant)).embed(0).unwrap();
        assert_eq!(v.get(Feature::Node(0)), 0.25, "{variant:?}");
        assert_eq!(v.get(Feature::Predicate(1)), 0.375, "{variant:?}");
    }
}

#[test]
fn test_semantic_embedding_uses_memo() {
    let g = fork();
    let nb = Neighborhoods::from_graph(&g);

    let memo = MemoTable::new(g.node_count());
    let mut cached = SparseVector::new(1);
    cached.add(Feature::Node(1), 1.0);
    memo.publish(1, cached).unwrap();

    let embedder = Embedder::new(&g, &nb, config(Variant::Semantic)).with_memo(&memo);
    let v = embedder.embed(0).unwrap();
    // B's cached vector scaled by its arriving paint 0.375.
    assert_eq!(v.get(Feature::Node(1)), 0.375);
    assert_eq!(v.get(Feature::Node(2)), 0.09375);
}

#[test]
fn test_invalid_config_fails_before_running() {
    let g = fork();
    let nb = Neighborhoods::from_graph(&g);
    let mut bad = config(Variant::Vanilla);
    bad.epsilon = 0.0;
    assert_eq!(
        Embedder::new(&g, &nb, bad).run().unwrap_err(),
        BcaError::InvalidEpsilon(0.0)
    );
}

#[test]
fn test_one_bad_bookmark_fails_the_batch() {
    let g = fork();
    let nb = Neighborhoods::from_graph(&g);
    let embedder = Embedder::new(&g, &nb, config(Variant::Stable));
    let err = embedder.run_nodes(&[0, 9, 1]).unwrap_err();
    assert_eq!(
        err,
        BcaError::UnknownBookmark {
            bookmark: 9,
            node_count: 3
        }
    );
    // Siblings are unaffected when run on their own.
    assert!(embedder.run_nodes(&[0, 1]).is_ok());
}

#[test]
fn test_from_vectors_sums_duplicate_rows_and_drops_foreign_features() {
    let mut a = SparseVector::new(0);
    a.add(Feature::Node(1), 0.5);
    a.add(Feature::Predicate(9), 1.0);
    let mut b = SparseVector::new(0);
    b.add(Feature::Node(1), 0.25);

    let m = CooccurrenceMatrix::from_vectors(FeatureSpace::new(2, 1), [&a, &b]);
    assert_eq!(m.nnz(), 1);
    assert_eq!(m.get(0, 1), 0.75);
    assert_eq!(m.cells()[0], Cell { row: 0, column: 1, value: 0.75 });
}

#[test]
fn test_empty_matrix() {
    let m = CooccurrenceMatrix::from_vectors(FeatureSpace::new(0, 0), []);
    assert_eq!(m.nnz(), 0);
    assert_eq!(m.max_value(), 0.0);
    assert!(m.row(0).is_empty());
    assert_eq!(m.rows().count(), 0);
}
