//! Tests for the typed multigraph.

use super::*;

fn entities(n: usize) -> Vec<VertexColor> {
    vec![VertexColor::Entity; n]
}

#[test]
fn test_rows_are_sorted_by_edge_id() {
    // 0 -> 1 (p0), 2 -> 1 (p1), 0 -> 2 (p2), 0 -> 1 (p3)
    let mut b = TypedGraph::builder(entities(3));
    b.add_edge(0, 1, 0);
    b.add_edge(2, 1, 1);
    b.add_edge(0, 2, 2);
    b.add_edge(0, 1, 3);
    let g = b.build().unwrap();

    assert_eq!(g.out_edges(0), &[0, 2, 3]);
    assert_eq!(g.in_edges(1), &[0, 1, 3]);
    assert_eq!(g.out_neighbors(0).collect::<Vec<_>>(), vec![1, 2, 1]);
    assert_eq!(g.in_neighbors(1).collect::<Vec<_>>(), vec![0, 2, 0]);
    assert_eq!(g.predicate_count(), 4);
    assert_eq!(g.out_degree(0), 3);
    assert_eq!(g.in_degree(2), 1);
}

#[test]
fn test_empty_graph() {
    let g = TypedGraph::from_edges(Vec::new(), Vec::new()).unwrap();
    assert_eq!(g.node_count(), 0);
    assert_eq!(g.edge_count(), 0);
    assert_eq!(g.predicate_count(), 0);
}

#[test]
fn test_disconnected_graph() {
    let g = TypedGraph::from_edges(entities(5), Vec::new()).unwrap();
    for i in 0..5 {
        assert!(g.out_edges(i).is_empty());
        assert!(g.in_edges(i).is_empty());
    }
}

#[test]
fn test_out_of_range_endpoint_is_rejected() {
    let err = TypedGraph::from_edges(entities(2), vec![EdgeRecord::new(0, 2, 0)]).unwrap_err();
    assert_eq!(err, BcaError::NodeOutOfRange { node: 2, node_count: 2 });
}

#[test]
fn test_invalid_weights_are_rejected() {
    let err = TypedGraph::from_edges(entities(2), vec![EdgeRecord::weighted(0, 1, 0, -1.0)])
        .unwrap_err();
    assert!(matches!(err, BcaError::InvalidWeight { edge: 0, .. }));

    let err = TypedGraph::from_edges(entities(2), vec![EdgeRecord::weighted(0, 1, 0, f32::NAN)])
        .unwrap_err();
    assert!(matches!(err, BcaError::InvalidWeight { edge: 0, .. }));
}

#[test]
fn test_weights_default_to_one() {
    let mut b = TypedGraph::builder(entities(2));
    let plain = b.add_edge(0, 1, 0);
    let heavy = b.add_weighted_edge(1, 0, 0, 2.5);
    let g = b.build().unwrap();
    assert_eq!(g.weight(plain), 1.0);
    assert_eq!(g.weight(heavy), 2.5);
}

#[test]
fn test_colors_and_node_checks() {
    let g = TypedGraph::from_edges(
        vec![VertexColor::Entity, VertexColor::Literal],
        vec![EdgeRecord::new(0, 1, 7)],
    )
    .unwrap();
    assert!(!g.is_literal(0));
    assert!(g.is_literal(1));
    assert_eq!(g.predicate(0), 7);
    assert!(g.check_node(1).is_ok());
    assert_eq!(
        g.check_node(9),
        Err(BcaError::NodeOutOfRange { node: 9, node_count: 2 })
    );
}

#[test]
#[should_panic(expected = "node 5 out of bounds")]
fn test_out_edges_panics_past_node_range() {
    let g = TypedGraph::from_edges(entities(2), Vec::new()).unwrap();
    let _ = g.out_edges(5);
}

#[test]
#[should_panic(expected = "edge 3 out of bounds")]
fn test_edge_panics_past_edge_range() {
    let g = TypedGraph::from_edges(entities(2), vec![EdgeRecord::new(0, 1, 0)]).unwrap();
    let _ = g.predicate(3);
}
