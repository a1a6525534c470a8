use bca::graph::EdgeRecord;
use bca::{
    DiffusionParams, Direction, Feature, Neighborhoods, NoMemo, SemanticJob, SparseVector,
    StableJob, TypedGraph, VanillaJob, VertexColor,
};
use proptest::prelude::*;
use std::collections::HashSet;

const TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone)]
struct Case {
    colors: Vec<VertexColor>,
    edges: Vec<EdgeRecord>,
}

impl Case {
    fn graph(&self) -> TypedGraph {
        TypedGraph::from_edges(self.colors.clone(), self.edges.clone()).unwrap()
    }
}

/// Random typed multigraphs. Parallel edges between a pair always differ in predicate,
/// so every relation of a row is distinguishable. Weights are small integers so that
/// row sums are exact in any order.
fn case() -> impl Strategy<Value = Case> {
    (2usize..12).prop_flat_map(|n| {
        let colors = proptest::collection::vec(
            prop_oneof![3 => Just(VertexColor::Entity), 1 => Just(VertexColor::Literal)],
            n,
        );
        // Few endpoints and predicates, so parallel edges are common.
        let edges = proptest::collection::vec((0..n, 0..n, 0usize..3, 1u8..5), 0..40);
        (colors, edges).prop_map(|(colors, raw)| {
            let mut seen = HashSet::new();
            let edges = raw
                .into_iter()
                .filter(|&(s, t, p, _)| seen.insert((s, t, p)))
                .map(|(s, t, p, w)| EdgeRecord::weighted(s, t, p, f32::from(w)))
                .collect();
            Case { colors, edges }
        })
    })
}

fn params() -> impl Strategy<Value = DiffusionParams> {
    (0.05f64..0.95, 1e-4f64..0.2).prop_map(|(a, e)| DiffusionParams::new(a, e).unwrap())
}

fn run_all(graph: &TypedGraph, nb: &Neighborhoods, root: usize, p: DiffusionParams) -> Vec<SparseVector> {
    vec![
        VanillaJob::new(graph, nb, root, Direction::Forward, p).run().unwrap(),
        VanillaJob::new(graph, nb, root, Direction::Reverse, p).run().unwrap(),
        StableJob::new(graph, nb, root, Direction::Forward, p).run().unwrap(),
        SemanticJob::new(graph, nb, &NoMemo, root, p).run().unwrap(),
    ]
}

fn permuted(graph: &TypedGraph, shift: usize) -> Neighborhoods {
    let base = Neighborhoods::from_graph(graph);
    let shuffle = |row: &[usize]| {
        let mut row = row.to_vec();
        row.reverse();
        if !row.is_empty() {
            let k = shift % row.len();
            row.rotate_left(k);
        }
        row
    };
    let n = graph.node_count();
    let forward = (0..n).map(|u| shuffle(base.forward(u))).collect();
    let reverse = (0..n).map(|u| shuffle(base.reverse(u))).collect();
    Neighborhoods::from_parts(graph, forward, reverse).unwrap()
}

proptest! {
    #[test]
    fn test_retained_node_paint_never_exceeds_one(case in case(), p in params(), root in 0usize..12) {
        let graph = case.graph();
        let root = root % graph.node_count();
        let nb = Neighborhoods::from_graph(&graph);
        for v in run_all(&graph, &nb, root, p) {
            prop_assert!(v.node_mass() <= 1.0 + TOLERANCE, "node mass {}", v.node_mass());
            prop_assert!(v.iter().all(|(_, w)| w > 0.0));
            prop_assert!(v.get(Feature::Node(root)) >= p.alpha);
        }
    }

    #[test]
    fn test_node_paint_is_alpha_times_injected_paint(case in case(), p in params(), root in 0usize..12) {
        let graph = case.graph();
        let root = root % graph.node_count();
        let nb = Neighborhoods::from_graph(&graph);
        for v in run_all(&graph, &nb, root, p) {
            let expected = p.alpha * (1.0 + v.predicate_mass());
            prop_assert!((v.node_mass() - expected).abs() < TOLERANCE,
                "node mass {} expected {}", v.node_mass(), expected);
        }
    }

    #[test]
    fn test_features_stay_inside_the_graph(case in case(), p in params(), root in 0usize..12) {
        let graph = case.graph();
        let root = root % graph.node_count();
        let nb = Neighborhoods::from_graph(&graph);
        for v in run_all(&graph, &nb, root, p) {
            for (feature, _) in v.iter() {
                match feature {
                    Feature::Node(u) => prop_assert!(u < graph.node_count()),
                    Feature::Predicate(q) => prop_assert!(q < graph.predicate_count()),
                }
            }
        }
    }

    #[test]
    fn test_vanilla_and_stable_ignore_neighbor_order(case in case(), p in params(), root in 0usize..12, shift in 0usize..8) {
        let graph = case.graph();
        let root = root % graph.node_count();
        let listed = Neighborhoods::from_graph(&graph);
        let shuffled = permuted(&graph, shift);

        let pairs = [
            (
                VanillaJob::new(&graph, &listed, root, Direction::Forward, p).run().unwrap(),
                VanillaJob::new(&graph, &shuffled, root, Direction::Forward, p).run().unwrap(),
            ),
            (
                VanillaJob::new(&graph, &listed, root, Direction::Reverse, p).run().unwrap(),
                VanillaJob::new(&graph, &shuffled, root, Direction::Reverse, p).run().unwrap(),
            ),
            (
                StableJob::new(&graph, &listed, root, Direction::Forward, p).run().unwrap(),
                StableJob::new(&graph, &shuffled, root, Direction::Forward, p).run().unwrap(),
            ),
        ];

        for (a, b) in &pairs {
            prop_assert_eq!(a.len(), b.len());
            for (feature, w) in a.iter() {
                prop_assert!((b.get(feature) - w).abs() < TOLERANCE, "{:?}: {} vs {}", feature, w, b.get(feature));
            }
        }
    }

    #[test]
    fn test_jobs_are_deterministic(case in case(), p in params(), root in 0usize..12) {
        let graph = case.graph();
        let root = root % graph.node_count();
        let nb = Neighborhoods::from_graph(&graph);
        let first: Vec<_> = run_all(&graph, &nb, root, p).iter().map(SparseVector::to_sorted_vec).collect();
        let second: Vec<_> = run_all(&graph, &nb, root, p).iter().map(SparseVector::to_sorted_vec).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_isolated_root_keeps_alpha(p in params(), n in 1usize..6) {
        let graph = TypedGraph::from_edges(vec![VertexColor::Entity; n], Vec::new()).unwrap();
        let nb = Neighborhoods::from_graph(&graph);
        for v in run_all(&graph, &nb, n - 1, p) {
            prop_assert_eq!(v.to_sorted_vec(), vec![(Feature::Node(n - 1), p.alpha)]);
        }
    }
}
