use dmst_graph::{ArborescenceSolver, DirectedGraph, WeightedEdge};
use proptest::prelude::*;

/// Small feasible instance: every non-root vertex gets one guaranteed edge from a
/// vertex placed before it, plus arbitrary extra edges.
#[derive(Debug, Clone)]
struct Instance {
    n: usize,
    root: usize,
    edges: Vec<WeightedEdge>,
}

impl Instance {
    fn graph(&self) -> DirectedGraph {
        DirectedGraph::from_edges(self.n, self.root, self.edges.iter().copied()).unwrap()
    }
}

fn instance() -> impl Strategy<Value = Instance> {
    (2usize..=8).prop_flat_map(|n| {
        (
            Just(n),
            1..=n,
            proptest::collection::vec((0usize..64, -5i64..20), n - 1),
            proptest::collection::vec((1..=n, 1..=n, -5i64..20), 0..=3 * n),
        )
            .prop_map(|(n, root, spine, extra)| {
                let order: Vec<usize> = std::iter::once(root)
                    .chain((1..=n).filter(|&v| v != root))
                    .collect();
                let mut edges: Vec<WeightedEdge> = spine
                    .iter()
                    .enumerate()
                    .map(|(i, &(pick, weight))| {
                        WeightedEdge::new(order[pick % (i + 1)], order[i + 1], weight)
                    })
                    .collect();
                edges.extend(
                    extra
                        .into_iter()
                        .map(|(u, v, weight)| WeightedEdge::new(u, v, weight)),
                );
                Instance { n, root, edges }
            })
    })
}

/// Minimum over every assignment of one incoming edge per non-root vertex that
/// forms a tree rooted at `root`.
fn brute_force(instance: &Instance) -> Option<i64> {
    let n = instance.n;
    let mut cheapest: Vec<Vec<(usize, i64)>> = vec![Vec::new(); n + 1];
    for e in instance.edges.iter().filter(|e| e.source != e.target) {
        let slot = &mut cheapest[e.target];
        match slot.iter_mut().find(|(s, _)| *s == e.source) {
            Some((_, w)) => *w = (*w).min(e.weight),
            None => slot.push((e.source, e.weight)),
        }
    }

    let vertices: Vec<usize> = (1..=n).filter(|&v| v != instance.root).collect();
    let mut parent = vec![0usize; n + 1];
    let mut best = None;
    search(instance, &cheapest, &vertices, 0, 0, &mut parent, &mut best);
    best
}

fn search(
    instance: &Instance,
    cheapest: &[Vec<(usize, i64)>],
    vertices: &[usize],
    depth: usize,
    cost: i64,
    parent: &mut [usize],
    best: &mut Option<i64>,
) {
    if depth == vertices.len() {
        if is_tree(instance, parent, vertices) && best.map_or(true, |b| cost < b) {
            *best = Some(cost);
        }
        return;
    }
    let v = vertices[depth];
    for &(source, weight) in &cheapest[v] {
        parent[v] = source;
        search(instance, cheapest, vertices, depth + 1, cost + weight, parent, best);
    }
}

fn is_tree(instance: &Instance, parent: &[usize], vertices: &[usize]) -> bool {
    vertices.iter().all(|&start| {
        let mut v = start;
        for _ in 0..instance.n {
            if v == instance.root {
                return true;
            }
            v = parent[v];
        }
        v == instance.root
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn proptest_weight_matches_exhaustive_search(instance in instance()) {
        let expected = brute_force(&instance).expect("instance is feasible");
        let solution = ArborescenceSolver::default().solve(instance.graph()).unwrap();
        prop_assert_eq!(solution.weight, expected);
    }

    #[test]
    fn proptest_reductions_and_tree_account_for_weight(instance in instance()) {
        let solution = ArborescenceSolver::default().solve(instance.graph()).unwrap();

        let reduced: i64 = solution.levels.iter().map(|l| l.reduction).sum();
        prop_assert_eq!(reduced, solution.weight);
        prop_assert_eq!(solution.arborescence.input_weight(), solution.weight);
        prop_assert_eq!(solution.arborescence.edges().len(), instance.n - 1);
        prop_assert_eq!(solution.contractions + 1, solution.levels.len());
    }

    #[test]
    fn proptest_solve_is_deterministic(instance in instance()) {
        let first = ArborescenceSolver::default().solve(instance.graph()).unwrap();
        let second = ArborescenceSolver::default().solve(instance.graph()).unwrap();
        prop_assert_eq!(first.weight, second.weight);
        prop_assert_eq!(first.arborescence, second.arborescence);
    }
}
