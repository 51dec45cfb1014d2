mod refimpl;

use scenepath::{
    a_star, a_star_with, EdgeRecord, Euclidean, Graph, NodeId, NodeRecord, PathResult,
    SearchScratch, ZeroHeuristic,
};

use proptest::prelude::*;

const EPS: f64 = 1e-9;

#[derive(Debug, Clone)]
struct Scene {
    positions: Vec<(f64, f64)>,
    edges: Vec<EdgeRecord>,
}

impl Scene {
    fn ids(&self) -> impl Iterator<Item = NodeId> {
        (1..=self.positions.len() as u32).map(NodeId)
    }

    /// Graph whose stored heuristic is the straight-line distance to `goal`.
    fn graph_towards(&self, goal: NodeId) -> Graph {
        let (gx, gy) = self.positions[goal.0 as usize - 1];
        let nodes = self.ids().zip(&self.positions).map(|(id, &(x, y))| NodeRecord {
            id,
            x,
            y,
            heuristic: (gx - x).hypot(gy - y),
        });
        Graph::build(nodes, self.edges.iter().copied()).unwrap()
    }
}

/// Random planar scenes where every edge costs at least the distance between
/// its endpoints, so straight-line estimates are consistent.
fn scene() -> impl Strategy<Value = Scene> {
    (2usize..10).prop_flat_map(|n| {
        let positions = prop::collection::vec((0..10i32, 0..10i32), n);
        let edges = prop::collection::vec((0..n, 0..n, 1.0f64..3.0), 0..(n * 2));
        (positions, edges).prop_map(|(positions, edges)| {
            let positions: Vec<(f64, f64)> = positions
                .into_iter()
                .map(|(x, y)| (x as f64, y as f64))
                .collect();
            let edges = edges
                .into_iter()
                .map(|(a, b, stretch)| {
                    let (ax, ay) = positions[a];
                    let (bx, by) = positions[b];
                    EdgeRecord {
                        a: NodeId(a as u32 + 1),
                        b: NodeId(b as u32 + 1),
                        cost: (ax - bx).hypot(ay - by) * stretch,
                    }
                })
                .collect();
            Scene { positions, edges }
        })
    })
}

fn scene_with_query() -> impl Strategy<Value = (Scene, NodeId, NodeId)> {
    scene().prop_flat_map(|s| {
        let n = s.positions.len() as u32;
        (Just(s), 1..=n, 1..=n).prop_map(|(s, a, b)| (s, NodeId(a), NodeId(b)))
    })
}

fn check_path(graph: &Graph, result: &PathResult, start: NodeId, goal: NodeId) -> f64 {
    let path = result.path().expect("path");
    let ids: Vec<NodeId> = path.ids().collect();
    assert_eq!(ids.first(), Some(&start));
    assert_eq!(ids.last(), Some(&goal));
    let mut total = 0.0;
    for w in ids.windows(2) {
        total += graph.edge_cost(w[0], w[1]).expect("consecutive nodes are adjacent");
    }
    assert!((total - path.cost()).abs() < EPS);
    total
}

proptest! {
    #[test]
    fn stored_heuristic_matches_dijkstra((s, start, goal) in scene_with_query()) {
        let graph = s.graph_towards(goal);
        let result = a_star(&graph, start, goal).unwrap();
        match refimpl::shortest_cost(&s.edges, start, goal) {
            Some(expected) => {
                let cost = check_path(&graph, &result, start, goal);
                prop_assert!((cost - expected).abs() < EPS, "{} != {}", cost, expected);
            }
            None => prop_assert_eq!(result, PathResult::NotFound),
        }
    }

    #[test]
    fn euclidean_and_zero_agree((s, start, goal) in scene_with_query()) {
        let graph = s.graph_towards(goal);
        let mut scratch = SearchScratch::new(&graph);
        let h = Euclidean::towards(&graph, goal).unwrap();
        let informed = a_star_with(&mut scratch, &graph, start, goal, h, None).unwrap();
        let blind = a_star_with(&mut scratch, &graph, start, goal, ZeroHeuristic, None).unwrap();
        prop_assert_eq!(informed.is_found(), blind.is_found());
        if let (Some(a), Some(b)) = (informed.path(), blind.path()) {
            prop_assert!((a.cost() - b.cost()).abs() < EPS);
        }
    }

    #[test]
    fn start_equals_goal((s, start, _goal) in scene_with_query()) {
        let graph = s.graph_towards(start);
        let result = a_star(&graph, start, start).unwrap();
        let ids: Vec<NodeId> = result.path().unwrap().ids().collect();
        prop_assert_eq!(ids, vec![start]);
    }

    #[test]
    fn repeated_queries_are_identical((s, start, goal) in scene_with_query()) {
        let first = a_star(&s.graph_towards(goal), start, goal).unwrap();
        let second = a_star(&s.graph_towards(goal), start, goal).unwrap();
        prop_assert_eq!(first, second);
    }
}

fn unit_nodes(n: u32) -> Vec<NodeRecord> {
    (1..=n)
        .map(|i| NodeRecord {
            id: NodeId(i),
            x: i as f64,
            y: 0.0,
            heuristic: 0.0,
        })
        .collect()
}

#[test]
fn single_edge_is_symmetric() {
    let graph = Graph::build(
        unit_nodes(2),
        [EdgeRecord {
            a: NodeId(1),
            b: NodeId(2),
            cost: 4.25,
        }],
    )
    .unwrap();
    let forward = a_star(&graph, NodeId(1), NodeId(2)).unwrap();
    let backward = a_star(&graph, NodeId(2), NodeId(1)).unwrap();
    assert_eq!(forward.path().unwrap().cost(), 4.25);
    assert_eq!(backward.path().unwrap().cost(), 4.25);
    assert_eq!(
        backward.path().unwrap().ids().collect::<Vec<_>>(),
        vec![NodeId(2), NodeId(1)]
    );
}

#[test]
fn disconnected_components() {
    let link = |a, b| EdgeRecord {
        a: NodeId(a),
        b: NodeId(b),
        cost: 1.0,
    };
    let graph = Graph::build(unit_nodes(6), [link(1, 2), link(2, 3), link(4, 5), link(5, 6)]).unwrap();
    for (start, goal) in [(1, 6), (6, 1), (3, 4)] {
        let result = a_star(&graph, NodeId(start), NodeId(goal)).unwrap();
        assert_eq!(result, PathResult::NotFound);
        assert!(result.path().is_none());
    }
}

#[test]
fn shared_graph_across_threads() {
    let link = |a, b| EdgeRecord {
        a: NodeId(a),
        b: NodeId(b),
        cost: 1.0,
    };
    let graph = Graph::build(
        unit_nodes(8),
        (1..8).map(|i| link(i, i + 1)).chain([link(1, 8)]),
    )
    .unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (1..=8u32)
            .map(|goal| {
                let graph = &graph;
                s.spawn(move || {
                    let mut scratch = SearchScratch::new(graph);
                    let mut costs = Vec::new();
                    for _ in 0..50 {
                        let result = a_star_with(
                            &mut scratch,
                            graph,
                            NodeId(1),
                            NodeId(goal),
                            ZeroHeuristic,
                            None,
                        )
                        .unwrap();
                        costs.push(result.path().unwrap().cost());
                    }
                    (goal, costs)
                })
            })
            .collect();

        for h in handles {
            let (goal, costs) = h.join().unwrap();
            // Ring of 8: distance from 1 is min(goal - 1, 9 - goal)
            let expected = (goal - 1).min(9 - goal) as f64;
            assert!(costs.iter().all(|&c| c == expected), "goal {goal}: {costs:?}");
        }
    });
}
