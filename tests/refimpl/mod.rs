//! Plain Dijkstra over raw edge lists, used as ground truth for A*.

use scenepath::{EdgeRecord, NodeId};

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

#[derive(Debug)]
struct SearchNode {
    g: f64,
    current: NodeId,
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &SearchNode) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchNode {}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &SearchNode) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &SearchNode) -> Ordering {
        // This is reversed on purpose to make the max-heap into min-heap.
        other.g.total_cmp(&self.g)
    }
}

/// Cost of the cheapest route from `start` to `goal`, `None` if unreachable.
pub fn shortest_cost(edges: &[EdgeRecord], start: NodeId, goal: NodeId) -> Option<f64> {
    let mut adjacency: HashMap<NodeId, Vec<(NodeId, f64)>> = HashMap::new();
    for e in edges {
        adjacency.entry(e.a).or_default().push((e.b, e.cost));
        adjacency.entry(e.b).or_default().push((e.a, e.cost));
    }

    let mut heap = BinaryHeap::new();
    let mut visited = HashSet::new();
    heap.push(SearchNode {
        g: 0.0,
        current: start,
    });

    while let Some(SearchNode { g, current }) = heap.pop() {
        if current == goal {
            return Some(g);
        }
        if !visited.insert(current) {
            continue;
        }
        for &(next, cost) in adjacency.get(&current).into_iter().flatten() {
            if !visited.contains(&next) {
                heap.push(SearchNode {
                    g: g + cost,
                    current: next,
                });
            }
        }
    }

    None
}
