use crate::error::{Error, Result};
use crate::graph::{Graph, NodeRecord};
use crate::{edge, Edge, NodeId, NodeIndex, NodeMap, NodeSet, Weight};

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::atomic::{self, AtomicBool};

/// Estimate of the remaining cost from a node to the goal of the current query.
///
/// The search only returns optimal paths when the estimate never overestimates
/// and is consistent along every edge. Neither property is checked.
pub trait HeuristicDistance {
    fn cost(&self, node: &NodeRecord) -> Weight;
}

impl<H: HeuristicDistance + ?Sized> HeuristicDistance for &H {
    fn cost(&self, node: &NodeRecord) -> Weight {
        (**self).cost(node)
    }
}

/// Uses the cost-to-go value each node was loaded with.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredHeuristic;

impl HeuristicDistance for StoredHeuristic {
    fn cost(&self, node: &NodeRecord) -> Weight {
        node.heuristic
    }
}

/// Always zero, which turns the search into Dijkstra.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl HeuristicDistance for ZeroHeuristic {
    fn cost(&self, _node: &NodeRecord) -> Weight {
        0.0
    }
}

/// Straight-line distance to the goal position.
#[derive(Debug, Clone, Copy)]
pub struct Euclidean {
    goal: (f64, f64),
}

impl Euclidean {
    pub fn towards(graph: &Graph, goal: NodeId) -> Result<Self> {
        let n = graph.node(goal).ok_or(Error::UnknownNode(goal))?;
        Ok(Self { goal: (n.x, n.y) })
    }
}

impl HeuristicDistance for Euclidean {
    fn cost(&self, node: &NodeRecord) -> Weight {
        (self.goal.0 - node.x).hypot(self.goal.1 - node.y)
    }
}

/// A node on a path and the cost of the edge used to reach it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub node: NodeId,
    pub cost: Weight,
}

/// Ordered node sequence from start to goal. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    steps: Vec<Step>,
}

impl Path {
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.steps.iter().map(|s| s.node)
    }

    /// Total cost of all traversed edges
    pub fn cost(&self) -> Weight {
        self.steps.iter().map(|s| s.cost).sum()
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, id) in self.ids().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", id)?;
        }
        Ok(())
    }
}

/// Outcome of a single query. Only invalid queries are errors.
#[derive(Debug, Clone, PartialEq)]
pub enum PathResult {
    Found(Path),
    NotFound,
    Cancelled,
}

impl PathResult {
    pub fn path(&self) -> Option<&Path> {
        match self {
            PathResult::Found(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }
}

/// Counters from the most recent query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes taken off the frontier and expanded
    pub expanded: usize,
    /// Entries pushed onto the frontier
    pub pushed: usize,
    /// Popped entries discarded because their node was already visited
    pub stale: usize,
}

/// Frontier entry. Orders by lowest `f` first, then by insertion order.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    f: Weight,
    seq: u64,
    node: NodeIndex,
}

impl Ord for Candidate {
    fn cmp(&self, o: &Self) -> Ordering {
        // Reversed, BinaryHeap is a max-heap
        o.f.total_cmp(&self.f).then_with(|| o.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// Query-local search state: best known costs, parents, visited set and frontier.
///
/// Keeping this outside the [`Graph`] lets one graph serve any number of
/// queries, including concurrent ones each holding their own scratch. A
/// scratch can be reused across queries; it is cleared at the start of each.
#[derive(Debug, Default)]
pub struct SearchScratch {
    node_cost: NodeMap<Weight>,
    parents: NodeMap<Edge>,
    visited: NodeSet,
    queue: BinaryHeap<Candidate>,
    seq: u64,
    stats: SearchStats,
}

impl SearchScratch {
    pub fn new(g: &Graph) -> Self {
        let len = g.len();
        Self {
            node_cost: NodeMap::with_capacity(len),
            parents: NodeMap::with_capacity(len),
            visited: NodeSet::with_capacity(len),
            queue: BinaryHeap::with_capacity(len),
            seq: 0,
            stats: SearchStats::default(),
        }
    }

    pub fn clear_transients(&mut self) {
        self.node_cost.clear();
        self.parents.clear();
        self.visited.clear();
        self.queue.clear();
        self.seq = 0;
        self.stats = SearchStats::default();
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    fn push(&mut self, node: NodeIndex, f: Weight) {
        self.queue.push(Candidate {
            f,
            seq: self.seq,
            node,
        });
        self.seq += 1;
        self.stats.pushed += 1;
    }
}

fn walk_backwards(g: &Graph, start: NodeIndex, end: NodeIndex, parents: &NodeMap<Edge>) -> Path {
    let mut child = end;
    let mut steps = Vec::new();
    while child != start {
        let Edge {
            node: parent,
            weight,
        } = parents[child];
        steps.push(Step {
            node: g.record(child).id,
            cost: weight,
        });
        child = parent;
    }
    steps.push(Step {
        node: g.record(start).id,
        cost: 0.0,
    });
    steps.reverse();
    Path { steps }
}

/// Find the cheapest path between two nodes using each node's stored heuristic.
pub fn a_star(graph: &Graph, start: NodeId, goal: NodeId) -> Result<PathResult> {
    let mut scratch = SearchScratch::new(graph);
    a_star_with(&mut scratch, graph, start, goal, StoredHeuristic, None)
}

/// Find the cheapest path between two nodes.
///
/// `cancel` is polled once per frontier pop; when it reads true the query
/// stops with [`PathResult::Cancelled`]. Fails with [`Error::UnknownNode`] if
/// either endpoint is not in the graph.
pub fn a_star_with(
    scratch: &mut SearchScratch,
    graph: &Graph,
    start: NodeId,
    goal: NodeId,
    heuristic: impl HeuristicDistance,
    cancel: Option<&AtomicBool>,
) -> Result<PathResult> {
    scratch.clear_transients();

    let start_ix = graph.index_of(start).ok_or(Error::UnknownNode(start))?;
    let goal_ix = graph.index_of(goal).ok_or(Error::UnknownNode(goal))?;

    if start_ix == goal_ix {
        return Ok(PathResult::Found(Path {
            steps: vec![Step {
                node: start,
                cost: 0.0,
            }],
        }));
    }

    scratch.node_cost.insert(start_ix, 0.0);
    scratch.push(start_ix, heuristic.cost(graph.record(start_ix)));

    let result = loop {
        if cancel.is_some_and(|c| c.load(atomic::Ordering::Relaxed)) {
            break PathResult::Cancelled;
        }

        let Some(Candidate { node: cur, .. }) = scratch.queue.pop() else {
            break PathResult::NotFound;
        };

        if !scratch.visited.add(cur) {
            scratch.stats.stale += 1;
            continue;
        }

        if cur == goal_ix {
            break PathResult::Found(walk_backwards(graph, start_ix, goal_ix, &scratch.parents));
        }

        scratch.stats.expanded += 1;
        let cur_cost = scratch.node_cost[cur];
        tracing::trace!(node = %graph.record(cur).id, g = cur_cost, "Expanding");

        for &Edge {
            node: child,
            weight: cost,
        } in graph.edges(cur)
        {
            if scratch.visited.has(child) {
                continue;
            }

            let start_to_child_cost = cur_cost + cost;
            let improves = scratch
                .node_cost
                .get(child)
                .map_or(true, |&known| start_to_child_cost < known);
            if improves {
                scratch.node_cost.insert(child, start_to_child_cost);
                scratch.parents.insert(child, edge(cur, cost));
                let estimated_end_cost =
                    start_to_child_cost + heuristic.cost(graph.record(child));
                scratch.push(child, estimated_end_cost);
            }
        }
    };

    tracing::debug!(
        %start,
        %goal,
        expanded = scratch.stats.expanded,
        pushed = scratch.stats.pushed,
        stale = scratch.stats.stale,
        found = result.is_found(),
        "A* query finished"
    );

    Ok(result)
}
