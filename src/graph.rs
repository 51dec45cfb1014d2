use crate::error::{Error, Result};
use crate::{edge, Edge, NodeId, NodeIndex, Weight};

use std::collections::HashMap;

/// A waypoint as read from a scene: its label, position and cost-to-go estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRecord {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub heuristic: Weight,
}

/// An undirected connection between two waypoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRecord {
    pub a: NodeId,
    pub b: NodeId,
    pub cost: Weight,
}

/// What to do with an edge naming a node that was never declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownEdgePolicy {
    /// Fail the build with [`Error::UnknownNode`].
    #[default]
    Reject,
    /// Skip the edge and log a warning.
    Drop,
}

/// Mutable adjacency, only alive while a graph is being built.
#[derive(Default)]
struct AdjacencyList {
    nodes: Vec<Vec<Edge>>,
}

impl AdjacencyList {
    fn with_capacity(cap: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(cap),
        }
    }

    fn add_node(&mut self) -> NodeIndex {
        let n = NodeIndex(self.nodes.len());
        self.nodes.push(Vec::new());
        n
    }

    /// Inserts `a -> b`, or lowers the cost of an existing one.
    ///
    /// Returns false if the edge was already present.
    fn add_directed_edge(&mut self, a: NodeIndex, b: NodeIndex, c: Weight) -> bool {
        let edges = &mut self.nodes[a.0];
        if let Some(existing) = edges.iter_mut().find(|e| e.node == b) {
            existing.weight = existing.weight.min(c);
            return false;
        }
        edges.push(edge(b, c));
        true
    }

    fn add_edge(&mut self, a: NodeIndex, b: NodeIndex, c: Weight) -> bool {
        let new = self.add_directed_edge(a, b, c);
        if a != b {
            self.add_directed_edge(b, a, c);
        }
        new
    }

    // Impl for converting to jagged array
    fn lock(self) -> (Vec<Edge>, Vec<Span>) {
        let len: usize = self.nodes.iter().map(Vec::len).sum();
        let mut node_data: Vec<Edge> = Vec::with_capacity(len);
        let mut node_info: Vec<Span> = Vec::with_capacity(self.nodes.len());

        for edges in &self.nodes {
            let offset = node_data.len();
            node_data.extend_from_slice(edges);
            node_info.push(Span {
                offset,
                len: edges.len(),
            });
        }

        (node_data, node_info)
    }
}

#[derive(Debug, Clone, Copy)]
struct Span {
    offset: usize,
    len: usize,
}

/// Collects node and edge records and validates them into a [`Graph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    policy: UnknownEdgePolicy,
    nodes: Vec<NodeRecord>,
    index: HashMap<NodeId, NodeIndex>,
    edges: Vec<EdgeRecord>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unknown_edges(mut self, policy: UnknownEdgePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn add_node(&mut self, node: NodeRecord) -> Result<()> {
        if node.id.0 == 0 {
            return Err(Error::InvalidNodeId(node.id));
        }
        if !(node.x.is_finite() && node.y.is_finite()) {
            return Err(Error::InvalidPosition { id: node.id });
        }
        if !(node.heuristic.is_finite() && node.heuristic >= 0.0) {
            return Err(Error::InvalidHeuristic {
                id: node.id,
                value: node.heuristic,
            });
        }
        if self.index.contains_key(&node.id) {
            return Err(Error::DuplicateNode(node.id));
        }

        let n = NodeIndex(self.nodes.len());
        self.index.insert(node.id, n);
        self.nodes.push(node);
        Ok(())
    }

    /// Edges are only checked against the node set in [`GraphBuilder::build`],
    /// so they may be added before their endpoints.
    pub fn add_edge(&mut self, edge: EdgeRecord) -> Result<()> {
        if !(edge.cost.is_finite() && edge.cost >= 0.0) {
            return Err(Error::InvalidWeight {
                from: edge.a,
                to: edge.b,
                cost: edge.cost,
            });
        }
        self.edges.push(edge);
        Ok(())
    }

    pub fn build(self) -> Result<Graph> {
        let mut adjacency = AdjacencyList::with_capacity(self.nodes.len());
        for _ in &self.nodes {
            adjacency.add_node();
        }

        let mut edge_count = 0;
        let mut dropped = 0;
        for EdgeRecord { a, b, cost } in &self.edges {
            let (ia, ib) = match (self.index.get(a), self.index.get(b)) {
                (Some(&ia), Some(&ib)) => (ia, ib),
                (lookup_a, _) => {
                    let missing = if lookup_a.is_none() { *a } else { *b };
                    match self.policy {
                        UnknownEdgePolicy::Reject => return Err(Error::UnknownNode(missing)),
                        UnknownEdgePolicy::Drop => {
                            tracing::warn!("Dropping edge {a} -- {b}: node {missing} is not declared");
                            dropped += 1;
                            continue;
                        }
                    }
                }
            };
            if adjacency.add_edge(ia, ib, *cost) {
                edge_count += 1;
            }
        }

        let (edges, spans) = adjacency.lock();
        tracing::debug!(
            nodes = self.nodes.len(),
            edges = edge_count,
            dropped,
            "Built scene graph"
        );

        Ok(Graph {
            nodes: self.nodes,
            index: self.index,
            edges,
            spans,
            edge_count,
        })
    }
}

/// Immutable scene graph.
///
/// Node lookups go through a hash index into dense storage, and each node's
/// neighbours are a contiguous slice, so no operation scans the whole node
/// set. All per-query search state lives outside the graph.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<NodeRecord>,
    index: HashMap<NodeId, NodeIndex>,
    edges: Vec<Edge>,
    spans: Vec<Span>,
    edge_count: usize,
}

impl Graph {
    /// Builds a graph, rejecting edges that name undeclared nodes.
    pub fn build(
        nodes: impl IntoIterator<Item = NodeRecord>,
        edges: impl IntoIterator<Item = EdgeRecord>,
    ) -> Result<Self> {
        let mut builder = GraphBuilder::new();
        for n in nodes {
            builder.add_node(n)?;
        }
        for e in edges {
            builder.add_edge(e)?;
        }
        builder.build()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeRecord> {
        self.index_of(id).map(|n| self.record(n))
    }

    /// Nodes in declaration order
    pub fn nodes(&self) -> impl Iterator<Item = &NodeRecord> {
        self.nodes.iter()
    }

    pub fn max_id(&self) -> Option<NodeId> {
        self.nodes.iter().map(|n| n.id).max()
    }

    /// Neighbours of `id` with the cost of reaching each, or `None` if `id` is unknown.
    pub fn neighbors(&self, id: NodeId) -> Option<impl Iterator<Item = (NodeId, Weight)> + '_> {
        let n = self.index_of(id)?;
        Some(
            self.edges(n)
                .iter()
                .map(|e| (self.record(e.node).id, e.weight)),
        )
    }

    pub fn edge_cost(&self, a: NodeId, b: NodeId) -> Option<Weight> {
        let (a, b) = (self.index_of(a)?, self.index_of(b)?);
        self.edges(a).iter().find(|e| e.node == b).map(|e| e.weight)
    }

    pub(crate) fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    pub(crate) fn record(&self, n: NodeIndex) -> &NodeRecord {
        &self.nodes[n.0]
    }

    /// Return the edges leaving n
    pub(crate) fn edges(&self, n: NodeIndex) -> &[Edge] {
        let Span { offset, len } = self.spans[n.0];
        &self.edges[offset..offset + len]
    }

    pub(crate) fn slots(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.nodes.len()).map(NodeIndex)
    }
}
