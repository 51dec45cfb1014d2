//! Least-cost routing over small, static scene graphs.
//!
//! A scene is a set of labelled waypoints in the plane, each carrying a
//! precomputed cost-to-go estimate, joined by undirected weighted edges. The
//! graph is loaded once, frozen, and then answers start/goal queries with A*.
//!
//! ```no_run
//! use scenepath::{a_star, input, NodeId, PathResult, UnknownEdgePolicy};
//!
//! # fn main() -> scenepath::Result<()> {
//! let graph = input::load_graph("nodes.csv", "edges.csv", UnknownEdgePolicy::Reject)?;
//! match a_star(&graph, NodeId(1), NodeId(12))? {
//!     PathResult::Found(path) => println!("{}", path),
//!     _ => println!("No path exists."),
//! }
//! # Ok(())
//! # }
//! ```

mod astar;
mod emit;
mod error;
mod fmt;
mod graph;
mod map;
mod set;

pub mod input;

pub use astar::{
    a_star, a_star_with, Euclidean, HeuristicDistance, Path, PathResult, SearchScratch,
    SearchStats, Step, StoredHeuristic, ZeroHeuristic,
};
pub use emit::{emit, write_path, write_path_file, Emission};
pub use error::{Error, Result};
pub use graph::{EdgeRecord, Graph, GraphBuilder, NodeRecord, UnknownEdgePolicy};
pub(crate) use map::NodeMap;
pub(crate) use set::NodeSet;

pub use fmt::{to_dot, to_dot_with_path};

/// External node label, as found in scene files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dense slot of a node inside a built [`Graph`].
///
/// Slots are assigned in insertion order and only mean something relative to
/// the graph that handed them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeIndex(usize);

pub type Weight = f64;

/// One half of an undirected edge: the far endpoint and the traversal cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Edge {
    pub node: NodeIndex,
    pub weight: Weight,
}

fn edge(n: NodeIndex, weight: Weight) -> Edge {
    Edge { node: n, weight }
}
