//! Readers for scene files.
//!
//! Every file is plain comma separated text. Lines starting with `#` are
//! comments and blank lines are skipped:
//!
//! ```text
//! # nodes.csv: ID,x,y,heuristic-cost-to-go
//! 1,-0.5,-0.5,1.4142
//! # edges.csv: ID1,ID2,cost
//! 1,2,0.4123
//! # queries: start,goal
//! 1,12
//! ```

use crate::error::{Error, Result};
use crate::graph::{EdgeRecord, Graph, GraphBuilder, NodeRecord, UnknownEdgePolicy};
use crate::NodeId;

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

struct Row {
    fields: Vec<String>,
    line: u64,
}

impl Row {
    fn field<T: FromStr>(&self, i: usize, name: &'static str) -> Result<T> {
        let raw = self.fields.get(i).ok_or(Error::MissingField {
            line: self.line,
            field: name,
        })?;
        raw.parse().map_err(|_| Error::Parse {
            line: self.line,
            field: name,
            value: raw.to_string(),
        })
    }

    fn node_id(&self, i: usize, name: &'static str) -> Result<NodeId> {
        let id: u32 = self.field(i, name)?;
        if id == 0 {
            return Err(Error::Parse {
                line: self.line,
                field: name,
                value: "0".to_string(),
            });
        }
        Ok(NodeId(id))
    }
}

fn rows<R: Read>(r: R) -> impl Iterator<Item = Result<Row>> {
    BufReader::new(r)
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(Error::Stream(e))),
            };
            let text = line.trim();
            if text.is_empty() || text.starts_with('#') {
                return None;
            }
            Some(Ok(Row {
                fields: text.split(',').map(|f| f.trim().to_string()).collect(),
                line: i as u64 + 1,
            }))
        })
}

/// Parses `id,x,y,heuristic` records.
pub fn read_nodes<R: Read>(r: R) -> Result<Vec<NodeRecord>> {
    rows(r)
        .map(|row| -> Result<NodeRecord> {
            let row = row?;
            Ok(NodeRecord {
                id: row.node_id(0, "node id")?,
                x: row.field(1, "x")?,
                y: row.field(2, "y")?,
                heuristic: row.field(3, "heuristic")?,
            })
        })
        .collect()
}

/// Parses `id1,id2,cost` records.
pub fn read_edges<R: Read>(r: R) -> Result<Vec<EdgeRecord>> {
    rows(r)
        .map(|row| -> Result<EdgeRecord> {
            let row = row?;
            Ok(EdgeRecord {
                a: row.node_id(0, "first node id")?,
                b: row.node_id(1, "second node id")?,
                cost: row.field(2, "cost")?,
            })
        })
        .collect()
}

/// Parses `start,goal` records.
pub fn read_queries<R: Read>(r: R) -> Result<Vec<(NodeId, NodeId)>> {
    rows(r)
        .map(|row| -> Result<(NodeId, NodeId)> {
            let row = row?;
            Ok((row.node_id(0, "start id")?, row.node_id(1, "goal id")?))
        })
        .collect()
}

pub fn graph_from_readers<N: Read, E: Read>(
    nodes: N,
    edges: E,
    policy: UnknownEdgePolicy,
) -> Result<Graph> {
    let mut builder = GraphBuilder::new().unknown_edges(policy);
    for n in read_nodes(nodes)? {
        builder.add_node(n)?;
    }
    for e in read_edges(edges)? {
        builder.add_edge(e)?;
    }
    builder.build()
}

/// Reads and validates a scene from a node file and an edge file.
pub fn load_graph(
    nodes: impl AsRef<Path>,
    edges: impl AsRef<Path>,
    policy: UnknownEdgePolicy,
) -> Result<Graph> {
    let (nodes, edges) = (nodes.as_ref(), edges.as_ref());
    tracing::debug!(nodes = %nodes.display(), edges = %edges.display(), "Loading scene");
    graph_from_readers(open(nodes)?, open(edges)?, policy)
}

pub fn load_queries(path: impl AsRef<Path>) -> Result<Vec<(NodeId, NodeId)>> {
    read_queries(open(path.as_ref())?)
}
