//! Error types for scene loading and queries

use crate::{NodeId, Weight};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("line {line}: invalid {field} {value:?}")]
    Parse {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: missing {field}")]
    MissingField { line: u64, field: &'static str },

    #[error("node ids must be positive, got {0}")]
    InvalidNodeId(NodeId),

    #[error("node {0} is declared more than once")]
    DuplicateNode(NodeId),

    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("edge {from} -- {to} has invalid cost {cost}")]
    InvalidWeight {
        from: NodeId,
        to: NodeId,
        cost: Weight,
    },

    #[error("node {id} has invalid heuristic {value}")]
    InvalidHeuristic { id: NodeId, value: Weight },

    #[error("node {id} has a non-finite position")]
    InvalidPosition { id: NodeId },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Stream(#[from] std::io::Error),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
