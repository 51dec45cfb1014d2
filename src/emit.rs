use crate::astar::PathResult;
use crate::error::{Error, Result};

use std::io::Write;
use std::path::Path;

/// What a query produced, ready to hand to a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// Comma separated node ids, start first
    Path(String),
    NoPath,
    Cancelled,
}

pub fn emit(result: &PathResult) -> Emission {
    match result {
        PathResult::Found(path) => Emission::Path(path.to_string()),
        PathResult::NotFound => Emission::NoPath,
        PathResult::Cancelled => Emission::Cancelled,
    }
}

/// Writes the path as a single CSV record. Nothing is written unless a path
/// was found.
pub fn write_path<W: Write>(w: W, result: &PathResult) -> Result<Emission> {
    if let Some(path) = result.path() {
        let mut writer = csv::Writer::from_writer(w);
        writer.write_record(path.ids().map(|id| id.to_string()))?;
        writer.flush()?;
    }
    Ok(emit(result))
}

/// Like [`write_path`], but the file is only created when there is a path to put in it.
pub fn write_path_file(path: impl AsRef<Path>, result: &PathResult) -> Result<Emission> {
    if !result.is_found() {
        return Ok(emit(result));
    }
    let path = path.as_ref();
    let file = std::fs::File::create(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_path(file, result)
}
