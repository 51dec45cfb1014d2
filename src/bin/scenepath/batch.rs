use crate::{query, Cli, EXIT_NO_PATH};

use scenepath::{input, Error, Graph, NodeId, PathResult, SearchScratch};

use anyhow::Context;

use std::path::Path;
use std::process::ExitCode;

/// One output row: `start,goal,cost,ids` with `;`-separated ids. Pairs without
/// a path leave cost and ids empty.
fn row(start: NodeId, goal: NodeId, result: &PathResult) -> [String; 4] {
    let (cost, ids) = match result.path() {
        Some(path) => (
            path.cost().to_string(),
            path.ids().map(|id| id.to_string()).collect::<Vec<_>>().join(";"),
        ),
        None => (String::new(), String::new()),
    };
    [start.to_string(), goal.to_string(), cost, ids]
}

fn exit_status(missing: usize) -> u8 {
    if missing == 0 {
        0
    } else {
        EXIT_NO_PATH
    }
}

/// Fails on the first pair naming a node the scene does not have.
fn check_pairs(graph: &Graph, pairs: &[(NodeId, NodeId)]) -> Result<(), Error> {
    match pairs
        .iter()
        .flat_map(|&(start, goal)| [start, goal])
        .find(|&id| !graph.contains(id))
    {
        Some(id) => Err(Error::UnknownNode(id)),
        None => Ok(()),
    }
}

fn solve_all(
    cli: &Cli,
    graph: &Graph,
    pairs: &[(NodeId, NodeId)],
) -> anyhow::Result<(Vec<[String; 4]>, usize)> {
    let pg = indicatif::ProgressBar::new(pairs.len() as u64);
    let mut scratch = SearchScratch::new(graph);
    let mut rows = Vec::with_capacity(pairs.len());
    let mut missing = 0;
    for (idx, &(start, goal)) in pairs.iter().enumerate() {
        pg.inc(1);
        let result = query(&mut scratch, graph, start, goal, cli.heuristic)
            .with_context(|| format!("Query {} ({start} -> {goal}) failed", idx + 1))?;
        if !result.is_found() {
            missing += 1;
            pg.println(format!(
                "[{}/{}] no path from {} to {}",
                idx + 1,
                pairs.len(),
                start,
                goal
            ));
        }
        rows.push(row(start, goal, &result));
    }
    pg.finish_and_clear();
    Ok((rows, missing))
}

/// Runs every `start,goal` pair in `queries`. The output file is only created
/// once every pair has been answered.
pub fn run(cli: &Cli, graph: &Graph, queries: &Path) -> anyhow::Result<ExitCode> {
    let pairs = input::load_queries(queries)
        .with_context(|| format!("Failed to read queries from {}", queries.display()))?;
    check_pairs(graph, &pairs)
        .with_context(|| format!("Bad query in {}", queries.display()))?;

    println!("Query count: {}", pairs.len());
    let (rows, missing) = solve_all(cli, graph, &pairs)?;

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;
    for r in &rows {
        writer.write_record(r)?;
    }
    writer.flush()?;

    tracing::info!(
        queries = pairs.len(),
        missing,
        "Wrote {}",
        cli.output.display()
    );

    Ok(ExitCode::from(exit_status(missing)))
}
