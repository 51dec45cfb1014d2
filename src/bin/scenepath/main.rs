mod batch;

use scenepath::{
    a_star_with, input, Emission, Euclidean, Graph, HeuristicDistance, NodeId, PathResult,
    SearchScratch, StoredHeuristic, UnknownEdgePolicy, ZeroHeuristic,
};

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};

use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(author, version, about = "Least-cost route between two waypoints of a scene")]
struct Cli {
    /// Directory containing nodes.csv and edges.csv
    #[arg(long)]
    scene: Option<PathBuf>,
    /// Node file, overrides the one in --scene
    #[arg(long)]
    nodes: Option<PathBuf>,
    /// Edge file, overrides the one in --scene
    #[arg(long)]
    edges: Option<PathBuf>,
    #[arg(long, default_value_t = 1)]
    start: u32,
    /// Defaults to the largest node id in the scene
    #[arg(long)]
    goal: Option<u32>,
    #[arg(long, default_value = "path.csv")]
    output: PathBuf,
    #[arg(long, value_enum, default_value_t = HeuristicKind::Stored)]
    heuristic: HeuristicKind,
    #[arg(long, value_enum, default_value_t = EdgePolicy::Reject)]
    unknown_edges: EdgePolicy,
    /// Write a Graphviz rendering of the scene and the path
    #[arg(long)]
    output_dot: Option<PathBuf>,
    /// File of start,goal pairs to run instead of a single query
    #[arg(long)]
    queries: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum HeuristicKind {
    /// Cost-to-go column of the node file
    Stored,
    /// Straight-line distance to the goal
    Euclidean,
    /// No estimate, plain Dijkstra
    Zero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EdgePolicy {
    Reject,
    Drop,
}

impl From<EdgePolicy> for UnknownEdgePolicy {
    fn from(p: EdgePolicy) -> Self {
        match p {
            EdgePolicy::Reject => UnknownEdgePolicy::Reject,
            EdgePolicy::Drop => UnknownEdgePolicy::Drop,
        }
    }
}

fn query(
    scratch: &mut SearchScratch,
    graph: &Graph,
    start: NodeId,
    goal: NodeId,
    kind: HeuristicKind,
) -> scenepath::Result<PathResult> {
    fn go(
        scratch: &mut SearchScratch,
        graph: &Graph,
        start: NodeId,
        goal: NodeId,
        h: impl HeuristicDistance,
    ) -> scenepath::Result<PathResult> {
        a_star_with(scratch, graph, start, goal, h, None)
    }

    match kind {
        HeuristicKind::Stored => go(scratch, graph, start, goal, StoredHeuristic),
        HeuristicKind::Euclidean => {
            let h = Euclidean::towards(graph, goal)?;
            go(scratch, graph, start, goal, h)
        }
        HeuristicKind::Zero => go(scratch, graph, start, goal, ZeroHeuristic),
    }
}

const EXIT_NO_PATH: u8 = 2;

/// 0 when a path was written, [`EXIT_NO_PATH`] otherwise. Errors exit with 1 from `main`.
fn exit_status(emission: &Emission) -> u8 {
    match emission {
        Emission::Path(_) => 0,
        Emission::NoPath | Emission::Cancelled => EXIT_NO_PATH,
    }
}

fn scene_files(cli: &Cli) -> anyhow::Result<(PathBuf, PathBuf)> {
    let pick = |explicit: &Option<PathBuf>, name: &str| match (explicit, &cli.scene) {
        (Some(p), _) => Ok(p.clone()),
        (None, Some(dir)) => Ok(dir.join(name)),
        (None, None) => bail!("Either --scene or --{} is required", name.trim_end_matches(".csv")),
    };
    Ok((pick(&cli.nodes, "nodes.csv")?, pick(&cli.edges, "edges.csv")?))
}

fn run_single(cli: &Cli, graph: &Graph) -> anyhow::Result<ExitCode> {
    let start = NodeId(cli.start);
    let goal = match cli.goal {
        Some(g) => NodeId(g),
        None => graph.max_id().context("The scene has no nodes")?,
    };

    let mut scratch = SearchScratch::new(graph);
    let result = query(&mut scratch, graph, start, goal, cli.heuristic)
        .with_context(|| format!("Query {start} -> {goal} failed"))?;

    if let (Some(dot), Some(path)) = (&cli.output_dot, result.path()) {
        std::fs::write(dot, scenepath::to_dot_with_path(graph, path))
            .with_context(|| format!("Failed to write {}", dot.display()))?;
    }

    let emission = scenepath::write_path_file(&cli.output, &result)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    let status = exit_status(&emission);
    match emission {
        Emission::Path(ids) => {
            let cost = result.path().map_or(0.0, |p| p.cost());
            tracing::info!(%start, %goal, cost, "Wrote {}", cli.output.display());
            println!("{ids}");
        }
        Emission::NoPath | Emission::Cancelled => println!("No path exists."),
    }
    Ok(ExitCode::from(status))
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let (nodes, edges) = scene_files(&cli)?;
    let graph = input::load_graph(&nodes, &edges, cli.unknown_edges.into()).with_context(|| {
        format!(
            "Failed to load scene from {} and {}",
            nodes.display(),
            edges.display()
        )
    })?;
    tracing::info!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        "Loaded scene"
    );

    if cli.output_dot.is_some() && cli.queries.is_some() {
        tracing::warn!("--output-dot is ignored in batch mode");
    }

    match &cli.queries {
        Some(queries) => batch::run(&cli, &graph, queries),
        None => run_single(&cli, &graph),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("scenepath=info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
