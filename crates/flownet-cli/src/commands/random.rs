use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use flownet_core::rng::RngHandle;
use flownet_graph::{canonical_hash, flow_canonical_hash, gen_random, gen_random_flow, Graph};
use serde::Serialize;

use crate::commands::print_json;
use crate::config::GeneratorConfig;
use crate::store;

#[derive(Args, Debug)]
pub struct RandomArgs {
    /// Optional YAML or JSON generator config; flags below override it.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Number of vertices.
    #[arg(long)]
    pub vertices: Option<usize>,
    /// Number of edges.
    #[arg(long)]
    pub edges: Option<usize>,
    /// Master seed for the generator.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Generate a directed graph.
    #[arg(long)]
    pub directed: bool,
    /// Allow self-loops.
    #[arg(long)]
    pub self_loops: bool,
    /// Generate a flow network with vertex 0 as source and the last vertex as sink.
    #[arg(long)]
    pub flow: bool,
    /// Upper bound of the integer capacities drawn for flow networks.
    #[arg(long)]
    pub max_capacity: Option<u32>,
    /// Forbid storing both `(u, v)` and `(v, u)` in flow networks.
    #[arg(long)]
    pub no_reverse_edges: bool,
    /// Output file; the extension selects `.json`, `.bin` or `.max`.
    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Debug, Serialize)]
struct GeneratedReport {
    kind: &'static str,
    vertices: usize,
    edges: usize,
    seed: u64,
    hash: String,
    out: PathBuf,
}

pub fn run(args: &RandomArgs) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(args)?;
    tracing::debug!(?config, "resolved generator config");
    let mut rng = RngHandle::from_seed(config.seed);

    let report = if config.flow {
        let network = gen_random_flow(
            config.vertices,
            config.edges,
            config.max_capacity,
            config.flow_properties(),
            &mut rng,
        )?;
        store::save_flow(&network, &args.out)?;
        GeneratedReport {
            kind: "flow",
            vertices: network.num_vertices(),
            edges: network.num_edges(),
            seed: config.seed,
            hash: flow_canonical_hash(&network)?,
            out: args.out.clone(),
        }
    } else {
        let graph: Graph = gen_random(
            config.vertices,
            config.edges,
            config.graph_properties(),
            &mut rng,
        )?;
        store::save_plain(&graph, &args.out)?;
        GeneratedReport {
            kind: "graph",
            vertices: graph.num_vertices(),
            edges: graph.num_edges(),
            seed: config.seed,
            hash: canonical_hash(&graph)?,
            out: args.out.clone(),
        }
    };
    print_json(&report)
}

fn resolve_config(args: &RandomArgs) -> Result<GeneratorConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(vertices) = args.vertices {
        config.vertices = vertices;
    }
    if let Some(edges) = args.edges {
        config.edges = edges;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(max_capacity) = args.max_capacity {
        config.max_capacity = max_capacity;
    }
    config.directed |= args.directed;
    config.self_loops |= args.self_loops;
    config.flow |= args.flow;
    if args.no_reverse_edges {
        config.reverse_edges = false;
    }
    Ok(config)
}
