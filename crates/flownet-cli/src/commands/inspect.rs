use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use flownet_graph::{canonical_hash, flow_canonical_hash, IdPolicy};
use serde::Serialize;

use crate::commands::print_json;
use crate::store::{self, Stored};

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Graph file to inspect (`.json`, `.bin` or `.max`).
    #[arg(long = "in")]
    pub input: PathBuf,
    /// Read `.json`/`.bin` input as a flow network.
    #[arg(long)]
    pub flow: bool,
}

#[derive(Debug, Serialize)]
struct InspectReport {
    kind: &'static str,
    vertices: usize,
    edges: usize,
    directed: bool,
    self_loops_allowed: bool,
    reverse_edges_allowed: Option<bool>,
    id_policy: IdPolicy,
    source: Option<u64>,
    sink: Option<u64>,
    hash: String,
}

pub fn run(args: &InspectArgs) -> Result<(), Box<dyn Error>> {
    let report = match store::load(&args.input, args.flow)? {
        Stored::Plain(graph) => InspectReport {
            kind: "graph",
            vertices: graph.num_vertices(),
            edges: graph.num_edges(),
            directed: graph.directed(),
            self_loops_allowed: graph.self_loops_allowed(),
            reverse_edges_allowed: None,
            id_policy: graph.properties().id_policy,
            source: None,
            sink: None,
            hash: canonical_hash(&graph)?,
        },
        Stored::Flow(network) => InspectReport {
            kind: "flow",
            vertices: network.num_vertices(),
            edges: network.num_edges(),
            directed: true,
            self_loops_allowed: false,
            reverse_edges_allowed: Some(network.properties().reverse_edges_allowed),
            id_policy: network.properties().id_policy,
            source: network.source().map(|id| id.as_raw()),
            sink: network.sink().map(|id| id.as_raw()),
            hash: flow_canonical_hash(&network)?,
        },
    };
    print_json(&report)
}
