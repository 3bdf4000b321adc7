use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use flownet_graph::{bfs, SearchResult};
use serde::Serialize;

use crate::commands::print_json;
use crate::store::{self, Stored};

#[derive(Args, Debug)]
pub struct BfsArgs {
    /// Graph file to traverse (`.json`, `.bin` or `.max`).
    #[arg(long = "in")]
    pub input: PathBuf,
    /// Read `.json`/`.bin` input as a flow network.
    #[arg(long)]
    pub flow: bool,
    /// Include the discovery/finish ticks of every vertex.
    #[arg(long)]
    pub full: bool,
}

#[derive(Debug, Serialize)]
struct BfsReport {
    visited: usize,
    roots: Vec<u64>,
    ticks: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    table: Option<Vec<TickRow>>,
}

#[derive(Debug, Serialize)]
struct TickRow {
    vertex: u64,
    discovery: u64,
    finish: u64,
    parent: Option<u64>,
}

pub fn run(args: &BfsArgs) -> Result<(), Box<dyn Error>> {
    let result = match store::load(&args.input, args.flow)? {
        Stored::Plain(graph) => bfs(&graph)?,
        Stored::Flow(network) => bfs(&network)?,
    };
    print_json(&report(&result, args.full))
}

fn report(result: &SearchResult, full: bool) -> BfsReport {
    let table = full.then(|| {
        let mut rows: Vec<TickRow> = result
            .iter()
            .map(|(vertex, visit)| TickRow {
                vertex: vertex.as_raw(),
                discovery: visit.discovery,
                finish: visit.finish,
                parent: visit.parent.map(|parent| parent.as_raw()),
            })
            .collect();
        rows.sort_by_key(|row| row.vertex);
        rows
    });
    BfsReport {
        visited: result.len(),
        roots: result.roots().iter().map(|root| root.as_raw()).collect(),
        ticks: result.ticks(),
        table,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flownet_graph::{Graph, GraphProperties};

    #[test]
    fn table_is_sorted_by_vertex() {
        let mut graph: Graph = Graph::new(GraphProperties::directed());
        let v: Vec<_> = (0..4).map(|_| graph.add_vertex()).collect();
        graph.add_edge(v[2], v[0]).unwrap();
        graph.add_edge(v[0], v[3]).unwrap();
        let result = bfs(&graph).unwrap();

        let summary = report(&result, false);
        assert!(summary.table.is_none());
        assert_eq!(summary.visited, 4);
        assert_eq!(summary.ticks, 8);

        let full = report(&result, true);
        let rows = full.table.unwrap();
        let order: Vec<u64> = rows.iter().map(|row| row.vertex).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert_eq!(rows[3].parent, Some(0));
    }
}
