use flownet_core::errors::{ErrorInfo, GraphError};
use flownet_core::rng::RngHandle;
use flownet_core::VertexId;
use rand::Rng;

use crate::flow::FlowGraph;
use crate::graph::{EdgeInsert, Graph};
use crate::properties::{FlowProperties, GraphProperties};

/// Substream used to draw arc capacities, kept apart from the topology stream.
const CAPACITY_SUBSTREAM: u64 = 0xCA9A;

/// Generates a random graph with exactly `vertex_count` vertices and
/// `edge_count` distinct edges.
///
/// Endpoint pairs are sampled uniformly; self-loops (unless allowed) and pairs
/// that already exist are rejected and resampled, never reported. The same
/// seed always yields the same graph.
pub fn gen_random<V, E>(
    vertex_count: usize,
    edge_count: usize,
    properties: GraphProperties,
    rng: &mut RngHandle,
) -> Result<Graph<V, E>, GraphError> {
    let capacity = max_edges(vertex_count, &properties);
    check_counts(vertex_count, edge_count, capacity)?;

    let mut graph = Graph::new(properties);
    let vertices: Vec<VertexId> = (0..vertex_count).map(|_| graph.add_vertex()).collect();

    let mut rejected = 0usize;
    for _ in 0..edge_count {
        loop {
            let from = vertices[rng.gen_range(0..vertex_count)];
            let to = vertices[rng.gen_range(0..vertex_count)];
            if from == to && !properties.self_loops_allowed {
                rejected += 1;
                continue;
            }
            match graph.add_edge(from, to)? {
                EdgeInsert::Created(_) => break,
                EdgeInsert::Existing(_) => rejected += 1,
            }
        }
    }

    tracing::debug!(
        vertices = vertex_count,
        edges = edge_count,
        rejected,
        seed = rng.seed(),
        "generated random graph"
    );
    Ok(graph)
}

/// Generates a random flow network with a source and a sink.
///
/// The source is the first vertex and the sink the last. The generator never
/// samples an arc into the source or out of the sink. Capacities are integers
/// drawn uniformly from `1..=max_capacity` on a substream of `rng`; every arc
/// starts with zero flow.
pub fn gen_random_flow(
    vertex_count: usize,
    edge_count: usize,
    max_capacity: u32,
    properties: FlowProperties,
    rng: &mut RngHandle,
) -> Result<FlowGraph, GraphError> {
    if vertex_count < 2 {
        return Err(GraphError::InvalidParameters(
            ErrorInfo::new("too-few-vertices", "a flow network needs a source and a sink")
                .with_context("vertices", vertex_count),
        ));
    }
    if max_capacity == 0 {
        return Err(GraphError::invalid_parameters(
            "zero-capacity",
            "arc capacities are drawn from 1..=max_capacity",
        ));
    }
    let capacity = max_flow_arcs(vertex_count, properties.reverse_edges_allowed);
    check_counts(vertex_count, edge_count, capacity)?;

    let mut graph = FlowGraph::new(properties);
    let vertices: Vec<VertexId> = (0..vertex_count).map(|_| graph.add_vertex()).collect();
    let source = vertices[0];
    let sink = vertices[vertex_count - 1];
    let mut capacities = rng.substream(CAPACITY_SUBSTREAM);

    let mut rejected = 0usize;
    for _ in 0..edge_count {
        loop {
            let from = vertices[rng.gen_range(0..vertex_count)];
            let to = vertices[rng.gen_range(0..vertex_count)];
            if from == to || to == source || from == sink {
                rejected += 1;
                continue;
            }
            let amount = f64::from(capacities.gen_range(1..=max_capacity));
            if graph.add_edge(from, to, 0.0, amount)? {
                break;
            }
            rejected += 1;
        }
    }
    graph.set_source(source)?;
    graph.set_sink(sink)?;

    tracing::debug!(
        vertices = vertex_count,
        edges = edge_count,
        rejected,
        seed = rng.seed(),
        "generated random flow network"
    );
    Ok(graph)
}

fn check_counts(vertex_count: usize, edge_count: usize, capacity: u128) -> Result<(), GraphError> {
    if edge_count < vertex_count.saturating_sub(1) {
        return Err(GraphError::InvalidParameters(
            ErrorInfo::new("too-few-edges", "edge count must be at least vertex count - 1")
                .with_context("vertices", vertex_count)
                .with_context("edges", edge_count),
        ));
    }
    if edge_count as u128 > capacity {
        return Err(GraphError::InvalidParameters(
            ErrorInfo::new("too-many-edges", "not enough distinct vertex pairs for the edges")
                .with_context("vertices", vertex_count)
                .with_context("edges", edge_count)
                .with_context("max_edges", capacity)
                .with_hint("lower the edge count or allow self-loops"),
        ));
    }
    Ok(())
}

/// Number of distinct edges a graph with these properties can hold.
fn max_edges(vertex_count: usize, properties: &GraphProperties) -> u128 {
    let n = vertex_count as u128;
    let pairs = if properties.directed {
        n * n.saturating_sub(1)
    } else {
        n * n.saturating_sub(1) / 2
    };
    if properties.self_loops_allowed {
        pairs + n
    } else {
        pairs
    }
}

/// Number of arcs a generated flow network can hold once arcs into the
/// source and out of the sink are excluded.
fn max_flow_arcs(vertex_count: usize, reverse_edges_allowed: bool) -> u128 {
    let inner = (vertex_count as u128).saturating_sub(2);
    if reverse_edges_allowed {
        // inner <-> inner both ways, source -> inner, inner -> sink, source -> sink
        inner * inner.saturating_sub(1) + 2 * inner + 1
    } else {
        inner * inner.saturating_sub(1) / 2 + 2 * inner + 1
    }
}
