use flownet_core::errors::GraphError;
use flownet_core::Payload;
use sha2::{Digest, Sha256};

use crate::flow::FlowGraph;
use crate::graph::Graph;
use crate::properties::{GraphProperties, IdPolicy};

/// Computes the canonical structural hash for the provided graph.
///
/// Vertices and edges are sorted by raw id before hashing, so two graphs with
/// the same ids, edges and payloads hash equally regardless of the order in
/// which they were built.
pub fn canonical_hash<V: Payload, E: Payload>(graph: &Graph<V, E>) -> Result<String, GraphError> {
    let mut hasher = Sha256::new();
    hasher.update(b"flownet-graph");
    encode_properties(graph.properties(), &mut hasher);
    update_graph(graph, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Computes the canonical structural hash of a flow network, terminals included.
pub fn flow_canonical_hash(graph: &FlowGraph) -> Result<String, GraphError> {
    let mut hasher = Sha256::new();
    hasher.update(b"flownet-flow");
    if graph.properties().reverse_edges_allowed {
        hasher.update(b"reverse:on");
    } else {
        hasher.update(b"reverse:off");
    }
    encode_policy(graph.properties().id_policy, &mut hasher);
    encode_terminal("source", graph.source().map(|id| id.as_raw()), &mut hasher);
    encode_terminal("sink", graph.sink().map(|id| id.as_raw()), &mut hasher);
    update_graph(graph.graph(), &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

fn update_graph<V: Payload, E: Payload>(
    graph: &Graph<V, E>,
    hasher: &mut Sha256,
) -> Result<(), GraphError> {
    let mut vertices = Vec::with_capacity(graph.num_vertices());
    for vertex in graph.vertices() {
        vertices.push((vertex.id.as_raw(), payload_bytes(vertex.payload)?));
    }
    vertices.sort();
    hasher.update((vertices.len() as u64).to_le_bytes());
    for (raw, payload) in vertices {
        hasher.update(raw.to_le_bytes());
        update_slice(&payload, hasher);
    }

    let mut edges = Vec::with_capacity(graph.num_edges());
    for edge in graph.edges() {
        edges.push((
            edge.from.as_raw(),
            edge.to.as_raw(),
            payload_bytes(edge.payload)?,
        ));
    }
    edges.sort();
    hasher.update((edges.len() as u64).to_le_bytes());
    for (from, to, payload) in edges {
        hasher.update(from.to_le_bytes());
        hasher.update(to.to_le_bytes());
        update_slice(&payload, hasher);
    }
    Ok(())
}

fn payload_bytes<P: Payload>(payload: Option<&P>) -> Result<Vec<u8>, GraphError> {
    bincode::serialize(&payload)
        .map_err(|err| GraphError::malformed("payload-encode", err.to_string()))
}

fn encode_properties(properties: &GraphProperties, hasher: &mut Sha256) {
    if properties.directed {
        hasher.update(b"directed");
    } else {
        hasher.update(b"undirected");
    }
    if properties.self_loops_allowed {
        hasher.update(b"loops:on");
    } else {
        hasher.update(b"loops:off");
    }
    encode_policy(properties.id_policy, hasher);
}

fn encode_policy(policy: IdPolicy, hasher: &mut Sha256) {
    match policy {
        IdPolicy::Monotonic => hasher.update(b"ids:monotonic"),
        IdPolicy::Recycle => hasher.update(b"ids:recycle"),
    }
}

fn encode_terminal(label: &str, raw: Option<u64>, hasher: &mut Sha256) {
    hasher.update(label.as_bytes());
    match raw {
        Some(raw) => {
            hasher.update(b":some");
            hasher.update(raw.to_le_bytes());
        }
        None => hasher.update(b":none"),
    }
}

fn update_slice(bytes: &[u8], hasher: &mut Sha256) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}
