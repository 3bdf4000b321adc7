use flownet_core::errors::{ErrorInfo, GraphError};
use flownet_core::{Payload, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::flow::{FlowGraph, FlowVertex};
use crate::graph::{EdgeInsert, Graph};
use crate::properties::{FlowProperties, GraphProperties};

/// Schema version written into every document.
pub const DOCUMENT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Structured form of a [`Graph`], independent of any carrier format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument<V, E> {
    /// Schema the document was written with.
    pub schema_version: SchemaVersion,
    /// Construction-time properties.
    pub properties: GraphProperties,
    /// Lowest raw id a fresh monotonic allocation may use.
    pub next_id: u64,
    /// Every live vertex.
    pub vertices: Vec<VertexEntry<V>>,
    /// Every stored edge, in stored direction.
    pub edges: Vec<EdgeEntry<E>>,
}

/// One vertex of a [`GraphDocument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexEntry<V> {
    /// Raw vertex id.
    pub id: u64,
    /// Attached payload, if any.
    pub payload: Option<V>,
}

/// One edge of a [`GraphDocument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeEntry<E> {
    /// Raw id of the endpoint the edge is stored under.
    pub from: u64,
    /// Raw id of the other endpoint.
    pub to: u64,
    /// Attached payload, if any.
    pub payload: Option<E>,
}

/// Structured form of a [`FlowGraph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowDocument {
    /// Schema the document was written with.
    pub schema_version: SchemaVersion,
    /// Construction-time properties.
    pub properties: FlowProperties,
    /// Lowest raw id a fresh monotonic allocation may use.
    pub next_id: u64,
    /// Raw id of the designated source.
    pub source: Option<u64>,
    /// Raw id of the designated sink.
    pub sink: Option<u64>,
    /// Every vertex with its flow state.
    pub vertices: Vec<FlowVertexEntry>,
    /// Every arc.
    pub edges: Vec<ArcEntry>,
}

/// One vertex of a [`FlowDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowVertexEntry {
    /// Raw vertex id.
    pub id: u64,
    /// Height label.
    pub height: i64,
    /// Excess.
    #[serde(with = "lossless_f64")]
    pub excess: f64,
}

/// One arc of a [`FlowDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcEntry {
    /// Raw id of the tail.
    pub from: u64,
    /// Raw id of the head.
    pub to: u64,
    /// Routed flow.
    #[serde(with = "lossless_f64")]
    pub flow: f64,
    /// Capacity.
    #[serde(with = "lossless_f64")]
    pub capacity: f64,
}

impl<V: Payload, E: Payload> GraphDocument<V, E> {
    /// Captures the full structure of `graph`.
    pub fn from_graph(graph: &Graph<V, E>) -> Self {
        Self {
            schema_version: DOCUMENT_SCHEMA,
            properties: *graph.properties(),
            next_id: graph.next_raw(),
            vertices: graph
                .vertices()
                .map(|vertex| VertexEntry {
                    id: vertex.id.as_raw(),
                    payload: vertex.payload.cloned(),
                })
                .collect(),
            edges: graph
                .edges()
                .map(|edge| EdgeEntry {
                    from: edge.from.as_raw(),
                    to: edge.to.as_raw(),
                    payload: edge.payload.cloned(),
                })
                .collect(),
        }
    }

    /// Rebuilds the graph, validating every invariant the document must satisfy.
    pub fn into_graph(self) -> Result<Graph<V, E>, GraphError> {
        ensure_schema(&self.schema_version)?;
        let mut graph = Graph::new(self.properties);
        for vertex in self.vertices {
            graph.insert_vertex_with_id(vertex.id, vertex.payload)?;
        }
        for edge in self.edges {
            let from = listed_endpoint(graph.vertex(edge.from), edge.from, edge.to)?;
            let to = listed_endpoint(graph.vertex(edge.to), edge.from, edge.to)?;
            let inserted = match edge.payload {
                Some(payload) => graph.add_edge_with(from, to, payload),
                None => graph.add_edge(from, to),
            }
            .map_err(|err| rejected_edge(err, edge.from, edge.to))?;
            if let EdgeInsert::Existing(_) = inserted {
                return Err(duplicate_edge(edge.from, edge.to));
            }
        }
        graph.reserve_through(self.next_id)?;
        tracing::debug!(
            vertices = graph.num_vertices(),
            edges = graph.num_edges(),
            "decoded graph document"
        );
        Ok(graph)
    }
}

impl FlowDocument {
    /// Captures the full structure of `graph`.
    pub fn from_flow(graph: &FlowGraph) -> Self {
        Self {
            schema_version: DOCUMENT_SCHEMA,
            properties: *graph.properties(),
            next_id: graph.next_raw(),
            source: graph.source().map(|id| id.as_raw()),
            sink: graph.sink().map(|id| id.as_raw()),
            vertices: graph
                .vertices()
                .map(|vertex| FlowVertexEntry {
                    id: vertex.id.as_raw(),
                    height: vertex.height,
                    excess: vertex.excess,
                })
                .collect(),
            edges: graph
                .arcs()
                .map(|arc| ArcEntry {
                    from: arc.from.as_raw(),
                    to: arc.to.as_raw(),
                    flow: arc.flow,
                    capacity: arc.capacity,
                })
                .collect(),
        }
    }

    /// Rebuilds the flow network, validating every invariant.
    pub fn into_flow(self) -> Result<FlowGraph, GraphError> {
        ensure_schema(&self.schema_version)?;
        let mut graph = FlowGraph::new(self.properties);
        for vertex in self.vertices {
            graph.insert_vertex_with_id(
                vertex.id,
                FlowVertex {
                    height: vertex.height,
                    excess: vertex.excess,
                },
            )?;
        }
        for arc in self.edges {
            let from = listed_endpoint(graph.vertex(arc.from), arc.from, arc.to)?;
            let to = listed_endpoint(graph.vertex(arc.to), arc.from, arc.to)?;
            if !graph.add_edge(from, to, arc.flow, arc.capacity)? {
                return Err(duplicate_edge(arc.from, arc.to)
                    .with_context("reason", "duplicate, self-loop or forbidden reverse arc"));
            }
        }
        graph.restore_terminals(self.source, self.sink)?;
        graph.reserve_through(self.next_id)?;
        tracing::debug!(
            vertices = graph.num_vertices(),
            edges = graph.num_edges(),
            "decoded flow document"
        );
        Ok(graph)
    }
}

/// Encodes a graph into its structured document.
pub fn encode_graph<V: Payload, E: Payload>(graph: &Graph<V, E>) -> GraphDocument<V, E> {
    GraphDocument::from_graph(graph)
}

/// Decodes a structured document into a graph.
pub fn decode_graph<V: Payload, E: Payload>(
    document: GraphDocument<V, E>,
) -> Result<Graph<V, E>, GraphError> {
    document.into_graph()
}

/// Serializes the graph to a JSON string.
///
/// Fails with `unrepresentable-json` when a payload has no JSON form that
/// reads back, such as a non-finite `f64` (written by `serde_json` as `null`).
pub fn graph_to_json<V: Payload, E: Payload>(graph: &Graph<V, E>) -> Result<String, GraphError> {
    let json = serde_json::to_string_pretty(&GraphDocument::from_graph(graph))
        .map_err(|err| serde_failure("serialize-json", err))?;
    if json.contains("null") {
        serde_json::from_str::<GraphDocument<V, E>>(&json)
            .map_err(|err| serde_failure("unrepresentable-json", err))?;
    }
    Ok(json)
}

/// Restores a graph from a JSON string.
pub fn graph_from_json<V: Payload, E: Payload>(json: &str) -> Result<Graph<V, E>, GraphError> {
    let document: GraphDocument<V, E> =
        serde_json::from_str(json).map_err(|err| serde_failure("deserialize-json", err))?;
    document.into_graph()
}

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn graph_to_bytes<V: Payload, E: Payload>(graph: &Graph<V, E>) -> Result<Vec<u8>, GraphError> {
    bincode::serialize(&GraphDocument::from_graph(graph))
        .map_err(|err| serde_failure("serialize-bytes", err))
}

/// Restores a graph from its binary representation.
pub fn graph_from_bytes<V: Payload, E: Payload>(bytes: &[u8]) -> Result<Graph<V, E>, GraphError> {
    let document: GraphDocument<V, E> =
        bincode::deserialize(bytes).map_err(|err| serde_failure("deserialize-bytes", err))?;
    document.into_graph()
}

/// Serializes a flow network to a JSON string.
pub fn flow_to_json(graph: &FlowGraph) -> Result<String, GraphError> {
    serde_json::to_string_pretty(&FlowDocument::from_flow(graph))
        .map_err(|err| serde_failure("serialize-json", err))
}

/// Restores a flow network from a JSON string.
pub fn flow_from_json(json: &str) -> Result<FlowGraph, GraphError> {
    let document: FlowDocument =
        serde_json::from_str(json).map_err(|err| serde_failure("deserialize-json", err))?;
    document.into_flow()
}

/// Serializes a flow network to bytes using `bincode`.
pub fn flow_to_bytes(graph: &FlowGraph) -> Result<Vec<u8>, GraphError> {
    bincode::serialize(&FlowDocument::from_flow(graph))
        .map_err(|err| serde_failure("serialize-bytes", err))
}

/// Restores a flow network from bytes.
pub fn flow_from_bytes(bytes: &[u8]) -> Result<FlowGraph, GraphError> {
    let document: FlowDocument =
        bincode::deserialize(bytes).map_err(|err| serde_failure("deserialize-bytes", err))?;
    document.into_flow()
}

/// Flow floats in human-readable carriers: finite values stay numbers,
/// non-finite ones are written as `"inf"`, `"-inf"` or `"NaN"`. Binary
/// carriers keep the raw `f64`.
mod lossless_f64 {
    use serde::de::{Error, Unexpected};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() || !serializer.is_human_readable() {
            return serializer.serialize_f64(*value);
        }
        let label = if value.is_nan() {
            "NaN"
        } else if value.is_sign_positive() {
            "inf"
        } else {
            "-inf"
        };
        serializer.serialize_str(label)
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Written {
        Number(f64),
        Label(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        if !deserializer.is_human_readable() {
            return f64::deserialize(deserializer);
        }
        match Written::deserialize(deserializer)? {
            Written::Number(value) => Ok(value),
            Written::Label(label) => match label.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "NaN" => Ok(f64::NAN),
                other => Err(D::Error::invalid_value(
                    Unexpected::Str(other),
                    &"a number, \"inf\", \"-inf\" or \"NaN\"",
                )),
            },
        }
    }
}

fn ensure_schema(version: &SchemaVersion) -> Result<(), GraphError> {
    if DOCUMENT_SCHEMA.reads(version) {
        return Ok(());
    }
    Err(GraphError::Malformed(
        ErrorInfo::new("unsupported-schema", "document schema is not readable")
            .with_context(
                "found",
                format!("{}.{}.{}", version.major, version.minor, version.patch),
            )
            .with_context(
                "supported",
                format!("{}.{}.x", DOCUMENT_SCHEMA.major, DOCUMENT_SCHEMA.minor),
            ),
    ))
}

fn listed_endpoint<T>(lookup: Result<T, GraphError>, from: u64, to: u64) -> Result<T, GraphError> {
    lookup.map_err(|_| {
        GraphError::Malformed(
            ErrorInfo::new("dangling-edge", "edge endpoint is not a listed vertex")
                .with_context("from", from)
                .with_context("to", to),
        )
    })
}

fn rejected_edge(err: GraphError, from: u64, to: u64) -> GraphError {
    GraphError::Malformed(
        ErrorInfo::new("rejected-edge", err.info().message.clone())
            .with_context("from", from)
            .with_context("to", to)
            .with_context("cause", err.info().code.clone()),
    )
}

fn duplicate_edge(from: u64, to: u64) -> GraphError {
    GraphError::Malformed(
        ErrorInfo::new("duplicate-edge", "edge is listed more than once")
            .with_context("from", from)
            .with_context("to", to),
    )
}

fn serde_failure(code: &str, err: impl std::fmt::Display) -> GraphError {
    GraphError::malformed(code, err.to_string())
}
