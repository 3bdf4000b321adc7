#![deny(missing_docs)]

//! Mutable graph and flow-network engine implementing the `flownet-core` contracts.
//!
//! [`Graph`] stores directed or undirected graphs with optional self-loops and
//! typed payloads; [`FlowGraph`] layers capacity, flow, height, excess and
//! source/sink designation on top of it. Both support breadth-first timestamp
//! traversal, structured JSON/binary documents and a canonical hash, and flow
//! networks additionally read and write the line-oriented max-flow format.

mod bfs;
mod dimacs;
mod edge_store;
mod flow;
mod generators;
mod graph;
mod hash;
mod properties;
mod serialization;
mod vertex_store;

pub use bfs::{bfs, SearchResult, Visit};
pub use dimacs::{
    read_dimacs, read_dimacs_file, write_dimacs, write_dimacs_file, MAX_DECLARED_VERTICES,
};
pub use flow::{ArcView, FlowEdge, FlowGraph, FlowVertex, FlowVertexView};
pub use generators::{gen_random, gen_random_flow};
pub use graph::{EdgeInsert, EdgeKey, EdgeView, Graph, VertexView};
pub use hash::{canonical_hash, flow_canonical_hash};
pub use properties::{FlowProperties, GraphProperties, IdPolicy};
pub use vertex_store::MAX_VERTEX_ID;

/// Re-export serialization helpers for downstream crates.
pub use serialization::{
    decode_graph, encode_graph, flow_from_bytes, flow_from_json, flow_to_bytes, flow_to_json,
    graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json, ArcEntry, EdgeEntry,
    FlowDocument, FlowVertexEntry, GraphDocument, VertexEntry, DOCUMENT_SCHEMA,
};
