use flownet_core::errors::{ErrorInfo, GraphError};
use flownet_core::{GraphTag, Traversable, VertexId};
use serde::{Deserialize, Serialize};

use crate::graph::Graph;
use crate::properties::FlowProperties;

/// Push-relabel bookkeeping attached to every flow vertex.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowVertex {
    /// Label used by push-relabel style algorithms.
    pub height: i64,
    /// Inflow minus outflow accumulated at the vertex.
    pub excess: f64,
}

/// Capacity and current flow of an arc.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowEdge {
    /// Upper bound on the flow the arc may carry.
    pub capacity: f64,
    /// Flow currently routed through the arc.
    pub flow: f64,
}

impl FlowEdge {
    /// Remaining capacity, `capacity - flow`, without clamping.
    pub fn residual(&self) -> f64 {
        self.capacity - self.flow
    }
}

/// Snapshot of a flow vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowVertexView {
    /// Identifier of the vertex.
    pub id: VertexId,
    /// Current height label.
    pub height: i64,
    /// Current excess.
    pub excess: f64,
}

/// Snapshot of an arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcView {
    /// Tail of the arc.
    pub from: VertexId,
    /// Head of the arc.
    pub to: VertexId,
    /// Flow currently routed through the arc.
    pub flow: f64,
    /// Capacity of the arc.
    pub capacity: f64,
}

impl ArcView {
    /// Remaining capacity, `capacity - flow`, without clamping.
    pub fn residual(&self) -> f64 {
        self.capacity - self.flow
    }
}

/// Directed flow network prepared for max-flow style algorithms.
///
/// Wraps a directed [`Graph`] whose vertices carry [`FlowVertex`] state and
/// whose edges carry [`FlowEdge`] state, so it inherits the same id, removal
/// and uniqueness invariants. Values are stored as given: the network never
/// checks `0 <= flow <= capacity`, that is the solver's business.
#[derive(Debug, Clone)]
pub struct FlowGraph {
    graph: Graph<FlowVertex, FlowEdge>,
    properties: FlowProperties,
    source: Option<u64>,
    sink: Option<u64>,
}

impl FlowGraph {
    /// Creates an empty flow network.
    pub fn new(properties: FlowProperties) -> Self {
        Self {
            graph: Graph::new(properties.graph_properties()),
            properties,
            source: None,
            sink: None,
        }
    }

    /// Returns the properties fixed at construction.
    pub fn properties(&self) -> &FlowProperties {
        &self.properties
    }

    /// Read-only access to the backing graph.
    pub fn graph(&self) -> &Graph<FlowVertex, FlowEdge> {
        &self.graph
    }

    /// Returns the identity of this instance.
    pub fn tag(&self) -> GraphTag {
        self.graph.tag()
    }

    /// Number of live vertices.
    pub fn num_vertices(&self) -> usize {
        self.graph.num_vertices()
    }

    /// Number of arcs.
    pub fn num_edges(&self) -> usize {
        self.graph.num_edges()
    }

    /// Adds a vertex with height 0 and excess 0.
    pub fn add_vertex(&mut self) -> VertexId {
        self.graph.add_vertex_with(FlowVertex::default())
    }

    pub(crate) fn insert_vertex_with_id(
        &mut self,
        raw: u64,
        state: FlowVertex,
    ) -> Result<VertexId, GraphError> {
        self.graph.insert_vertex_with_id(raw, Some(state))
    }

    pub(crate) fn next_raw(&self) -> u64 {
        self.graph.next_raw()
    }

    pub(crate) fn reserve_through(&mut self, next: u64) -> Result<(), GraphError> {
        self.graph.reserve_through(next)
    }

    /// Resolves a raw id to the identifier of the live vertex.
    pub fn vertex(&self, raw: u64) -> Result<VertexId, GraphError> {
        self.graph.vertex(raw)
    }

    /// Whether `id` names a live vertex of this instance.
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.graph.contains_vertex(id)
    }

    /// Removes a vertex and its arcs; a removed source or sink is unset.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<(), GraphError> {
        self.graph.remove_vertex(id)?;
        let raw = Some(id.as_raw());
        if self.source == raw {
            self.source = None;
        }
        if self.sink == raw {
            self.sink = None;
        }
        Ok(())
    }

    /// Adds the arc `from -> to`.
    ///
    /// Returns `Ok(false)` without touching the network when the arc already
    /// exists, an endpoint is not live, the arc would be a self-loop, or the
    /// reverse arc exists and reverse edges are not allowed. Capacity and flow
    /// are stored exactly as given. Identifiers minted by another instance are
    /// a hard [`GraphError::VertexNotInGraph`] error.
    pub fn add_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        flow: f64,
        capacity: f64,
    ) -> Result<bool, GraphError> {
        for endpoint in [from, to] {
            match self.graph.resolve(endpoint) {
                Ok(_) => {}
                Err(GraphError::VertexNotFound(_)) => return Ok(false),
                Err(err) => return Err(err),
            }
        }
        if from == to {
            return Ok(false);
        }
        if !self.properties.reverse_edges_allowed && self.graph.contains_edge(to, from) {
            return Ok(false);
        }
        let inserted = self
            .graph
            .add_edge_with(from, to, FlowEdge { capacity, flow })?;
        Ok(inserted.is_created())
    }

    /// Whether the arc `from -> to` is stored.
    pub fn contains_edge(&self, from: VertexId, to: VertexId) -> bool {
        self.graph.contains_edge(from, to)
    }

    /// Removes the arc `from -> to`, returning its state.
    pub fn remove_edge(&mut self, from: VertexId, to: VertexId) -> Result<FlowEdge, GraphError> {
        Ok(self.graph.remove_edge(from, to)?.unwrap_or_default())
    }

    /// Snapshot of the arc `from -> to`.
    pub fn arc(&self, from: VertexId, to: VertexId) -> Result<ArcView, GraphError> {
        let state = self.edge_state(from, to)?;
        Ok(ArcView {
            from,
            to,
            flow: state.flow,
            capacity: state.capacity,
        })
    }

    /// Capacity of the arc.
    pub fn capacity(&self, from: VertexId, to: VertexId) -> Result<f64, GraphError> {
        Ok(self.edge_state(from, to)?.capacity)
    }

    /// Overwrites the capacity of the arc.
    pub fn set_capacity(
        &mut self,
        from: VertexId,
        to: VertexId,
        capacity: f64,
    ) -> Result<(), GraphError> {
        self.edge_state_mut(from, to)?.capacity = capacity;
        Ok(())
    }

    /// Flow routed through the arc.
    pub fn flow(&self, from: VertexId, to: VertexId) -> Result<f64, GraphError> {
        Ok(self.edge_state(from, to)?.flow)
    }

    /// Overwrites the flow of the arc.
    pub fn set_flow(&mut self, from: VertexId, to: VertexId, flow: f64) -> Result<(), GraphError> {
        self.edge_state_mut(from, to)?.flow = flow;
        Ok(())
    }

    /// Residual capacity `capacity - flow` of the arc, unclamped.
    pub fn residual(&self, from: VertexId, to: VertexId) -> Result<f64, GraphError> {
        Ok(self.edge_state(from, to)?.residual())
    }

    /// Height label of a vertex.
    pub fn height(&self, id: VertexId) -> Result<i64, GraphError> {
        Ok(self.vertex_state(id)?.height)
    }

    /// Overwrites the height label of a vertex.
    pub fn set_height(&mut self, id: VertexId, height: i64) -> Result<(), GraphError> {
        self.vertex_state_mut(id)?.height = height;
        Ok(())
    }

    /// Excess of a vertex.
    pub fn excess(&self, id: VertexId) -> Result<f64, GraphError> {
        Ok(self.vertex_state(id)?.excess)
    }

    /// Overwrites the excess of a vertex.
    pub fn set_excess(&mut self, id: VertexId, excess: f64) -> Result<(), GraphError> {
        self.vertex_state_mut(id)?.excess = excess;
        Ok(())
    }

    /// Designated source, if set.
    pub fn source(&self) -> Option<VertexId> {
        self.source.and_then(|raw| self.graph.vertex(raw).ok())
    }

    /// Designated sink, if set.
    pub fn sink(&self) -> Option<VertexId> {
        self.sink.and_then(|raw| self.graph.vertex(raw).ok())
    }

    /// Designates the source; the vertex must be live in this network.
    pub fn set_source(&mut self, id: VertexId) -> Result<(), GraphError> {
        let raw = self.graph.resolve(id)?;
        self.source = Some(raw);
        Ok(())
    }

    /// Designates the sink; the vertex must be live in this network.
    pub fn set_sink(&mut self, id: VertexId) -> Result<(), GraphError> {
        let raw = self.graph.resolve(id)?;
        self.sink = Some(raw);
        Ok(())
    }

    /// Heads of the arcs leaving `id`.
    pub fn neighbors(
        &self,
        id: VertexId,
    ) -> Result<impl Iterator<Item = VertexId> + '_, GraphError> {
        self.graph.neighbors(id)
    }

    /// Lazily iterates over every vertex with its flow state.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = FlowVertexView> + '_ {
        self.graph.vertices().map(|vertex| {
            let state = vertex.payload.copied().unwrap_or_default();
            FlowVertexView {
                id: vertex.id,
                height: state.height,
                excess: state.excess,
            }
        })
    }

    /// Lazily iterates over every arc.
    pub fn arcs(&self) -> impl Iterator<Item = ArcView> + '_ {
        self.graph.edges().map(|edge| {
            let state = edge.payload.copied().unwrap_or_default();
            ArcView {
                from: edge.from,
                to: edge.to,
                flow: state.flow,
                capacity: state.capacity,
            }
        })
    }

    fn edge_state(&self, from: VertexId, to: VertexId) -> Result<FlowEdge, GraphError> {
        Ok(self
            .graph
            .edge_payload(from, to)?
            .copied()
            .unwrap_or_default())
    }

    fn edge_state_mut(&mut self, from: VertexId, to: VertexId) -> Result<&mut FlowEdge, GraphError> {
        Ok(self
            .graph
            .edge_slot_mut(from, to)?
            .get_or_insert_with(FlowEdge::default))
    }

    fn vertex_state(&self, id: VertexId) -> Result<FlowVertex, GraphError> {
        Ok(self.graph.vertex_payload(id)?.copied().unwrap_or_default())
    }

    fn vertex_state_mut(&mut self, id: VertexId) -> Result<&mut FlowVertex, GraphError> {
        Ok(self
            .graph
            .vertex_slot_mut(id)?
            .get_or_insert_with(FlowVertex::default))
    }

    /// Designates source and sink from persisted raw ids.
    pub(crate) fn restore_terminals(
        &mut self,
        source: Option<u64>,
        sink: Option<u64>,
    ) -> Result<(), GraphError> {
        for (role, raw) in [("source", source), ("sink", sink)] {
            if let Some(raw) = raw {
                if self.graph.vertex(raw).is_err() {
                    return Err(GraphError::Malformed(
                        ErrorInfo::new("dangling-terminal", "terminal names no listed vertex")
                            .with_context("role", role)
                            .with_context("vertex", raw),
                    ));
                }
            }
        }
        self.source = source;
        self.sink = sink;
        Ok(())
    }
}

impl Default for FlowGraph {
    fn default() -> Self {
        Self::new(FlowProperties::default())
    }
}

impl Traversable for FlowGraph {
    fn vertex_ids(&self) -> Box<dyn ExactSizeIterator<Item = VertexId> + '_> {
        self.graph.vertex_ids()
    }

    fn successors(
        &self,
        vertex: VertexId,
    ) -> Result<Box<dyn Iterator<Item = VertexId> + '_>, GraphError> {
        self.graph.successors(vertex)
    }

    fn vertex_count(&self) -> usize {
        self.graph.num_vertices()
    }
}
