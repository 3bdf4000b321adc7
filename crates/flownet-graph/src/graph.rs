use flownet_core::errors::{ErrorInfo, GraphError};
use flownet_core::{GraphTag, Traversable, VertexId};

use crate::edge_store::EdgeStore;
use crate::properties::GraphProperties;
use crate::vertex_store::{Placement, VertexStore, MAX_VERTEX_ID};

/// Stored direction of an edge.
///
/// For undirected graphs `from` is the endpoint with the larger raw id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    /// Endpoint the edge is stored under.
    pub from: VertexId,
    /// Other endpoint.
    pub to: VertexId,
}

/// Outcome of [`Graph::add_edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInsert {
    /// A new edge record was stored.
    Created(EdgeKey),
    /// The canonical edge already existed; nothing changed.
    Existing(EdgeKey),
}

impl EdgeInsert {
    /// Key of the stored edge, whether new or pre-existing.
    pub fn key(&self) -> EdgeKey {
        match self {
            EdgeInsert::Created(key) | EdgeInsert::Existing(key) => *key,
        }
    }

    /// Returns `true` when the call created the edge.
    pub fn is_created(&self) -> bool {
        matches!(self, EdgeInsert::Created(_))
    }
}

/// Borrowed view of a live vertex.
#[derive(Debug, Clone, Copy)]
pub struct VertexView<'g, V> {
    /// Identifier of the vertex.
    pub id: VertexId,
    /// Attached payload, if any.
    pub payload: Option<&'g V>,
}

/// Borrowed view of a stored edge, in its stored direction.
#[derive(Debug, Clone, Copy)]
pub struct EdgeView<'g, E> {
    /// Endpoint the edge is stored under.
    pub from: VertexId,
    /// Other endpoint.
    pub to: VertexId,
    /// Attached payload, if any.
    pub payload: Option<&'g E>,
}

impl<E> EdgeView<'_, E> {
    /// Key identifying this edge.
    pub fn key(&self) -> EdgeKey {
        EdgeKey {
            from: self.from,
            to: self.to,
        }
    }
}

/// Mutable graph of vertices and edges carrying optional payloads.
///
/// Vertices live in a dense arena indexed by raw id; edges reference vertices
/// by raw id only. Properties are fixed at construction. The graph performs
/// no synchronization: share it across threads only behind external locking.
///
/// Iterators returned by [`vertices`](Self::vertices), [`edges`](Self::edges)
/// and [`neighbors`](Self::neighbors) are lazy and borrow the graph, so the
/// graph cannot be mutated until they are dropped. Calling them again
/// restarts the sequence.
#[derive(Debug)]
pub struct Graph<V = (), E = ()> {
    tag: GraphTag,
    properties: GraphProperties,
    vertices: VertexStore<V>,
    edges: EdgeStore<E>,
}

impl<V, E> Graph<V, E> {
    /// Creates an empty graph with the provided properties.
    pub fn new(properties: GraphProperties) -> Self {
        Self {
            tag: GraphTag::fresh(),
            properties,
            vertices: VertexStore::new(properties.id_policy),
            edges: EdgeStore::new(properties.directed),
        }
    }

    /// Returns the properties fixed at construction.
    pub fn properties(&self) -> &GraphProperties {
        &self.properties
    }

    /// Returns the identity of this instance.
    pub fn tag(&self) -> GraphTag {
        self.tag
    }

    /// Whether edges are directed.
    pub fn directed(&self) -> bool {
        self.properties.directed
    }

    /// Whether self-loops are accepted.
    pub fn self_loops_allowed(&self) -> bool {
        self.properties.self_loops_allowed
    }

    /// Number of live vertices, O(1).
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of stored edges, O(1).
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Adds a vertex without payload and returns its id.
    pub fn add_vertex(&mut self) -> VertexId {
        self.push_vertex(None)
    }

    /// Adds a vertex carrying `payload` and returns its id.
    pub fn add_vertex_with(&mut self, payload: V) -> VertexId {
        self.push_vertex(Some(payload))
    }

    fn push_vertex(&mut self, payload: Option<V>) -> VertexId {
        let raw = self.vertices.insert(payload);
        self.edges.register(raw);
        self.mint(raw)
    }

    /// Recreates a vertex under a persisted raw id.
    pub(crate) fn insert_vertex_with_id(
        &mut self,
        raw: u64,
        payload: Option<V>,
    ) -> Result<VertexId, GraphError> {
        match self.vertices.insert_with_id(raw, payload) {
            Placement::Placed => {}
            Placement::Live => {
                return Err(GraphError::malformed("duplicate-vertex", "vertex id is already live")
                    .with_context("vertex", raw));
            }
            Placement::OutOfRange => {
                return Err(GraphError::malformed("vertex-id-range", "vertex id exceeds the id limit")
                    .with_context("vertex", raw)
                    .with_context("limit", MAX_VERTEX_ID));
            }
        }
        self.edges.register(raw);
        Ok(self.mint(raw))
    }

    pub(crate) fn next_raw(&self) -> u64 {
        self.vertices.next_raw()
    }

    pub(crate) fn reserve_through(&mut self, next: u64) -> Result<(), GraphError> {
        if self.vertices.reserve_through(next) {
            return Ok(());
        }
        Err(GraphError::malformed("vertex-id-range", "next id exceeds the id limit")
            .with_context("next_id", next)
            .with_context("limit", MAX_VERTEX_ID))
    }

    /// Resolves a raw id to the identifier of the live vertex in this graph.
    pub fn vertex(&self, raw: u64) -> Result<VertexId, GraphError> {
        if self.vertices.contains(raw) {
            Ok(self.mint(raw))
        } else {
            Err(GraphError::vertex_not_found(raw))
        }
    }

    /// Whether `id` names a live vertex of this instance.
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        id.graph() == self.tag && self.vertices.contains(id.as_raw())
    }

    /// Returns the payload attached to a vertex.
    pub fn vertex_payload(&self, id: VertexId) -> Result<Option<&V>, GraphError> {
        let raw = self.resolve(id)?;
        Ok(self
            .vertices
            .get(raw)
            .and_then(|record| record.payload.as_ref()))
    }

    /// Returns a mutable reference to the payload attached to a vertex.
    pub fn vertex_payload_mut(&mut self, id: VertexId) -> Result<Option<&mut V>, GraphError> {
        Ok(self.vertex_slot_mut(id)?.as_mut())
    }

    /// Replaces the payload of a vertex, returning the previous one.
    pub fn set_vertex_payload(
        &mut self,
        id: VertexId,
        payload: Option<V>,
    ) -> Result<Option<V>, GraphError> {
        let slot = self.vertex_slot_mut(id)?;
        Ok(std::mem::replace(slot, payload))
    }

    pub(crate) fn vertex_slot_mut(&mut self, id: VertexId) -> Result<&mut Option<V>, GraphError> {
        let raw = self.resolve(id)?;
        self.vertices
            .get_mut(raw)
            .map(|record| &mut record.payload)
            .ok_or_else(|| GraphError::vertex_not_found(raw))
    }

    /// Removes a vertex and every edge touching it, returning its payload.
    ///
    /// Costs O(degree): incident edges are found through the adjacency rows,
    /// never by scanning the edge set.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<Option<V>, GraphError> {
        let raw = self.resolve(id)?;
        let dropped = self.edges.detach(raw);
        let record = self
            .vertices
            .remove(raw)
            .ok_or_else(|| GraphError::vertex_not_found(raw))?;
        tracing::trace!(vertex = raw, dropped_edges = dropped, "removed vertex");
        Ok(record.payload)
    }

    /// Number of edge records touching a vertex (a self-loop counts once).
    pub fn degree(&self, id: VertexId) -> Result<usize, GraphError> {
        let raw = self.resolve(id)?;
        Ok(self.edges.degree(raw))
    }

    /// Number of stored edges leaving a vertex.
    ///
    /// For undirected graphs this counts the edges stored under the vertex.
    pub fn out_degree(&self, id: VertexId) -> Result<usize, GraphError> {
        let raw = self.resolve(id)?;
        Ok(self.edges.out_degree(raw))
    }

    /// Number of stored edges entering a vertex.
    pub fn in_degree(&self, id: VertexId) -> Result<usize, GraphError> {
        let raw = self.resolve(id)?;
        Ok(self.edges.in_degree(raw))
    }

    /// Vertices one edge away from `id`.
    ///
    /// Directed graphs report out-neighbours; undirected graphs report every
    /// adjacent vertex.
    pub fn neighbors(
        &self,
        id: VertexId,
    ) -> Result<impl Iterator<Item = VertexId> + '_, GraphError> {
        let raw = self.resolve(id)?;
        let tag = self.tag;
        Ok(self
            .edges
            .neighbors(raw)
            .map(move |other| VertexId::new(tag, other)))
    }

    /// Adds an edge without payload.
    ///
    /// Returns [`EdgeInsert::Existing`] when the canonical edge is already
    /// stored; that is a no-op, not an error.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId) -> Result<EdgeInsert, GraphError> {
        self.insert_edge(from, to, None)
    }

    /// Adds an edge carrying `payload`.
    ///
    /// An existing edge keeps its payload and `payload` is dropped.
    pub fn add_edge_with(
        &mut self,
        from: VertexId,
        to: VertexId,
        payload: E,
    ) -> Result<EdgeInsert, GraphError> {
        self.insert_edge(from, to, Some(payload))
    }

    fn insert_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        payload: Option<E>,
    ) -> Result<EdgeInsert, GraphError> {
        let from_raw = self.resolve(from)?;
        let to_raw = self.resolve(to)?;
        if from_raw == to_raw && !self.properties.self_loops_allowed {
            return Err(GraphError::SelfLoopRejected(
                ErrorInfo::new("self-loop", "graph does not allow self-loops")
                    .with_context("vertex", from_raw),
            ));
        }
        let (stored_from, stored_to) = self.edges.canonical(from_raw, to_raw);
        let key = EdgeKey {
            from: self.mint(stored_from),
            to: self.mint(stored_to),
        };
        if self.edges.insert(from_raw, to_raw, payload) {
            Ok(EdgeInsert::Created(key))
        } else {
            Ok(EdgeInsert::Existing(key))
        }
    }

    /// Looks up an edge; undirected lookups accept either endpoint order.
    pub fn edge(&self, from: VertexId, to: VertexId) -> Result<EdgeView<'_, E>, GraphError> {
        let from_raw = self.resolve(from)?;
        let to_raw = self.resolve(to)?;
        let payload = self
            .edges
            .get(from_raw, to_raw)
            .ok_or_else(|| GraphError::edge_not_found(from_raw, to_raw))?;
        let (stored_from, stored_to) = self.edges.canonical(from_raw, to_raw);
        Ok(EdgeView {
            from: self.mint(stored_from),
            to: self.mint(stored_to),
            payload: payload.as_ref(),
        })
    }

    /// Whether the edge is stored. Foreign or missing vertices yield `false`.
    pub fn contains_edge(&self, from: VertexId, to: VertexId) -> bool {
        self.contains_vertex(from)
            && self.contains_vertex(to)
            && self.edges.contains(from.as_raw(), to.as_raw())
    }

    /// Returns the payload attached to an edge.
    pub fn edge_payload(&self, from: VertexId, to: VertexId) -> Result<Option<&E>, GraphError> {
        Ok(self.edge(from, to)?.payload)
    }

    /// Returns a mutable reference to the payload attached to an edge.
    pub fn edge_payload_mut(
        &mut self,
        from: VertexId,
        to: VertexId,
    ) -> Result<Option<&mut E>, GraphError> {
        Ok(self.edge_slot_mut(from, to)?.as_mut())
    }

    /// Replaces the payload of an edge, returning the previous one.
    pub fn set_edge_payload(
        &mut self,
        from: VertexId,
        to: VertexId,
        payload: Option<E>,
    ) -> Result<Option<E>, GraphError> {
        let slot = self.edge_slot_mut(from, to)?;
        Ok(std::mem::replace(slot, payload))
    }

    pub(crate) fn edge_slot_mut(
        &mut self,
        from: VertexId,
        to: VertexId,
    ) -> Result<&mut Option<E>, GraphError> {
        let from_raw = self.resolve(from)?;
        let to_raw = self.resolve(to)?;
        self.edges
            .get_mut(from_raw, to_raw)
            .ok_or_else(|| GraphError::edge_not_found(from_raw, to_raw))
    }

    /// Removes an edge, returning its payload.
    pub fn remove_edge(&mut self, from: VertexId, to: VertexId) -> Result<Option<E>, GraphError> {
        let from_raw = self.resolve(from)?;
        let to_raw = self.resolve(to)?;
        self.edges
            .remove(from_raw, to_raw)
            .ok_or_else(|| GraphError::edge_not_found(from_raw, to_raw))
    }

    /// Lazily iterates over every live vertex.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = VertexView<'_, V>> + '_ {
        let tag = self.tag;
        self.vertices.iter().map(move |record| VertexView {
            id: VertexId::new(tag, record.raw),
            payload: record.payload.as_ref(),
        })
    }

    /// Lazily iterates over every stored edge in its stored direction.
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_, E>> + '_ {
        let tag = self.tag;
        self.edges.iter().map(move |(from, to, payload)| EdgeView {
            from: VertexId::new(tag, from),
            to: VertexId::new(tag, to),
            payload: payload.as_ref(),
        })
    }

    /// Checks that `id` belongs to this instance and is live.
    pub(crate) fn resolve(&self, id: VertexId) -> Result<u64, GraphError> {
        if id.graph() != self.tag {
            return Err(GraphError::VertexNotInGraph(
                ErrorInfo::new("foreign-vertex", "vertex belongs to another graph instance")
                    .with_context("vertex", id.as_raw())
                    .with_context("owner", id.graph().as_raw())
                    .with_context("graph", self.tag.as_raw()),
            ));
        }
        let raw = id.as_raw();
        if !self.vertices.contains(raw) {
            return Err(GraphError::vertex_not_found(raw));
        }
        Ok(raw)
    }

    fn mint(&self, raw: u64) -> VertexId {
        VertexId::new(self.tag, raw)
    }
}

impl<V: Clone, E: Clone> Clone for Graph<V, E> {
    /// Clones the structure into a new instance with its own tag.
    ///
    /// Identifiers of the original are rejected by the clone; resolve raw ids
    /// through [`Graph::vertex`] instead.
    fn clone(&self) -> Self {
        Self {
            tag: GraphTag::fresh(),
            properties: self.properties,
            vertices: self.vertices.clone(),
            edges: self.edges.clone(),
        }
    }
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self::new(GraphProperties::default())
    }
}

impl<V, E> Traversable for Graph<V, E> {
    fn vertex_ids(&self) -> Box<dyn ExactSizeIterator<Item = VertexId> + '_> {
        Box::new(self.vertices().map(|vertex| vertex.id))
    }

    fn successors(
        &self,
        vertex: VertexId,
    ) -> Result<Box<dyn Iterator<Item = VertexId> + '_>, GraphError> {
        Ok(Box::new(self.neighbors(vertex)?))
    }

    fn vertex_count(&self) -> usize {
        self.num_vertices()
    }
}
