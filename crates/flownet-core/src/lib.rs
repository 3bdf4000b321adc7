#![deny(missing_docs)]
//! Core identifiers, error taxonomy and contracts for the flownet graph engine.
//!
//! The engine itself lives in `flownet-graph`; this crate holds the pieces
//! every layer agrees on: how vertices are named, how failures are reported,
//! what a payload must be able to do and how randomness is threaded through.

pub mod errors;
pub mod ids;
pub mod payload;
pub mod provenance;
pub mod queue;
pub mod rng;

pub use errors::{ErrorInfo, GraphError};
pub use ids::{GraphTag, VertexId};
pub use payload::Payload;
pub use provenance::SchemaVersion;
pub use queue::FifoQueue;
pub use rng::{derive_substream_seed, RngHandle};

/// Read-only view a traversal needs from a graph.
///
/// Implementations must return the same vertices, in the same order, for as
/// long as the graph is not mutated. Both iterators borrow the graph, so a
/// traversal can never observe a concurrent mutation.
pub trait Traversable {
    /// Returns an iterator over every live vertex.
    fn vertex_ids(&self) -> Box<dyn ExactSizeIterator<Item = VertexId> + '_>;

    /// Returns the vertices reachable from `vertex` over a single edge.
    ///
    /// Directed graphs report out-neighbours; undirected graphs report every
    /// adjacent vertex.
    fn successors(
        &self,
        vertex: VertexId,
    ) -> Result<Box<dyn Iterator<Item = VertexId> + '_>, GraphError>;

    /// Returns the number of live vertices.
    fn vertex_count(&self) -> usize {
        self.vertex_ids().len()
    }
}
