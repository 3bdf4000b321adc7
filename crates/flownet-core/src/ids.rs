//! Vertex identifiers and graph instance tags.

use std::fmt::{self, Display};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_TAG: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a single graph instance.
///
/// Every graph draws a fresh tag when it is constructed or cloned, and stamps
/// it into each [`VertexId`] it hands out. Identifiers therefore cannot be
/// replayed against another instance by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GraphTag(u64);

impl GraphTag {
    /// Allocates a tag that no other instance in this process holds.
    pub fn fresh() -> Self {
        Self(NEXT_TAG.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw integer representation of the tag.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Identifier for a vertex within one graph instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId {
    graph: GraphTag,
    raw: u64,
}

impl VertexId {
    /// Creates an identifier for `raw` owned by the graph tagged `graph`.
    pub fn new(graph: GraphTag, raw: u64) -> Self {
        Self { graph, raw }
    }

    /// Returns the raw integer id, the value persisted by codecs.
    pub fn as_raw(&self) -> u64 {
        self.raw
    }

    /// Returns the tag of the graph that minted this identifier.
    pub fn graph(&self) -> GraphTag {
        self.graph
    }
}

impl Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
