use serde::{Deserialize, Serialize};

/// Rule used to assign raw identifiers to new vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IdPolicy {
    /// Every new vertex receives one more than the largest id ever assigned.
    #[default]
    Monotonic,
    /// Ids of removed vertices are handed out again, smallest first.
    Recycle,
}

/// Construction-time properties of a [`Graph`](crate::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GraphProperties {
    /// Whether `(u, v)` and `(v, u)` are distinct edges.
    pub directed: bool,
    /// Whether edges from a vertex to itself are accepted.
    pub self_loops_allowed: bool,
    /// How vertex ids are assigned.
    pub id_policy: IdPolicy,
}

impl GraphProperties {
    /// Properties of a directed graph without self-loops.
    pub fn directed() -> Self {
        Self {
            directed: true,
            ..Self::default()
        }
    }

    /// Properties of an undirected graph without self-loops.
    pub fn undirected() -> Self {
        Self::default()
    }

    /// Returns a copy that accepts self-loops.
    pub fn with_self_loops(mut self) -> Self {
        self.self_loops_allowed = true;
        self
    }

    /// Returns a copy using the provided id policy.
    pub fn with_id_policy(mut self, policy: IdPolicy) -> Self {
        self.id_policy = policy;
        self
    }
}

/// Construction-time properties of a [`FlowGraph`](crate::FlowGraph).
///
/// Flow networks are always directed and never contain self-loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowProperties {
    /// Whether both `(u, v)` and `(v, u)` may be stored at the same time.
    pub reverse_edges_allowed: bool,
    /// How vertex ids are assigned.
    pub id_policy: IdPolicy,
}

impl FlowProperties {
    /// Returns a copy that rejects anti-parallel arcs.
    pub fn without_reverse_edges(mut self) -> Self {
        self.reverse_edges_allowed = false;
        self
    }

    /// Properties of the directed graph backing the flow network.
    pub fn graph_properties(&self) -> GraphProperties {
        GraphProperties {
            directed: true,
            self_loops_allowed: false,
            id_policy: self.id_policy,
        }
    }
}

impl Default for FlowProperties {
    fn default() -> Self {
        Self {
            reverse_edges_allowed: true,
            id_policy: IdPolicy::Monotonic,
        }
    }
}
