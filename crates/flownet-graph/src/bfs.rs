use std::collections::hash_map::Entry;
use std::collections::HashMap;

use flownet_core::errors::GraphError;
use flownet_core::{FifoQueue, Traversable, VertexId};

/// Timestamps recorded for one vertex by [`bfs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    /// Tick at which the vertex was enqueued.
    pub discovery: u64,
    /// Tick recorded once the vertex was dequeued and its edges scanned.
    pub finish: u64,
    /// Vertex whose scan discovered this one; `None` for forest roots.
    pub parent: Option<VertexId>,
}

/// Breadth-first forest covering every vertex of a graph.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    visits: HashMap<VertexId, Visit>,
    roots: Vec<VertexId>,
    ticks: u64,
}

impl SearchResult {
    /// Timestamps of `vertex`, if it was part of the traversed graph.
    pub fn get(&self, vertex: VertexId) -> Option<&Visit> {
        self.visits.get(&vertex)
    }

    /// Number of visited vertices.
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Returns `true` when the traversed graph had no vertices.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Roots of the forest, in the order their searches started.
    pub fn roots(&self) -> &[VertexId] {
        &self.roots
    }

    /// Total number of ticks consumed, i.e. the next unused tick.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Iterates over every visited vertex and its timestamps.
    pub fn iter(&self) -> impl Iterator<Item = (&VertexId, &Visit)> + '_ {
        self.visits.iter()
    }
}

/// Runs a breadth-first search from every not-yet-visited vertex.
///
/// One tick counter spans the whole traversal. It advances once when a
/// vertex is enqueued (its discovery tick) and once when it has been dequeued
/// and its edges scanned (its finish tick). Hence `finish > discovery` for
/// every vertex, and a parent is discovered before its children and finishes
/// after all of them were discovered. Exact tick values depend
/// on the graph's iteration order, which is deterministic for a given
/// mutation history.
pub fn bfs<G>(graph: &G) -> Result<SearchResult, GraphError>
where
    G: Traversable + ?Sized,
{
    let mut result = SearchResult {
        visits: HashMap::with_capacity(graph.vertex_count()),
        roots: Vec::new(),
        ticks: 0,
    };
    let mut queue = FifoQueue::new();
    for root in graph.vertex_ids() {
        if result.visits.contains_key(&root) {
            continue;
        }
        result.roots.push(root);
        discover(&mut result, &mut queue, root, None);
        while let Some(current) = queue.dequeue() {
            for next in graph.successors(current)? {
                if !result.visits.contains_key(&next) {
                    discover(&mut result, &mut queue, next, Some(current));
                }
            }
            if let Some(visit) = result.visits.get_mut(&current) {
                visit.finish = result.ticks;
            }
            result.ticks += 1;
        }
    }
    tracing::debug!(
        vertices = result.visits.len(),
        roots = result.roots.len(),
        ticks = result.ticks,
        "bfs forest complete"
    );
    Ok(result)
}

fn discover(
    result: &mut SearchResult,
    queue: &mut FifoQueue<VertexId>,
    vertex: VertexId,
    parent: Option<VertexId>,
) {
    if let Entry::Vacant(slot) = result.visits.entry(vertex) {
        slot.insert(Visit {
            discovery: result.ticks,
            finish: result.ticks,
            parent,
        });
        queue.enqueue(vertex);
        result.ticks += 1;
    }
}
