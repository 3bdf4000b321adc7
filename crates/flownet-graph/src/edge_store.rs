use indexmap::{IndexMap, IndexSet};

/// Adjacency of one vertex: stored edges leaving it plus the vertices whose
/// stored edges point at it.
#[derive(Debug, Clone)]
struct Row<E> {
    out: IndexMap<u64, Option<E>>,
    inc: IndexSet<u64>,
}

impl<E> Row<E> {
    fn new() -> Self {
        Self {
            out: IndexMap::new(),
            inc: IndexSet::new(),
        }
    }
}

/// Edge records keyed by their stored `(from, to)` pair.
///
/// Undirected edges are stored once, under `(max(u, v), min(u, v))`. Every
/// live vertex owns a row (registered by the facade), and each stored edge
/// appears in exactly one `out` map and one `inc` set. Rows and neighbour maps
/// keep insertion order, so iteration is deterministic for a given history.
#[derive(Debug, Clone)]
pub(crate) struct EdgeStore<E> {
    directed: bool,
    rows: IndexMap<u64, Row<E>>,
    num_edges: usize,
}

impl<E> EdgeStore<E> {
    pub(crate) fn new(directed: bool) -> Self {
        Self {
            directed,
            rows: IndexMap::new(),
            num_edges: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.num_edges
    }

    /// Maps an endpoint pair to the direction it is stored under.
    pub(crate) fn canonical(&self, from: u64, to: u64) -> (u64, u64) {
        if self.directed {
            (from, to)
        } else {
            (from.max(to), from.min(to))
        }
    }

    pub(crate) fn register(&mut self, raw: u64) {
        self.rows.entry(raw).or_insert_with(Row::new);
    }

    pub(crate) fn contains(&self, from: u64, to: u64) -> bool {
        self.get(from, to).is_some()
    }

    pub(crate) fn get(&self, from: u64, to: u64) -> Option<&Option<E>> {
        let (from, to) = self.canonical(from, to);
        self.rows.get(&from)?.out.get(&to)
    }

    pub(crate) fn get_mut(&mut self, from: u64, to: u64) -> Option<&mut Option<E>> {
        let (from, to) = self.canonical(from, to);
        self.rows.get_mut(&from)?.out.get_mut(&to)
    }

    /// Stores a new edge. Returns `false`, leaving the stored payload alone,
    /// when the canonical edge already exists.
    ///
    /// Both endpoints must have been registered.
    pub(crate) fn insert(&mut self, from: u64, to: u64, payload: Option<E>) -> bool {
        let (from, to) = self.canonical(from, to);
        debug_assert!(self.rows.contains_key(&to), "edge target {to} has no row");
        let Some(row) = self.rows.get_mut(&from) else {
            debug_assert!(false, "edge source {from} has no row");
            return false;
        };
        if row.out.contains_key(&to) {
            return false;
        }
        row.out.insert(to, payload);
        if let Some(target) = self.rows.get_mut(&to) {
            target.inc.insert(from);
        }
        self.num_edges += 1;
        true
    }

    pub(crate) fn remove(&mut self, from: u64, to: u64) -> Option<Option<E>> {
        let (from, to) = self.canonical(from, to);
        let payload = self.rows.get_mut(&from)?.out.swap_remove(&to)?;
        if let Some(target) = self.rows.get_mut(&to) {
            target.inc.swap_remove(&from);
        }
        self.num_edges -= 1;
        Some(payload)
    }

    /// Drops the row of `raw` together with every edge touching it.
    ///
    /// Runs in O(degree). Returns the number of edge records removed.
    pub(crate) fn detach(&mut self, raw: u64) -> usize {
        let Some(row) = self.rows.swap_remove(&raw) else {
            return 0;
        };
        let mut removed = row.out.len();
        for to in row.out.keys() {
            if *to == raw {
                continue;
            }
            if let Some(target) = self.rows.get_mut(to) {
                target.inc.swap_remove(&raw);
            }
        }
        for from in row.inc.iter() {
            if *from == raw {
                continue;
            }
            if let Some(source) = self.rows.get_mut(from) {
                if source.out.swap_remove(&raw).is_some() {
                    removed += 1;
                }
            }
        }
        self.num_edges -= removed;
        removed
    }

    /// Vertices one stored edge away from `raw`.
    ///
    /// Directed stores report out-neighbours only; undirected stores report
    /// both sides, with a self-loop listed once.
    pub(crate) fn neighbors(&self, raw: u64) -> impl Iterator<Item = u64> + '_ {
        let row = self.rows.get(&raw);
        let directed = self.directed;
        let outgoing = row.into_iter().flat_map(|row| row.out.keys().copied());
        let incoming = row
            .into_iter()
            .filter(move |_| !directed)
            .flat_map(move |row| row.inc.iter().copied().filter(move |from| *from != raw));
        outgoing.chain(incoming)
    }

    pub(crate) fn out_degree(&self, raw: u64) -> usize {
        self.rows.get(&raw).map_or(0, |row| row.out.len())
    }

    pub(crate) fn in_degree(&self, raw: u64) -> usize {
        self.rows.get(&raw).map_or(0, |row| row.inc.len())
    }

    /// Number of stored edge records touching `raw`.
    pub(crate) fn degree(&self, raw: u64) -> usize {
        let Some(row) = self.rows.get(&raw) else {
            return 0;
        };
        let looped = usize::from(row.out.contains_key(&raw));
        row.out.len() + row.inc.len() - looped
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (u64, u64, &Option<E>)> + '_ {
        self.rows.iter().flat_map(|(from, row)| {
            let from = *from;
            row.out.iter().map(move |(to, payload)| (from, *to, payload))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(directed: bool, vertices: u64) -> EdgeStore<u32> {
        let mut store = EdgeStore::new(directed);
        for raw in 0..vertices {
            store.register(raw);
        }
        store
    }

    #[test]
    fn undirected_pairs_share_one_record() {
        let mut edges = store(false, 3);
        assert!(edges.insert(0, 2, Some(5)));
        assert!(!edges.insert(2, 0, Some(9)));
        assert_eq!(edges.len(), 1);
        assert_eq!(edges.get(0, 2), Some(&Some(5)));
        assert_eq!(edges.iter().map(|(f, t, _)| (f, t)).collect::<Vec<_>>(), vec![(2, 0)]);
    }

    #[test]
    fn detach_counts_both_directions_and_loops() {
        let mut edges = store(true, 3);
        edges.insert(0, 1, None);
        edges.insert(1, 0, None);
        edges.insert(1, 2, None);
        edges.insert(1, 1, None);
        edges.insert(0, 2, None);
        assert_eq!(edges.degree(1), 4);

        assert_eq!(edges.detach(1), 4);
        assert_eq!(edges.len(), 1);
        assert!(edges.contains(0, 2));
        assert_eq!(edges.in_degree(2), 1);
        assert_eq!(edges.out_degree(0), 1);
    }

    #[test]
    fn undirected_neighbors_list_loop_once() {
        let mut edges = store(false, 3);
        edges.insert(1, 1, None);
        edges.insert(0, 1, None);
        edges.insert(1, 2, None);
        let mut around: Vec<u64> = edges.neighbors(1).collect();
        around.sort_unstable();
        assert_eq!(around, vec![0, 1, 2]);
        assert_eq!(edges.degree(1), 3);
    }
}
