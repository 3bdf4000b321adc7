use std::collections::{BTreeSet, HashMap};

use crate::properties::IdPolicy;

/// Largest raw id a vertex may be recreated under.
///
/// Persisted ids and counters are capped here so the fresh-id counter keeps
/// `2^63` values of headroom and can never wrap onto a live id.
pub const MAX_VERTEX_ID: u64 = (1 << 63) - 1;

/// Outcome of placing a vertex under an explicit id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    Placed,
    Live,
    OutOfRange,
}

#[derive(Debug, Clone)]
pub(crate) struct VertexRecord<V> {
    pub(crate) raw: u64,
    pub(crate) payload: Option<V>,
}

/// Dense arena of live vertices with an id -> slot side table.
///
/// Removal swaps the last record into the freed slot, so `slots` never has
/// holes and every operation is O(1) amortized. The side table must be
/// patched on every swap; `index.len() == slots.len()` at all times.
#[derive(Debug, Clone)]
pub(crate) struct VertexStore<V> {
    policy: IdPolicy,
    slots: Vec<VertexRecord<V>>,
    index: HashMap<u64, usize>,
    next_raw: u64,
    freed: BTreeSet<u64>,
}

impl<V> VertexStore<V> {
    pub(crate) fn new(policy: IdPolicy) -> Self {
        Self {
            policy,
            slots: Vec::new(),
            index: HashMap::new(),
            next_raw: 0,
            freed: BTreeSet::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn contains(&self, raw: u64) -> bool {
        self.index.contains_key(&raw)
    }

    /// Smallest raw id that a monotonic allocation would hand out next.
    pub(crate) fn next_raw(&self) -> u64 {
        self.next_raw
    }

    /// Raises the monotonic counter so that no id below `next` is assigned fresh.
    /// Returns `false`, leaving the counter alone, when `next` exceeds
    /// `MAX_VERTEX_ID + 1`.
    pub(crate) fn reserve_through(&mut self, next: u64) -> bool {
        if next > MAX_VERTEX_ID + 1 {
            return false;
        }
        self.next_raw = self.next_raw.max(next);
        true
    }

    pub(crate) fn insert(&mut self, payload: Option<V>) -> u64 {
        let raw = match self.policy {
            IdPolicy::Recycle => self.freed.pop_first().unwrap_or(self.next_raw),
            IdPolicy::Monotonic => self.next_raw,
        };
        self.place(raw, payload);
        raw
    }

    /// Places a vertex under a caller-chosen id.
    pub(crate) fn insert_with_id(&mut self, raw: u64, payload: Option<V>) -> Placement {
        if raw > MAX_VERTEX_ID {
            return Placement::OutOfRange;
        }
        if self.contains(raw) {
            return Placement::Live;
        }
        self.freed.remove(&raw);
        self.place(raw, payload);
        Placement::Placed
    }

    fn place(&mut self, raw: u64, payload: Option<V>) {
        let previous = self.index.insert(raw, self.slots.len());
        debug_assert!(previous.is_none(), "raw id {raw} handed out twice");
        self.slots.push(VertexRecord { raw, payload });
        if let Some(next) = raw.checked_add(1) {
            self.next_raw = self.next_raw.max(next);
        }
        debug_assert_eq!(self.index.len(), self.slots.len());
    }

    pub(crate) fn get(&self, raw: u64) -> Option<&VertexRecord<V>> {
        let slot = *self.index.get(&raw)?;
        self.slots.get(slot)
    }

    pub(crate) fn get_mut(&mut self, raw: u64) -> Option<&mut VertexRecord<V>> {
        let slot = *self.index.get(&raw)?;
        self.slots.get_mut(slot)
    }

    pub(crate) fn remove(&mut self, raw: u64) -> Option<VertexRecord<V>> {
        let slot = self.index.remove(&raw)?;
        let record = self.slots.swap_remove(slot);
        if let Some(moved) = self.slots.get(slot) {
            self.index.insert(moved.raw, slot);
        }
        if self.policy == IdPolicy::Recycle {
            self.freed.insert(raw);
        }
        debug_assert_eq!(record.raw, raw);
        debug_assert_eq!(self.index.len(), self.slots.len());
        Some(record)
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, VertexRecord<V>> {
        self.slots.iter()
    }
}
