//! In-memory priority queue engine.
//!
//! A binary heap keyed on priority rank, lowest rank popped first. Among
//! equal ranks, pop order is FIFO: each insert takes a monotonically
//! increasing sequence number used as the secondary sort key. (A bare
//! binary heap gives no ordering guarantee for equal priorities; the
//! sequence number makes replay and snapshots reproducible.)

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::{Error, Result};
use crate::model::CaseRecord;

/// Heap entry. Ordering looks at (rank, seq) only; the record rides along.
#[derive(Debug, Clone)]
struct Entry {
    rank: u8,
    seq: u64,
    record: CaseRecord,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.rank, self.seq).cmp(&(other.rank, other.seq))
    }
}

/// Priority-ordered container for all currently un-popped case records.
///
/// Single-threaded; callers sharing a queue across threads must serialize
/// every operation themselves.
#[derive(Debug, Default)]
pub struct CaseQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl CaseQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. Always succeeds, O(log n).
    pub fn insert(&mut self, record: CaseRecord) {
        let entry = Entry {
            rank: record.priority.rank(),
            seq: self.next_seq,
            record,
        };
        self.next_seq += 1;
        self.heap.push(Reverse(entry));
    }

    /// Remove and return the most urgent record (lowest rank, then FIFO).
    pub fn pop_next(&mut self) -> Result<CaseRecord> {
        match self.heap.pop() {
            Some(Reverse(entry)) => Ok(entry.record),
            None => Err(Error::EmptyQueue),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every queued record. The log is not touched.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// All queued records in full pop order, without mutating the queue.
    /// Works on a clone of the heap, O(n log n) time and O(n) space.
    pub fn snapshot_ordered(&self) -> Vec<CaseRecord> {
        let mut copy = self.heap.clone();
        let mut out = Vec::with_capacity(copy.len());
        while let Some(Reverse(entry)) = copy.pop() {
            out.push(entry.record);
        }
        out
    }
}
