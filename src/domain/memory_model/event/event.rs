use std::cmp::Ordering;

use crate::domain::memory_model::job::job_set::JobKey;

/// Kind of a simulation event.
///
/// The declaration order is the processing order at equal timestamps:
/// a completion at time t frees its partition before jobs arriving at t are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    Completion,
    Arrival,
}

#[derive(Debug, Clone, Copy)]
pub struct Event {
    pub time: i64,
    pub kind: EventKind,
    pub job: JobKey,

    /// Insertion sequence number, breaks ties between events of equal time and kind.
    pub seq: u64,
}

impl Event {
    fn sort_key(&self) -> (i64, EventKind, u64) {
        (self.time, self.kind, self.seq)
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// BinaryHeap is a max-heap, so the ordering is flipped: the earliest event is the "largest".
impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        other.sort_key().cmp(&self.sort_key())
    }
}
