use std::collections::BinaryHeap;

use crate::domain::memory_model::event::event::{Event, EventKind};
use crate::domain::memory_model::job::job_set::JobKey;
use crate::error::EmptyQueueError;

/// Time ordered queue of pending events; the engine's only clock source.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Event>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { heap: BinaryHeap::new(), next_seq: 0 }
    }

    /// Schedules an event in O(log n).
    pub fn push(&mut self, time: i64, kind: EventKind, job: JobKey) {
        let event = Event { time, kind, job, seq: self.next_seq };
        self.next_seq += 1;
        self.heap.push(event);
    }

    /// Removes and returns the earliest event.
    pub fn pop_min(&mut self) -> Result<Event, EmptyQueueError> {
        self.heap.pop().ok_or(EmptyQueueError)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
