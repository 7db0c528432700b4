use serde::Serialize;

use crate::domain::memory_model::utils::id::{JobId, PartitionId};

/// A fixed-size memory block.
#[derive(Debug, Clone, Serialize)]
pub struct Partition {
    /// **Unique identifier** of this partition, as given in the input.
    pub id: PartitionId,

    /// Total capacity in memory units. Constant for the whole run.
    pub capacity: i64,

    /// The job currently placed in this partition, `None` while free.
    pub occupant: Option<JobId>,

    /// Number of allocations this partition has served.
    pub usage_count: u64,

    /// Sum of the internal fragmentation over all allocations of this partition.
    pub total_fragmentation: i64,

    /// Internal fragmentation of the current (or last) occupant.
    pub fragmentation: i64,
}

impl Partition {
    pub fn new(id: PartitionId, capacity: i64) -> Self {
        Partition { id, capacity, occupant: None, usage_count: 0, total_fragmentation: 0, fragmentation: 0 }
    }

    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }

    /// Whether a job of `size` could ever be placed here, ignoring the current occupant.
    pub fn fits(&self, size: i64) -> bool {
        self.capacity >= size
    }

    /// Unused capacity if a job of `size` were placed here. Negative if it does not fit.
    pub fn slack(&self, size: i64) -> i64 {
        self.capacity - size
    }
}
