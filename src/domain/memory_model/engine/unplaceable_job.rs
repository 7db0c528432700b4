use serde::Serialize;
use std::fmt;

use crate::domain::memory_model::utils::id::JobId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnplaceableReason {
    /// The job is larger than every partition. Detected when the job arrives.
    ExceedsLargestPartition { largest_capacity: i64 },

    /// The job was still waiting after the drain retry bound was used up.
    DrainRetriesExhausted { retries: u32 },
}

/// A job that will never run in this simulation. Reported, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnplaceableJob {
    pub job: JobId,
    pub size: i64,
    /// Clock value when the job was classified.
    pub detected_at: i64,
    pub reason: UnplaceableReason,
}

impl fmt::Display for UnplaceableJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            UnplaceableReason::ExceedsLargestPartition { largest_capacity } => {
                write!(f, "job {} (size {}) exceeds the largest partition ({})", self.job, self.size, largest_capacity)
            }
            UnplaceableReason::DrainRetriesExhausted { retries } => {
                write!(f, "job {} (size {}) still waiting after {} drain retries", self.job, self.size, retries)
            }
        }
    }
}
