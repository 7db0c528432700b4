use thiserror::Error;

use crate::domain::memory_model::utils::id::{JobId, PartitionId};

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse scenario JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to read or write CSV data: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to build internal domain model: {0}")]
    ModelConstructionError(String),

    #[error("Allocation contract violated: {0}")]
    Allocation(#[from] AllocationError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("Simulation state is inconsistent: {0}")]
    InconsistentState(String),
}

/// Misuse of the partition table. Placement policies only ever choose free partitions
/// that are large enough, so any of these signals a bug in a policy or in the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("Partition {partition} is already occupied by job {occupant}")]
    PartitionOccupied { partition: PartitionId, occupant: JobId },

    #[error("Partition {partition} (capacity {capacity}) is too small for job {job} (size {size})")]
    InsufficientCapacity { partition: PartitionId, capacity: i64, job: JobId, size: i64 },

    #[error("Partition {0} is already free")]
    PartitionAlreadyFree(PartitionId),

    #[error("No partition at table index {0}")]
    UnknownPartition(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Event queue is empty")]
pub struct EmptyQueueError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Unknown placement policy: '{0}' (expected first-fit, best-fit or worst-fit)")]
    UnknownPlacementPolicy(String),
}

pub type Result<T> = std::result::Result<T, Error>;
