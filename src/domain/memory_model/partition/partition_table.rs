use std::collections::HashSet;

use crate::domain::memory_model::partition::partition::Partition;
use crate::domain::memory_model::utils::id::JobId;
use crate::error::{AllocationError, Error, Result};

/// Position of a partition in table order.
pub type PartitionIndex = usize;

/// The fixed set of partitions of one simulation run.
///
/// Table order is the order the partitions were supplied in; first-fit scans in
/// this order and best/worst-fit use it to break ties.
#[derive(Debug, Clone, Default)]
pub struct PartitionTable {
    partitions: Vec<Partition>,
}

impl PartitionTable {
    pub fn new(partitions: Vec<Partition>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(partitions.len());

        for partition in &partitions {
            if partition.capacity <= 0 {
                return Err(Error::ModelConstructionError(format!(
                    "Partition {} has non-positive capacity {}.",
                    partition.id, partition.capacity
                )));
            }

            if !seen.insert(partition.id) {
                return Err(Error::ModelConstructionError(format!("Duplicate partition id {}.", partition.id)));
            }
        }

        Ok(PartitionTable { partitions })
    }

    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    pub fn get(&self, index: PartitionIndex) -> Option<&Partition> {
        self.partitions.get(index)
    }

    /// All partitions in table order.
    pub fn iter(&self) -> impl Iterator<Item = (PartitionIndex, &Partition)> {
        self.partitions.iter().enumerate()
    }

    /// Free partitions in table order.
    pub fn free_partitions(&self) -> impl Iterator<Item = (PartitionIndex, &Partition)> {
        self.iter().filter(|(_, partition)| partition.is_free())
    }

    pub fn largest_capacity(&self) -> Option<i64> {
        self.partitions.iter().map(|partition| partition.capacity).max()
    }

    pub fn occupied_count(&self) -> usize {
        self.partitions.iter().filter(|partition| !partition.is_free()).count()
    }

    /// Places `job` (of `size`) into the partition at `index`.
    ///
    /// # Returns
    /// The internal fragmentation (capacity - size) of this allocation.
    pub fn allocate(&mut self, index: PartitionIndex, job: JobId, size: i64) -> std::result::Result<i64, AllocationError> {
        let partition = self.partitions.get_mut(index).ok_or(AllocationError::UnknownPartition(index))?;

        if let Some(occupant) = partition.occupant {
            return Err(AllocationError::PartitionOccupied { partition: partition.id, occupant });
        }

        if !partition.fits(size) {
            return Err(AllocationError::InsufficientCapacity { partition: partition.id, capacity: partition.capacity, job, size });
        }

        let fragmentation = partition.slack(size);
        partition.occupant = Some(job);
        partition.usage_count += 1;
        partition.fragmentation = fragmentation;
        partition.total_fragmentation += fragmentation;

        Ok(fragmentation)
    }

    /// Frees the partition at `index` and returns the job that occupied it.
    pub fn release(&mut self, index: PartitionIndex) -> std::result::Result<JobId, AllocationError> {
        let partition = self.partitions.get_mut(index).ok_or(AllocationError::UnknownPartition(index))?;

        partition.occupant.take().ok_or(AllocationError::PartitionAlreadyFree(partition.id))
    }

    pub fn total_usage(&self) -> u64 {
        self.partitions.iter().map(|partition| partition.usage_count).sum()
    }
}
