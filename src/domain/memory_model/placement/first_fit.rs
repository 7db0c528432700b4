use crate::domain::memory_model::job::job::Job;
use crate::domain::memory_model::partition::partition_table::{PartitionIndex, PartitionTable};
use crate::domain::memory_model::placement::placement_strategy::PlacementStrategy;

/// Takes the first free partition in table order that is large enough.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFit;

impl PlacementStrategy for FirstFit {
    fn name(&self) -> &'static str {
        "First-fit"
    }

    fn select(&self, partitions: &PartitionTable, job: &Job) -> Option<PartitionIndex> {
        partitions.free_partitions().find(|(_, partition)| partition.fits(job.size)).map(|(index, _)| index)
    }
}
