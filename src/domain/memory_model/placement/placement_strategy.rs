use std::fmt::Debug;

use crate::domain::memory_model::job::job::Job;
use crate::domain::memory_model::partition::partition_table::{PartitionIndex, PartitionTable};

/// Chooses a partition for a job from the free partitions of a table.
///
/// Implementations are pure: they read the table snapshot and never mutate it.
/// `None` means no free partition is large enough right now.
pub trait PlacementStrategy: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    fn select(&self, partitions: &PartitionTable, job: &Job) -> Option<PartitionIndex>;
}
