use crate::domain::memory_model::job::job::Job;
use crate::domain::memory_model::partition::partition_table::{PartitionIndex, PartitionTable};
use crate::domain::memory_model::placement::placement_strategy::PlacementStrategy;

/// Takes the free partition that leaves the most unused capacity.
/// On equal slack the partition earlier in table order wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorstFit;

impl PlacementStrategy for WorstFit {
    fn name(&self) -> &'static str {
        "Worst-fit"
    }

    fn select(&self, partitions: &PartitionTable, job: &Job) -> Option<PartitionIndex> {
        let mut worst: Option<(PartitionIndex, i64)> = None;

        for (index, partition) in partitions.free_partitions() {
            if !partition.fits(job.size) {
                continue;
            }

            let slack = partition.slack(job.size);
            match worst {
                Some((_, worst_slack)) if worst_slack >= slack => {}
                _ => worst = Some((index, slack)),
            }
        }

        worst.map(|(index, _)| index)
    }
}
