use crate::domain::memory_model::job::job::Job;
use crate::domain::memory_model::partition::partition_table::{PartitionIndex, PartitionTable};
use crate::domain::memory_model::placement::placement_strategy::PlacementStrategy;

/// Takes the free partition that leaves the least unused capacity.
/// On equal slack the partition earlier in table order wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestFit;

impl PlacementStrategy for BestFit {
    fn name(&self) -> &'static str {
        "Best-fit"
    }

    fn select(&self, partitions: &PartitionTable, job: &Job) -> Option<PartitionIndex> {
        let mut best: Option<(PartitionIndex, i64)> = None;

        for (index, partition) in partitions.free_partitions() {
            if !partition.fits(job.size) {
                continue;
            }

            let slack = partition.slack(job.size);
            match best {
                Some((_, best_slack)) if best_slack <= slack => {}
                _ => best = Some((index, slack)),
            }
        }

        best.map(|(index, _)| index)
    }
}
