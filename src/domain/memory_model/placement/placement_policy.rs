use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::memory_model::job::job::Job;
use crate::domain::memory_model::partition::partition_table::{PartitionIndex, PartitionTable};
use crate::domain::memory_model::placement::{best_fit::BestFit, first_fit::FirstFit, placement_strategy::PlacementStrategy, worst_fit::WorstFit};
use crate::error::ConversionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlacementPolicy {
    FirstFit,
    BestFit,
    WorstFit,
}

impl PlacementPolicy {
    pub const ALL: [PlacementPolicy; 3] = [PlacementPolicy::FirstFit, PlacementPolicy::BestFit, PlacementPolicy::WorstFit];

    /// The strategy implementing this policy.
    pub fn strategy(&self) -> &'static dyn PlacementStrategy {
        match self {
            PlacementPolicy::FirstFit => &FirstFit,
            PlacementPolicy::BestFit => &BestFit,
            PlacementPolicy::WorstFit => &WorstFit,
        }
    }

    pub fn select(&self, partitions: &PartitionTable, job: &Job) -> Option<PartitionIndex> {
        self.strategy().select(partitions, job)
    }

    pub fn name(&self) -> &'static str {
        self.strategy().name()
    }
}

impl fmt::Display for PlacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlacementPolicy {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "firstfit" => Ok(PlacementPolicy::FirstFit),
            "bestfit" => Ok(PlacementPolicy::BestFit),
            "worstfit" => Ok(PlacementPolicy::WorstFit),
            _ => Err(ConversionError::UnknownPlacementPolicy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::memory_model::partition::partition::Partition;
    use crate::domain::memory_model::utils::id::{JobId, PartitionId};

    fn table(capacities: &[i64]) -> PartitionTable {
        let partitions = capacities.iter().enumerate().map(|(i, &cap)| Partition::new(PartitionId::new(i as u64 + 1), cap)).collect();
        PartitionTable::new(partitions).unwrap()
    }

    fn job(size: i64) -> Job {
        Job::new(JobId::new(1), size, 1, 0)
    }

    #[test]
    fn parses_common_spellings() {
        assert_eq!("first-fit".parse::<PlacementPolicy>(), Ok(PlacementPolicy::FirstFit));
        assert_eq!("Best-fit".parse::<PlacementPolicy>(), Ok(PlacementPolicy::BestFit));
        assert_eq!("WorstFit".parse::<PlacementPolicy>(), Ok(PlacementPolicy::WorstFit));
        assert_eq!("next-fit".parse::<PlacementPolicy>(), Err(ConversionError::UnknownPlacementPolicy("next-fit".to_string())));
    }

    #[test]
    fn first_fit_takes_table_order() {
        let table = table(&[30, 100, 60]);
        assert_eq!(PlacementPolicy::FirstFit.select(&table, &job(50)), Some(1));
    }

    #[test]
    fn best_fit_takes_tightest() {
        let table = table(&[30, 100, 60]);
        assert_eq!(PlacementPolicy::BestFit.select(&table, &job(50)), Some(2));
    }

    #[test]
    fn worst_fit_takes_loosest() {
        let table = table(&[30, 60, 100]);
        assert_eq!(PlacementPolicy::WorstFit.select(&table, &job(50)), Some(2));
    }

    #[test]
    fn ties_go_to_first_in_table_order() {
        let table = table(&[80, 60, 80, 60]);
        assert_eq!(PlacementPolicy::BestFit.select(&table, &job(50)), Some(1));
        assert_eq!(PlacementPolicy::WorstFit.select(&table, &job(50)), Some(0));
    }

    #[test]
    fn occupied_partitions_are_skipped() {
        let mut table = table(&[60, 100]);
        table.allocate(0, JobId::new(9), 10).unwrap();

        for policy in PlacementPolicy::ALL {
            assert_eq!(policy.select(&table, &job(50)), Some(1), "{policy}");
        }
    }

    #[test]
    fn no_partition_large_enough() {
        let table = table(&[30, 40]);

        for policy in PlacementPolicy::ALL {
            assert_eq!(policy.select(&table, &job(50)), None, "{policy}");
        }
    }

    #[test]
    fn selection_does_not_mutate_table() {
        let table = table(&[60]);
        let _ = PlacementPolicy::BestFit.select(&table, &job(50));
        assert!(table.get(0).unwrap().is_free());
        assert_eq!(table.total_usage(), 0);
    }
}
