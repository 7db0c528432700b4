use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::memory_model::engine::unplaceable_job::UnplaceableJob;
use crate::domain::memory_model::placement::placement_policy::PlacementPolicy;
use crate::domain::memory_model::utils::id::{JobId, PartitionId};

/// Run-time record of one completed job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRecord {
    pub job: JobId,
    pub size: i64,
    pub duration: i64,
    pub arrival_time: i64,
    pub start_time: i64,
    pub finish_time: i64,
    pub waiting_time: i64,
    pub turnaround_time: i64,
    pub partition: PartitionId,
    pub fragmentation: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionUsage {
    pub partition: PartitionId,
    pub capacity: i64,
    pub usage_count: u64,
    pub total_fragmentation: i64,
    pub heavily_used: bool,
}

/// Outcome of one policy run, ready for table, chart or CSV formatting.
///
/// Averages and fractions are 0.0 when their denominator is zero.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    pub policy: PlacementPolicy,

    pub total_jobs: usize,
    pub completed_jobs: usize,

    /// Latest finish time of any completed job.
    pub total_simulation_time: i64,

    /// Completed jobs per time unit.
    pub throughput: f64,

    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,

    pub allocation_count: u64,
    pub total_fragmentation: i64,
    /// Mean of capacity - size over all allocations.
    pub avg_fragmentation: f64,

    pub avg_queue_length: f64,
    pub max_queue_length: usize,
    /// Waiting queue length → number of samples with that length.
    pub queue_length_distribution: BTreeMap<usize, usize>,

    /// Fraction (0..1) of partitions that never held a job.
    pub unused_partitions_fraction: f64,
    /// Fraction (0..1) of partitions used for more than the heavy-use share of all jobs.
    pub heavily_used_partitions_fraction: f64,

    /// In table order.
    pub partition_usage: Vec<PartitionUsage>,

    /// In load order.
    pub job_records: Vec<JobRecord>,

    pub unplaceable: Vec<UnplaceableJob>,
}

impl SimulationResult {
    pub fn record(&self, job: JobId) -> Option<&JobRecord> {
        self.job_records.iter().find(|record| record.job == job)
    }

    pub fn is_complete(&self) -> bool {
        self.completed_jobs == self.total_jobs
    }
}
