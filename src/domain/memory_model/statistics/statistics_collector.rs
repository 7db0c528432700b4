//! Derives the metrics of a finished run from its simulation context.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Throughput | completed jobs / latest finish time |
//! | Avg waiting time | mean accumulated waiting time of completed jobs |
//! | Avg turnaround time | mean (finish - arrival) of completed jobs |
//! | Avg fragmentation | mean (capacity - size) over all allocations |
//! | Avg queue length | mean of the waiting queue samples |
//! | Unused partitions | partitions with zero allocations / partitions |
//! | Heavily used partitions | partitions with usage > fraction × jobs / partitions |

use std::collections::BTreeMap;

use crate::domain::memory_model::engine::simulation_config::SimulationConfig;
use crate::domain::memory_model::engine::simulation_context::SimulationContext;
use crate::domain::memory_model::job::job::Job;
use crate::domain::memory_model::placement::placement_policy::PlacementPolicy;
use crate::domain::memory_model::statistics::simulation_result::{JobRecord, PartitionUsage, SimulationResult};

pub struct StatisticsCollector;

impl StatisticsCollector {
    pub fn collect(policy: PlacementPolicy, config: &SimulationConfig, ctx: &SimulationContext) -> SimulationResult {
        let job_records: Vec<JobRecord> = ctx.jobs.iter().filter_map(|job| Self::job_record(ctx, job)).collect();

        let completed_jobs = job_records.len();
        let total_simulation_time = job_records.iter().map(|record| record.finish_time).max().unwrap_or(0);

        let throughput = if total_simulation_time > 0 { completed_jobs as f64 / total_simulation_time as f64 } else { 0.0 };
        let avg_waiting_time = mean(job_records.iter().map(|record| record.waiting_time as f64), completed_jobs);
        let avg_turnaround_time = mean(job_records.iter().map(|record| record.turnaround_time as f64), completed_jobs);

        let allocation_count = ctx.partitions.total_usage();
        let total_fragmentation: i64 = ctx.partitions.iter().map(|(_, partition)| partition.total_fragmentation).sum();
        let avg_fragmentation = if allocation_count > 0 { total_fragmentation as f64 / allocation_count as f64 } else { 0.0 };

        let samples = &ctx.queue_length_samples;
        let avg_queue_length = mean(samples.iter().map(|&len| len as f64), samples.len());
        let max_queue_length = samples.iter().copied().max().unwrap_or(0);
        let mut queue_length_distribution = BTreeMap::new();
        for &len in samples {
            *queue_length_distribution.entry(len).or_insert(0) += 1;
        }

        let heavy_use_threshold = config.heavy_use_fraction * ctx.jobs.len() as f64;
        let partition_usage: Vec<PartitionUsage> = ctx
            .partitions
            .iter()
            .map(|(_, partition)| PartitionUsage {
                partition: partition.id,
                capacity: partition.capacity,
                usage_count: partition.usage_count,
                total_fragmentation: partition.total_fragmentation,
                heavily_used: partition.usage_count as f64 > heavy_use_threshold,
            })
            .collect();

        let partition_count = partition_usage.len();
        let unused = partition_usage.iter().filter(|usage| usage.usage_count == 0).count();
        let heavy = partition_usage.iter().filter(|usage| usage.heavily_used).count();

        SimulationResult {
            policy,
            total_jobs: ctx.jobs.len(),
            completed_jobs,
            total_simulation_time,
            throughput,
            avg_waiting_time,
            avg_turnaround_time,
            allocation_count,
            total_fragmentation,
            avg_fragmentation,
            avg_queue_length,
            max_queue_length,
            queue_length_distribution,
            unused_partitions_fraction: fraction(unused, partition_count),
            heavily_used_partitions_fraction: fraction(heavy, partition_count),
            partition_usage,
            job_records,
            unplaceable: ctx.unplaceable.clone(),
        }
    }

    fn job_record(ctx: &SimulationContext, job: &Job) -> Option<JobRecord> {
        if !job.is_completed() {
            return None;
        }

        let partition = ctx.partitions.get(job.partition?)?.id;
        let finish_time = job.finish_time?;

        Some(JobRecord {
            job: job.id,
            size: job.size,
            duration: job.duration,
            arrival_time: job.arrival_time,
            start_time: job.start_time?,
            finish_time,
            waiting_time: job.waiting_time,
            turnaround_time: job.turnaround_time()?,
            partition,
            fragmentation: job.fragmentation?,
        })
    }
}

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}

fn fraction(part: usize, whole: usize) -> f64 {
    if whole == 0 { 0.0 } else { part as f64 / whole as f64 }
}
