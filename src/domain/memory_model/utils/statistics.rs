use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;

use crate::domain::memory_model::statistics::simulation_result::{JobRecord, SimulationResult};
use crate::error::Result;

/// Each row consists of a set of key-value-pairs with the measured data or some meta data.
/// This enum specifies all allowed keys and thus the columns in the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatParameter {
    /// Placement policy of the run
    Policy,

    /// "JOB" for per-job rows, "SUMMARY" for per-run rows
    RowType,

    // Job
    JobId,
    JobSize,
    ArrivalTime,
    StartTime,
    FinishTime,
    WaitingTime,
    TurnaroundTime,
    PartitionId,
    Fragmentation,

    // Summary
    CompletedJobs,
    UnplaceableJobs,
    TotalSimulationTime,
    Throughput,
    AvgWaitingTime,
    AvgTurnaroundTime,
    AvgFragmentation,
    AvgQueueLength,
    UnusedPartitions,
    HeavilyUsedPartitions,
}

impl StatParameter {
    /// Column order of the CSV output.
    pub const COLUMNS: [StatParameter; 21] = [
        StatParameter::Policy,
        StatParameter::RowType,
        StatParameter::JobId,
        StatParameter::JobSize,
        StatParameter::ArrivalTime,
        StatParameter::StartTime,
        StatParameter::FinishTime,
        StatParameter::WaitingTime,
        StatParameter::TurnaroundTime,
        StatParameter::PartitionId,
        StatParameter::Fragmentation,
        StatParameter::CompletedJobs,
        StatParameter::UnplaceableJobs,
        StatParameter::TotalSimulationTime,
        StatParameter::Throughput,
        StatParameter::AvgWaitingTime,
        StatParameter::AvgTurnaroundTime,
        StatParameter::AvgFragmentation,
        StatParameter::AvgQueueLength,
        StatParameter::UnusedPartitions,
        StatParameter::HeavilyUsedPartitions,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            StatParameter::Policy => "Policy",
            StatParameter::RowType => "RowType",
            StatParameter::JobId => "JobId",
            StatParameter::JobSize => "JobSize",
            StatParameter::ArrivalTime => "ArrivalTime",
            StatParameter::StartTime => "StartTime",
            StatParameter::FinishTime => "FinishTime",
            StatParameter::WaitingTime => "WaitingTime",
            StatParameter::TurnaroundTime => "TurnaroundTime",
            StatParameter::PartitionId => "PartitionId",
            StatParameter::Fragmentation => "Fragmentation",
            StatParameter::CompletedJobs => "CompletedJobs",
            StatParameter::UnplaceableJobs => "UnplaceableJobs",
            StatParameter::TotalSimulationTime => "TotalSimulationTime",
            StatParameter::Throughput => "Throughput",
            StatParameter::AvgWaitingTime => "AvgWaitingTime",
            StatParameter::AvgTurnaroundTime => "AvgTurnaroundTime",
            StatParameter::AvgFragmentation => "AvgFragmentation",
            StatParameter::AvgQueueLength => "AvgQueueLength",
            StatParameter::UnusedPartitions => "UnusedPartitions",
            StatParameter::HeavilyUsedPartitions => "HeavilyUsedPartitions",
        }
    }
}

/// store values in their native format, only format them when writing to the CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for StatValue {
    fn from(v: i64) -> Self {
        StatValue::Integer(v)
    }
}

/// Values beyond `i64::MAX` are kept as their decimal text.
impl From<u64> for StatValue {
    fn from(v: u64) -> Self {
        i64::try_from(v).map(StatValue::Integer).unwrap_or_else(|_| StatValue::Text(v.to_string()))
    }
}

impl From<usize> for StatValue {
    fn from(v: usize) -> Self {
        StatValue::from(v as u64)
    }
}

impl From<f64> for StatValue {
    fn from(v: f64) -> Self {
        StatValue::Float(v)
    }
}

impl From<&str> for StatValue {
    fn from(v: &str) -> Self {
        StatValue::Text(v.to_string())
    }
}

impl StatValue {
    fn render(&self) -> String {
        match self {
            StatValue::Integer(i) => i.to_string(),
            StatValue::Float(f) => format!("{:.4}", f),
            StatValue::Text(t) => t.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatisticEvent {
    data: HashMap<StatParameter, StatValue>,
}

impl StatisticEvent {
    pub fn new() -> Self {
        Self { data: HashMap::new() }
    }

    pub fn set<V: Into<StatValue>>(&mut self, param: StatParameter, value: V) -> &mut Self {
        self.data.insert(param, value.into());
        self
    }

    fn get(&self, param: StatParameter) -> Option<&StatValue> {
        self.data.get(&param)
    }

    fn row(&self) -> Vec<String> {
        StatParameter::COLUMNS.iter().map(|param| self.get(*param).map(StatValue::render).unwrap_or_else(|| "NA".to_string())).collect()
    }

    pub fn from_job_record(result: &SimulationResult, record: &JobRecord) -> Self {
        let mut event = StatisticEvent::new();
        event
            .set(StatParameter::Policy, result.policy.name())
            .set(StatParameter::RowType, "JOB")
            .set(StatParameter::JobId, record.job.value())
            .set(StatParameter::JobSize, record.size)
            .set(StatParameter::ArrivalTime, record.arrival_time)
            .set(StatParameter::StartTime, record.start_time)
            .set(StatParameter::FinishTime, record.finish_time)
            .set(StatParameter::WaitingTime, record.waiting_time)
            .set(StatParameter::TurnaroundTime, record.turnaround_time)
            .set(StatParameter::PartitionId, record.partition.value())
            .set(StatParameter::Fragmentation, record.fragmentation);
        event
    }

    pub fn from_summary(result: &SimulationResult) -> Self {
        let mut event = StatisticEvent::new();
        event
            .set(StatParameter::Policy, result.policy.name())
            .set(StatParameter::RowType, "SUMMARY")
            .set(StatParameter::CompletedJobs, result.completed_jobs)
            .set(StatParameter::UnplaceableJobs, result.unplaceable.len())
            .set(StatParameter::TotalSimulationTime, result.total_simulation_time)
            .set(StatParameter::Throughput, result.throughput)
            .set(StatParameter::AvgWaitingTime, result.avg_waiting_time)
            .set(StatParameter::AvgTurnaroundTime, result.avg_turnaround_time)
            .set(StatParameter::AvgFragmentation, result.avg_fragmentation)
            .set(StatParameter::AvgQueueLength, result.avg_queue_length)
            .set(StatParameter::UnusedPartitions, result.unused_partitions_fraction)
            .set(StatParameter::HeavilyUsedPartitions, result.heavily_used_partitions_fraction);
        event
    }
}

/// Writes simulation results as `;`-delimited CSV. Missing values are written as `NA`.
pub struct StatsWriter<W: Write> {
    csv_wtr: csv::Writer<W>,
}

impl<W: Write> StatsWriter<W> {
    /// Creates the writer and emits the header row.
    pub fn new(writer: W) -> Result<Self> {
        let mut csv_wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);
        csv_wtr.write_record(StatParameter::COLUMNS.iter().map(StatParameter::header))?;
        Ok(StatsWriter { csv_wtr })
    }

    pub fn add_event(&mut self, event: &StatisticEvent) -> Result<()> {
        self.csv_wtr.write_record(event.row())?;
        Ok(())
    }

    /// One row per completed job followed by the summary row.
    pub fn write_result(&mut self, result: &SimulationResult) -> Result<()> {
        for record in &result.job_records {
            self.add_event(&StatisticEvent::from_job_record(result, record))?;
        }
        self.add_event(&StatisticEvent::from_summary(result))
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.csv_wtr.into_inner().map_err(|e| crate::error::Error::IoError(e.into_error()))
    }
}
