use serde::Serialize;

use crate::domain::memory_model::partition::partition_table::PartitionIndex;
use crate::domain::memory_model::utils::id::JobId;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JobState {
    /// Loaded, arrival event not yet processed.
    Pending,
    /// Arrived, waiting for a partition.
    Waiting,
    /// Placed in a partition.
    Running,
    Completed,
    /// Will never be placed in this run.
    Unplaceable,
}

#[derive(Debug, Clone, Serialize)]
pub struct Job {
    pub id: JobId,

    /// Memory demand.
    pub size: i64,

    /// Time units needed once running. Jobs are never preempted.
    pub duration: i64,

    pub arrival_time: i64,

    pub state: JobState,

    /// Set once, at the first (and only) allocation.
    pub start_time: Option<i64>,

    /// Set at completion; always `start_time + duration`.
    pub finish_time: Option<i64>,

    /// Time spent arrived but not running.
    pub waiting_time: i64,

    /// Table position of the partition the job runs in.
    pub partition: Option<PartitionIndex>,

    /// Internal fragmentation of the job's allocation.
    pub fragmentation: Option<i64>,
}

impl Job {
    pub fn new(id: JobId, size: i64, duration: i64, arrival_time: i64) -> Self {
        Job {
            id,
            size,
            duration,
            arrival_time,
            state: JobState::Pending,
            start_time: None,
            finish_time: None,
            waiting_time: 0,
            partition: None,
            fragmentation: None,
        }
    }

    /// Marks the job as running in `partition` from `now` on.
    ///
    /// # Returns
    /// The time at which the job will complete, or `Error::InconsistentState`
    /// if that time is not representable.
    pub fn start(&mut self, now: i64, partition: PartitionIndex, fragmentation: i64) -> Result<i64> {
        debug_assert!(self.start_time.is_none(), "Job {} started twice", self.id);

        let finish = now
            .checked_add(self.duration)
            .ok_or_else(|| Error::InconsistentState(format!("Job {} started at {} cannot finish: time overflow.", self.id, now)))?;

        self.state = JobState::Running;
        self.start_time = Some(now);
        self.partition = Some(partition);
        self.fragmentation = Some(fragmentation);
        Ok(finish)
    }

    /// Marks the job as completed and returns the partition it has to give back.
    pub fn complete(&mut self, now: i64) -> Option<PartitionIndex> {
        debug_assert_eq!(self.state, JobState::Running, "Job {} completed without running", self.id);
        debug_assert_eq!(self.start_time.map(|start| start + self.duration), Some(now), "Job {} completed off schedule", self.id);

        self.state = JobState::Completed;
        self.finish_time = Some(now);
        self.partition
    }

    pub fn turnaround_time(&self) -> Option<i64> {
        self.finish_time.map(|finish| finish - self.arrival_time)
    }

    pub fn is_completed(&self) -> bool {
        self.state == JobState::Completed
    }
}
