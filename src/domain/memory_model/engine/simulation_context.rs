use std::collections::VecDeque;

use crate::domain::memory_model::engine::unplaceable_job::{UnplaceableJob, UnplaceableReason};
use crate::domain::memory_model::event::event::EventKind;
use crate::domain::memory_model::event::event_queue::EventQueue;
use crate::domain::memory_model::job::job::{Job, JobState};
use crate::domain::memory_model::job::job_set::{JobKey, JobSet};
use crate::domain::memory_model::partition::partition_table::PartitionTable;
use crate::domain::simulator::clock::SimulationClock;
use crate::error::{Error, Result};

/// All mutable state of one simulation run. Owned exclusively by the engine.
#[derive(Debug, Clone)]
pub struct SimulationContext {
    pub clock: SimulationClock,

    pub partitions: PartitionTable,

    pub jobs: JobSet,

    /// Arrived jobs without a partition, in arrival order.
    pub waiting_queue: VecDeque<JobKey>,

    pub events: EventQueue,

    /// Completed jobs in completion order.
    pub completed: Vec<JobKey>,

    pub unplaceable: Vec<UnplaceableJob>,

    /// Waiting queue length after every processed event.
    pub queue_length_samples: Vec<usize>,
}

impl SimulationContext {
    /// Builds the context and schedules the arrival of every job.
    pub fn new(partitions: PartitionTable, jobs: JobSet) -> Self {
        let mut events = EventQueue::new();

        for key in jobs.keys() {
            if let Some(job) = jobs.get(key) {
                events.push(job.arrival_time, EventKind::Arrival, key);
            }
        }

        SimulationContext {
            clock: SimulationClock::new(),
            partitions,
            jobs,
            waiting_queue: VecDeque::new(),
            events,
            completed: Vec::new(),
            unplaceable: Vec::new(),
            queue_length_samples: Vec::new(),
        }
    }

    pub fn job(&self, key: JobKey) -> Result<&Job> {
        self.jobs.get(key).ok_or_else(|| Error::InconsistentState(format!("Unknown job key {:?}.", key)))
    }

    pub fn job_mut(&mut self, key: JobKey) -> Result<&mut Job> {
        self.jobs.get_mut(key).ok_or_else(|| Error::InconsistentState(format!("Unknown job key {:?}.", key)))
    }

    /// Moves the clock to `time`; every waiting job accrues the elapsed time.
    pub fn advance_clock(&mut self, time: i64) {
        let elapsed = self.clock.advance_to(time);
        if elapsed == 0 {
            return;
        }

        for key in self.waiting_queue.iter() {
            if let Some(job) = self.jobs.get_mut(*key) {
                job.waiting_time += elapsed;
            }
        }
    }

    pub fn sample_queue_length(&mut self) {
        self.queue_length_samples.push(self.waiting_queue.len());
    }

    pub fn mark_unplaceable(&mut self, key: JobKey, reason: UnplaceableReason) -> Result<()> {
        let now = self.clock.now();
        let job = self.job_mut(key)?;
        job.state = JobState::Unplaceable;

        let record = UnplaceableJob { job: job.id, size: job.size, detected_at: now, reason };
        log::warn!("Job is unplaceable: {}.", record);
        self.unplaceable.push(record);

        Ok(())
    }

    /// True when nothing is left to do.
    pub fn is_settled(&self) -> bool {
        self.events.is_empty() && self.waiting_queue.is_empty()
    }
}
