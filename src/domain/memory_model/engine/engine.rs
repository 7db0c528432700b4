use std::collections::VecDeque;

use crate::domain::memory_model::engine::engine_state::EngineState;
use crate::domain::memory_model::engine::simulation_config::SimulationConfig;
use crate::domain::memory_model::engine::simulation_context::SimulationContext;
use crate::domain::memory_model::engine::unplaceable_job::UnplaceableReason;
use crate::domain::memory_model::event::event::{Event, EventKind};
use crate::domain::memory_model::job::job::JobState;
use crate::domain::memory_model::job::job_set::{JobKey, JobSet};
use crate::domain::memory_model::partition::partition_table::PartitionTable;
use crate::domain::memory_model::placement::placement_policy::PlacementPolicy;
use crate::domain::memory_model::statistics::simulation_result::SimulationResult;
use crate::domain::memory_model::statistics::statistics_collector::StatisticsCollector;
use crate::error::{EmptyQueueError, Error, Result};

/// Discrete-event simulation of one placement policy over a fixed partition table.
///
/// Each engine owns private copies of its partitions and jobs, so engines for
/// different policies can run side by side without sharing anything.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    policy: PlacementPolicy,
    config: SimulationConfig,
    state: EngineState,
    ctx: SimulationContext,
}

impl SimulationEngine {
    pub fn new(policy: PlacementPolicy, config: SimulationConfig, partitions: PartitionTable, jobs: JobSet) -> Self {
        SimulationEngine { policy, config, state: EngineState::Idle, ctx: SimulationContext::new(partitions, jobs) }
    }

    pub fn policy(&self) -> PlacementPolicy {
        self.policy
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn context(&self) -> &SimulationContext {
        &self.ctx
    }

    /// Runs the simulation to `Terminated`.
    pub fn run(&mut self) -> Result<()> {
        while self.step()? != EngineState::Terminated {}

        log::info!(
            "{} finished at t = {}: {} completed, {} unplaceable.",
            self.policy,
            self.ctx.clock.now(),
            self.ctx.completed.len(),
            self.ctx.unplaceable.len()
        );

        Ok(())
    }

    /// Runs the simulation and derives its statistics.
    pub fn run_to_result(mut self) -> Result<SimulationResult> {
        self.run()?;
        Ok(StatisticsCollector::collect(self.policy, &self.config, &self.ctx))
    }

    /// Performs one state transition and returns the new state.
    ///
    /// In `Running` one step consumes exactly one event.
    pub fn step(&mut self) -> Result<EngineState> {
        let next = match self.state {
            EngineState::Idle => {
                log::info!(
                    "Starting {} simulation: {} jobs, {} partitions.",
                    self.policy,
                    self.ctx.jobs.len(),
                    self.ctx.partitions.len()
                );
                EngineState::Running
            }
            EngineState::Running => match self.ctx.events.pop_min() {
                Ok(event) => {
                    self.process_event(event)?;
                    EngineState::Running
                }
                Err(EmptyQueueError) if self.ctx.is_settled() => EngineState::Terminated,
                Err(EmptyQueueError) => {
                    log::warn!("{}: event queue empty with {} jobs still waiting.", self.policy, self.ctx.waiting_queue.len());
                    EngineState::Draining
                }
            },
            EngineState::Draining => self.drain()?,
            EngineState::Terminated => EngineState::Terminated,
        };

        self.state = next;
        Ok(next)
    }

    fn process_event(&mut self, event: Event) -> Result<()> {
        self.ctx.advance_clock(event.time);

        match event.kind {
            EventKind::Arrival => self.handle_arrival(event.job)?,
            EventKind::Completion => self.handle_completion(event.job)?,
        }

        self.ctx.sample_queue_length();
        Ok(())
    }

    fn handle_arrival(&mut self, key: JobKey) -> Result<()> {
        let size = self.ctx.job(key)?.size;
        let largest_capacity = self.ctx.partitions.largest_capacity().unwrap_or(0);

        if size > largest_capacity {
            return self.ctx.mark_unplaceable(key, UnplaceableReason::ExceedsLargestPartition { largest_capacity });
        }

        if !self.try_place(key)? {
            let now = self.ctx.clock.now();
            let job = self.ctx.job_mut(key)?;
            job.state = JobState::Waiting;
            log::debug!("t = {}: job {} (size {}) has to wait.", now, job.id, job.size);
            self.ctx.waiting_queue.push_back(key);
        }

        Ok(())
    }

    fn handle_completion(&mut self, key: JobKey) -> Result<()> {
        let now = self.ctx.clock.now();
        let job = self.ctx.job_mut(key)?;
        let job_id = job.id;

        let partition = job.complete(now).ok_or_else(|| Error::InconsistentState(format!("Job {} completed without a partition.", job_id)))?;

        let released = self.ctx.partitions.release(partition)?;
        if released != job_id {
            log::error!("Partition at index {} held job {} but job {} completed there.", partition, released, job_id);
            return Err(Error::InconsistentState(format!("Partition {} released job {} instead of {}.", partition, released, job_id)));
        }

        log::debug!("t = {}: job {} completed, partition index {} released.", now, job_id, partition);
        self.ctx.completed.push(key);

        self.retry_waiting()?;
        Ok(())
    }

    /// Tries to place `key` with the engine's policy.
    ///
    /// # Returns
    /// `true` if the job was allocated and its completion scheduled.
    fn try_place(&mut self, key: JobKey) -> Result<bool> {
        let job = self.ctx.job(key)?;
        let Some(index) = self.policy.select(&self.ctx.partitions, job) else {
            return Ok(false);
        };

        let (job_id, size) = (job.id, job.size);
        let fragmentation = self.ctx.partitions.allocate(index, job_id, size)?;

        let now = self.ctx.clock.now();
        let finish = self.ctx.job_mut(key)?.start(now, index, fragmentation)?;
        self.ctx.events.push(finish, EventKind::Completion, key);

        log::debug!("t = {}: job {} placed at partition index {} (fragmentation {}), finishes at {}.", now, job_id, index, fragmentation, finish);
        Ok(true)
    }

    /// Re-scans the whole waiting queue in FIFO order, placing every job that fits now.
    ///
    /// # Returns
    /// Number of jobs placed.
    fn retry_waiting(&mut self) -> Result<usize> {
        let mut still_waiting = VecDeque::with_capacity(self.ctx.waiting_queue.len());
        let mut placed = 0;

        while let Some(key) = self.ctx.waiting_queue.pop_front() {
            if self.try_place(key)? {
                placed += 1;
            } else {
                still_waiting.push_back(key);
            }
        }

        self.ctx.waiting_queue = still_waiting;
        Ok(placed)
    }

    /// Retries the waiting queue when no event is left.
    ///
    /// Without pending events nothing is running, so no later point in time offers
    /// more free capacity than now: the retries happen at the current instant and
    /// the clock is not stepped.
    fn drain(&mut self) -> Result<EngineState> {
        if !self.ctx.events.is_empty() {
            return Ok(EngineState::Running);
        }

        if self.ctx.partitions.occupied_count() > 0 {
            return Err(Error::InconsistentState("Partitions are occupied but no completion is pending.".to_string()));
        }

        for retry in 1..=self.config.max_drain_retries {
            let placed = self.retry_waiting()?;
            if placed > 0 {
                log::info!("{}: drain retry {} placed {} waiting jobs.", self.policy, retry, placed);
                return Ok(EngineState::Running);
            }
        }

        let stalled: Vec<JobKey> = self.ctx.waiting_queue.drain(..).collect();
        log::warn!("{}: giving up on {} waiting jobs after {} drain retries.", self.policy, stalled.len(), self.config.max_drain_retries);

        for key in stalled {
            self.ctx.mark_unplaceable(key, UnplaceableReason::DrainRetriesExhausted { retries: self.config.max_drain_retries })?;
        }

        Ok(EngineState::Terminated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::memory_model::job::job::Job;
    use crate::domain::memory_model::partition::partition::Partition;
    use crate::domain::memory_model::utils::id::{JobId, PartitionId};

    fn engine(policy: PlacementPolicy, capacities: &[i64], jobs: &[(u64, i64, i64, i64)]) -> SimulationEngine {
        let partitions = capacities.iter().enumerate().map(|(i, &cap)| Partition::new(PartitionId::new(i as u64 + 1), cap)).collect();
        let mut job_set = JobSet::new();
        for &(id, size, duration, arrival) in jobs {
            job_set.add(Job::new(JobId::new(id), size, duration, arrival)).unwrap();
        }
        SimulationEngine::new(policy, SimulationConfig::default(), PartitionTable::new(partitions).unwrap(), job_set)
    }

    #[test]
    fn state_machine_walks_idle_running_terminated() {
        let mut engine = engine(PlacementPolicy::FirstFit, &[50], &[(1, 10, 2, 0)]);
        assert_eq!(engine.state(), EngineState::Idle);

        assert_eq!(engine.step().unwrap(), EngineState::Running);
        // arrival, completion
        assert_eq!(engine.step().unwrap(), EngineState::Running);
        assert_eq!(engine.step().unwrap(), EngineState::Running);
        assert_eq!(engine.step().unwrap(), EngineState::Terminated);
        assert_eq!(engine.step().unwrap(), EngineState::Terminated);
    }

    #[test]
    fn waiting_job_accrues_time_across_several_events() {
        // One partition; job 3 arrives at 1 and waits behind jobs 1 and 2.
        let mut engine = engine(PlacementPolicy::FirstFit, &[50], &[(1, 40, 3, 0), (2, 40, 2, 0), (3, 40, 1, 1)]);
        engine.run().unwrap();

        let ctx = engine.context();
        let wait = |id: u64| ctx.jobs.get_by_id(JobId::new(id)).unwrap().waiting_time;
        let start = |id: u64| ctx.jobs.get_by_id(JobId::new(id)).unwrap().start_time.unwrap();

        assert_eq!((start(1), wait(1)), (0, 0));
        assert_eq!((start(2), wait(2)), (3, 3));
        assert_eq!((start(3), wait(3)), (5, 4));
    }

    #[test]
    fn stalled_waiting_jobs_are_given_up_after_retry_bound() {
        let mut engine = engine(PlacementPolicy::BestFit, &[50], &[]);
        let mut jobs = JobSet::new();
        let key = jobs.add(Job::new(JobId::new(7), 80, 1, 0)).unwrap();
        engine.ctx.jobs = jobs;
        engine.ctx.waiting_queue.push_back(key);
        engine.state = EngineState::Running;

        assert_eq!(engine.step().unwrap(), EngineState::Draining);
        assert_eq!(engine.step().unwrap(), EngineState::Terminated);

        let unplaceable = &engine.context().unplaceable;
        assert_eq!(unplaceable.len(), 1);
        assert_eq!(unplaceable[0].job, JobId::new(7));
        assert_eq!(unplaceable[0].reason, UnplaceableReason::DrainRetriesExhausted { retries: 3 });
        assert!(engine.context().waiting_queue.is_empty());
    }

    #[test]
    fn drain_places_jobs_that_fit_at_current_instant() {
        let mut engine = engine(PlacementPolicy::WorstFit, &[50], &[]);
        let mut jobs = JobSet::new();
        let key = jobs.add(Job::new(JobId::new(1), 20, 2, 0)).unwrap();
        engine.ctx.jobs = jobs;
        engine.ctx.waiting_queue.push_back(key);
        engine.state = EngineState::Draining;

        assert_eq!(engine.step().unwrap(), EngineState::Running);
        engine.run().unwrap();

        assert_eq!(engine.context().completed, vec![key]);
        assert!(engine.context().unplaceable.is_empty());
    }
}
