use std::thread;

use crate::api::scenario_dto::ScenarioDto;
use crate::domain::memory_model::engine::engine::SimulationEngine;
use crate::domain::memory_model::engine::simulation_config::SimulationConfig;
use crate::domain::memory_model::job::job::Job;
use crate::domain::memory_model::job::job_set::JobSet;
use crate::domain::memory_model::partition::partition::Partition;
use crate::domain::memory_model::partition::partition_table::PartitionTable;
use crate::domain::memory_model::placement::placement_policy::PlacementPolicy;
use crate::domain::memory_model::statistics::simulation_result::SimulationResult;
use crate::domain::memory_model::utils::id::{JobId, PartitionId};
use crate::error::{Error, Result};

/// 25 jobs on 10 blocks, every job arriving at time 0.
const REFERENCE_SCENARIO_JSON: &str = include_str!("../../../data/reference_scenario.json");

/// Validated static input of a simulation: partitions, jobs and configuration.
///
/// Every run clones the partitions and jobs, so a scenario can be simulated
/// under several policies without one run seeing the state of another.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub partitions: PartitionTable,
    pub jobs: JobSet,
    pub config: SimulationConfig,
}

impl Scenario {
    pub fn new(partitions: Vec<Partition>, jobs: Vec<Job>, config: SimulationConfig) -> Result<Self> {
        let partitions = PartitionTable::new(partitions)?;

        let mut job_set = JobSet::new();
        for job in jobs {
            job_set.add(job)?;
        }

        Ok(Scenario { partitions, jobs: job_set, config })
    }

    pub fn reference() -> Result<Self> {
        let dto: ScenarioDto = serde_json::from_str(REFERENCE_SCENARIO_JSON)?;
        Scenario::try_from(dto)
    }

    pub fn engine(&self, policy: PlacementPolicy) -> SimulationEngine {
        SimulationEngine::new(policy, self.config, self.partitions.clone(), self.jobs.clone())
    }

    pub fn run(&self, policy: PlacementPolicy) -> Result<SimulationResult> {
        self.engine(policy).run_to_result()
    }

    /// Runs the given policies as independent simulations on separate threads.
    ///
    /// # Returns
    /// One result per policy, in the order the policies were given.
    pub fn run_policies(&self, policies: &[PlacementPolicy]) -> Result<Vec<SimulationResult>> {
        thread::scope(|scope| {
            let handles: Vec<_> = policies.iter().map(|&policy| scope.spawn(move || self.run(policy))).collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|_| Err(Error::InconsistentState("Simulation thread panicked.".to_string()))))
                .collect()
        })
    }

    /// First-fit, best-fit and worst-fit, in that order.
    pub fn run_all_policies(&self) -> Result<Vec<SimulationResult>> {
        self.run_policies(&PlacementPolicy::ALL)
    }
}

impl TryFrom<ScenarioDto> for Scenario {
    type Error = Error;

    fn try_from(dto: ScenarioDto) -> Result<Self> {
        let partitions = dto.partitions.iter().map(|p| Partition::new(PartitionId::new(p.id), p.capacity)).collect();
        let jobs = dto.jobs.iter().map(|j| Job::new(JobId::new(j.id), j.size, j.duration, j.arrival_time.unwrap_or(0))).collect();
        let config = SimulationConfig::try_from(dto.config)?;

        Scenario::new(partitions, jobs, config)
    }
}
