use crate::api::scenario_dto::ScenarioDto;
use crate::domain::memory_model::scenario::Scenario;
use crate::domain::memory_model::statistics::simulation_result::SimulationResult;
use crate::error::Result;
use crate::loader::parser::parse_json_file;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

/// Loads a scenario JSON file and simulates it under all three placement policies.
pub fn run_scenario_file(file_path: &str) -> Result<Vec<SimulationResult>> {
    let scenario = load_scenario(file_path)?;
    scenario.run_all_policies()
}

pub fn load_scenario(file_path: &str) -> Result<Scenario> {
    let root_dto: ScenarioDto = parse_json_file(file_path)?;
    log::info!("Scenario file '{}' parsed successfully.", file_path);

    let scenario = Scenario::try_from(root_dto)?;
    log::info!("Scenario constructed: {} partitions, {} jobs.", scenario.partitions.len(), scenario.jobs.len());

    Ok(scenario)
}
