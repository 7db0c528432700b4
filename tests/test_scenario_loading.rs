use std::path::PathBuf;

use partition_sim::api::scenario_dto::ScenarioDto;
use partition_sim::domain::memory_model::placement::placement_policy::PlacementPolicy;
use partition_sim::domain::memory_model::scenario::Scenario;
use partition_sim::domain::memory_model::utils::id::JobId;
use partition_sim::error::Error;
use partition_sim::loader::parser::parse_scenario_csv_files;
use partition_sim::{load_scenario, run_scenario_file};

fn data_file(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(name);
    path.to_string_lossy().into_owned()
}

#[test]
fn test_load_json_scenario() {
    let scenario = load_scenario(&data_file("small_scenario.json")).unwrap();

    assert_eq!(scenario.partitions.len(), 1);
    assert_eq!(scenario.jobs.len(), 2);
    assert_eq!(scenario.config.max_drain_retries, 2);
    assert_eq!(scenario.config.heavy_use_fraction, 0.1);
    assert!(scenario.jobs.iter().all(|job| job.arrival_time == 0));
}

#[test]
fn test_run_scenario_file_runs_all_policies() {
    let results = run_scenario_file(&data_file("small_scenario.json")).unwrap();

    assert_eq!(results.len(), 3);
    for result in &results {
        assert_eq!(result.completed_jobs, 2);
        assert_eq!(result.record(JobId::new(2)).unwrap().waiting_time, 4);
    }
}

#[test]
fn test_load_csv_scenario() {
    let dto = parse_scenario_csv_files(&data_file("jobs.csv"), &data_file("partitions.csv")).unwrap();
    let scenario = Scenario::try_from(dto).unwrap();

    let result = scenario.run(PlacementPolicy::WorstFit).unwrap();
    assert_eq!(result.completed_jobs, 2);
    assert_eq!(result.total_simulation_time, 5);
}

#[test]
fn test_missing_file_is_io_error() {
    let result = load_scenario(&data_file("does_not_exist.json"));
    assert!(matches!(result, Err(Error::IoError(_))));
}

#[test]
fn test_invalid_json_values_are_rejected() {
    let duplicate_ids = r#"{ "partitions": [{ "id": 1, "capacity": 50 }, { "id": 1, "capacity": 60 }], "jobs": [] }"#;
    let zero_size = r#"{ "partitions": [{ "id": 1, "capacity": 50 }], "jobs": [{ "id": 1, "size": 0, "duration": 1 }] }"#;
    let bad_fraction = r#"{ "partitions": [], "jobs": [], "config": { "heavyUseFraction": 1.5 } }"#;

    for json in [duplicate_ids, zero_size, bad_fraction] {
        let dto: ScenarioDto = serde_json::from_str(json).unwrap();
        let result = Scenario::try_from(dto);
        assert!(matches!(result, Err(Error::ModelConstructionError(_))), "{}", json);
    }
}
