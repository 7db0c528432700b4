use partition_sim::domain::memory_model::engine::simulation_config::SimulationConfig;
use partition_sim::domain::memory_model::job::job::Job;
use partition_sim::domain::memory_model::partition::partition::Partition;
use partition_sim::domain::memory_model::placement::placement_policy::PlacementPolicy;
use partition_sim::domain::memory_model::scenario::Scenario;
use partition_sim::domain::memory_model::utils::id::{JobId, PartitionId};
use partition_sim::domain::memory_model::utils::statistics::{StatParameter, StatsWriter};

fn export(scenario: &Scenario, policies: &[PlacementPolicy]) -> String {
    let results = scenario.run_policies(policies).unwrap();

    let mut writer = StatsWriter::new(Vec::new()).unwrap();
    for result in &results {
        writer.write_result(result).unwrap();
    }

    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}

fn two_job_scenario() -> Scenario {
    let partitions = vec![Partition::new(PartitionId::new(1), 100), Partition::new(PartitionId::new(2), 50)];
    let jobs = vec![Job::new(JobId::new(1), 60, 5, 0), Job::new(JobId::new(2), 40, 3, 0)];
    Scenario::new(partitions, jobs, SimulationConfig::default()).unwrap()
}

#[test]
fn test_header_lists_every_column() {
    let output = export(&two_job_scenario(), &[PlacementPolicy::FirstFit]);

    let header: Vec<&str> = output.lines().next().unwrap().split(';').collect();
    assert_eq!(header.len(), StatParameter::COLUMNS.len());
    assert_eq!(header[0], "Policy");
    assert_eq!(header[1], "RowType");
    assert!(header.contains(&"AvgFragmentation"));
}

#[test]
fn test_one_row_per_job_plus_summary() {
    let output = export(&two_job_scenario(), &[PlacementPolicy::FirstFit]);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("First-fit;JOB;1;60;0;0;5;0;5;1;40;"));
    assert!(lines[2].starts_with("First-fit;JOB;2;40;0;0;3;0;3;2;10;"));
    assert!(lines[3].starts_with("First-fit;SUMMARY;NA;"));
}

#[test]
fn test_summary_row_formats_floats_and_fills_job_columns_with_na() {
    let output = export(&two_job_scenario(), &[PlacementPolicy::BestFit]);
    let summary: Vec<&str> = output.lines().last().unwrap().split(';').collect();

    let column = |param: StatParameter| StatParameter::COLUMNS.iter().position(|p| *p == param).unwrap();

    assert_eq!(summary[column(StatParameter::JobId)], "NA");
    assert_eq!(summary[column(StatParameter::Fragmentation)], "NA");
    assert_eq!(summary[column(StatParameter::CompletedJobs)], "2");
    assert_eq!(summary[column(StatParameter::UnplaceableJobs)], "0");
    assert_eq!(summary[column(StatParameter::TotalSimulationTime)], "5");
    assert_eq!(summary[column(StatParameter::Throughput)], "0.4000");
    assert_eq!(summary[column(StatParameter::AvgFragmentation)], "25.0000");
}

#[test]
fn test_results_of_several_policies_share_one_header() {
    let output = export(&two_job_scenario(), &PlacementPolicy::ALL);

    assert_eq!(output.lines().filter(|line| line.starts_with("Policy;")).count(), 1);
    assert_eq!(output.lines().filter(|line| line.contains(";SUMMARY;")).count(), 3);
}
