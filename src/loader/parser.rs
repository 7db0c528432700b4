use serde::de::DeserializeOwned;
use std::fs;
use std::io::Read;

use crate::api::scenario_dto::{JobDto, PartitionDto, ScenarioDto, SimulationConfigDto};
use crate::error::{Error, Result};

/// Parses a JSON file into a given type `T`.
///
/// This function reads a file from `file_path`, attempts to parse it
/// as JSON, and returns an instance of `T`.
///
/// Errors are automatically converted into `crate::error::Error` variants:
/// - `Error::IoError` if the file cannot be read.
/// - `Error::DeserializationError` if the JSON is malformed.
pub fn parse_json_file<T: DeserializeOwned>(file_path: &str) -> Result<T> {
    let data = fs::read_to_string(file_path)?;
    let parsed_data: T = serde_json::from_str(&data)?;
    Ok(parsed_data)
}

/// Parses comma separated records with a header row into `T`.
pub fn parse_csv<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut records = Vec::new();
    for record in csv_reader.deserialize() {
        records.push(record?);
    }

    Ok(records)
}

pub fn parse_csv_file<T: DeserializeOwned>(file_path: &str) -> Result<Vec<T>> {
    let file = fs::File::open(file_path).map_err(Error::IoError)?;
    parse_csv(file)
}

/// Builds a scenario from a jobs CSV (`id,size,duration,arrivalTime`) and a
/// partitions CSV (`id,capacity`), using the default configuration.
pub fn parse_scenario_csv_files(jobs_path: &str, partitions_path: &str) -> Result<ScenarioDto> {
    let jobs: Vec<JobDto> = parse_csv_file(jobs_path)?;
    let partitions: Vec<PartitionDto> = parse_csv_file(partitions_path)?;

    log::info!("Loaded {} jobs from '{}' and {} partitions from '{}'.", jobs.len(), jobs_path, partitions.len(), partitions_path);

    Ok(ScenarioDto { partitions, jobs, config: SimulationConfigDto::default() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_jobs_with_and_without_arrival_time() {
        let data = "id,size,duration,arrivalTime\n1,60,5,\n2, 40 ,3,7\n";

        let jobs: Vec<JobDto> = parse_csv(data.as_bytes()).unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].arrival_time, None);
        assert_eq!(jobs[1].size, 40);
        assert_eq!(jobs[1].arrival_time, Some(7));
    }

    #[test]
    fn parses_partitions() {
        let data = "id,capacity\n1,100\n2,50\n";

        let partitions: Vec<PartitionDto> = parse_csv(data.as_bytes()).unwrap();

        assert_eq!(partitions.iter().map(|p| p.capacity).collect::<Vec<_>>(), vec![100, 50]);
    }

    #[test]
    fn malformed_csv_is_an_error() {
        let data = "id,capacity\n1,big\n";
        let result: Result<Vec<PartitionDto>> = parse_csv(data.as_bytes());
        assert!(matches!(result, Err(Error::CsvError(_))));
    }

    #[test]
    fn scenario_json_defaults_config_and_arrival() {
        let json = r#"{ "partitions": [{ "id": 1, "capacity": 50 }], "jobs": [{ "id": 1, "size": 40, "duration": 4 }] }"#;

        let dto: ScenarioDto = serde_json::from_str(json).unwrap();

        assert_eq!(dto.jobs[0].arrival_time, None);
        assert_eq!(dto.config.max_drain_retries, None);
    }
}
