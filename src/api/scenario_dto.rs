use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionDto {
    pub id: u64,
    pub capacity: i64,
}

#[derive(Debug, Deserialize, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDto {
    pub id: u64,
    pub size: i64,
    pub duration: i64,
    /// Defaults to 0 when absent.
    #[serde(default)]
    pub arrival_time: Option<i64>,
}

#[derive(Debug, Deserialize, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfigDto {
    pub max_drain_retries: Option<u32>,
    pub heavy_use_fraction: Option<f64>,
}

#[derive(Debug, Deserialize, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDto {
    pub partitions: Vec<PartitionDto>,
    pub jobs: Vec<JobDto>,
    #[serde(default)]
    pub config: SimulationConfigDto,
}
