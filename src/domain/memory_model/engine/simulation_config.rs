use serde::Serialize;

use crate::api::scenario_dto::SimulationConfigDto;
use crate::error::{Error, Result};

pub const DEFAULT_MAX_DRAIN_RETRIES: u32 = 3;

/// A partition counts as heavily used when it served more than this fraction of all jobs.
pub const DEFAULT_HEAVY_USE_FRACTION: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationConfig {
    /// Consecutive placement retries without progress before waiting jobs are given up.
    pub max_drain_retries: u32,

    pub heavy_use_fraction: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig { max_drain_retries: DEFAULT_MAX_DRAIN_RETRIES, heavy_use_fraction: DEFAULT_HEAVY_USE_FRACTION }
    }
}

impl TryFrom<SimulationConfigDto> for SimulationConfig {
    type Error = Error;

    fn try_from(dto: SimulationConfigDto) -> Result<Self> {
        let heavy_use_fraction = dto.heavy_use_fraction.unwrap_or(DEFAULT_HEAVY_USE_FRACTION);

        if !(0.0..=1.0).contains(&heavy_use_fraction) {
            return Err(Error::ModelConstructionError(format!("heavyUseFraction must be within [0, 1], got {}.", heavy_use_fraction)));
        }

        Ok(SimulationConfig { max_drain_retries: dto.max_drain_retries.unwrap_or(DEFAULT_MAX_DRAIN_RETRIES), heavy_use_fraction })
    }
}
