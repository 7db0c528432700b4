pub mod engine;
pub mod engine_state;
pub mod simulation_config;
pub mod simulation_context;
pub mod unplaceable_job;
