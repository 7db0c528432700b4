pub mod simulation_result;
pub mod statistics_collector;
