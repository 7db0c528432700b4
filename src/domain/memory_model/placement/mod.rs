pub mod best_fit;
pub mod first_fit;
pub mod placement_policy;
pub mod placement_strategy;
pub mod worst_fit;
