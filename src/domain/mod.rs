pub mod memory_model;
pub mod simulator;
