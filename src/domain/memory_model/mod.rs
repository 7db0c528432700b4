pub mod engine;
pub mod event;
pub mod job;
pub mod partition;
pub mod placement;
pub mod scenario;
pub mod statistics;
pub mod utils;
