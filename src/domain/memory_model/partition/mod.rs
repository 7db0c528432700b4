pub mod partition;
pub mod partition_table;
