pub mod analyze;
pub mod runtimes;
