pub mod cli;
pub mod performance;
