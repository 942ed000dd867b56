pub mod battle;
pub mod cli;
pub mod config;
pub mod error;
pub mod parallel;
pub mod report;
pub mod simulator;

pub use error::{Result, SimulationError};
