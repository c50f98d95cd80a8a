pub mod orchestrator;
pub mod runner;

pub use orchestrator::*;
pub use runner::*;
