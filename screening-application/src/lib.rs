// Screening Application Layer

pub mod commands;
pub mod error;
pub mod orchestrator;
pub mod state;

pub use error::AppError;
pub use orchestrator::{RuleOrchestrator, RuleOutcome, RuleReport, ScreeningReport};
pub use state::AppState;
