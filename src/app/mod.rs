pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
mod context;
pub mod in_flight;
pub mod orchestrator;

pub use context::AppContext;
pub use in_flight::{InFlightClaim, InFlightLedger};
pub use orchestrator::{BatchOutcome, BatchTicket, GenerationOrchestrator, SingleTicket};
