//! storygrid: bilingual storyboard grid prompts from a reference image.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::*;
pub use app::{AppContext, GenerationOrchestrator, InFlightLedger};
pub use domain::{FontSize, GenerationError, PromptPreview};
