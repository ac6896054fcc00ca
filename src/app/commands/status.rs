//! Storyboard status.

use crate::app::AppContext;
use crate::app::config::{load_config, resolve_credential};
use crate::domain::{AppError, StoryboardState};
use crate::ports::StoryboardStore;

/// Snapshot reported by `storygrid status`.
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub state: StoryboardState,
    pub has_credential: bool,
    pub model: String,
}

pub fn execute<S: StoryboardStore>(ctx: &AppContext<S>) -> Result<StatusReport, AppError> {
    let state = ctx.load_state()?;
    let config = load_config(ctx.store())?;
    let has_credential = resolve_credential(ctx.store())?.is_some();
    Ok(StatusReport { state, has_credential, model: config.gemini.model })
}
