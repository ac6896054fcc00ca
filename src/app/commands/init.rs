use crate::app::AppContext;
use crate::domain::{AppError, StoryboardState};
use crate::ports::StoryboardStore;

/// Execute the init command.
///
/// Creates `.storygrid/` with a default 3x3 storyboard and a commented config.
pub fn execute<S: StoryboardStore>(ctx: &AppContext<S>) -> Result<StoryboardState, AppError> {
    if ctx.store().exists() {
        return Err(AppError::StoryboardExists);
    }

    let state = StoryboardState::default();
    ctx.store().initialize(&state)?;
    Ok(state)
}
