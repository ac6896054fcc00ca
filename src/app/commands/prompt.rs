//! Top prompt edits.

use crate::app::AppContext;
use crate::domain::AppError;
use crate::ports::StoryboardStore;

/// Replace the top prompt, or restore the grid default with `None`.
pub fn execute<S: StoryboardStore>(
    ctx: &AppContext<S>,
    text: Option<&str>,
) -> Result<String, AppError> {
    ctx.update_state(|state| {
        state.set_top_prompt(text);
        Ok((state.top_prompt.clone(), true))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStoryboardStore;
    use crate::domain::StoryboardState;

    #[test]
    fn set_and_reset() {
        let ctx = AppContext::new(MemoryStoryboardStore::with_state(StoryboardState::default()));

        assert_eq!(execute(&ctx, Some("Moody noir board")).unwrap(), "Moody noir board");
        assert_eq!(ctx.load_state().unwrap().top_prompt, "Moody noir board");

        let reset = execute(&ctx, None).unwrap();
        assert!(reset.contains("3x3") && reset.contains("9个"));
    }
}
