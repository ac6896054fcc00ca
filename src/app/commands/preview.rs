//! Prompt preview and export.

use crate::app::AppContext;
use crate::domain::projection::{self, PromptPreview};
use crate::domain::{AppError, Language};
use crate::ports::StoryboardStore;

/// Rendered preview for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewOutput {
    pub preview: PromptPreview,
    /// Top prompt followed by the numbered shots.
    pub export: String,
}

/// Project the storyboard, in `language` or the preferred language.
pub fn execute<S: StoryboardStore>(
    ctx: &AppContext<S>,
    language: Option<Language>,
) -> Result<PreviewOutput, AppError> {
    let state = ctx.load_state()?;
    let preview = match language {
        Some(language) => projection::project_in(&state, language),
        None => projection::project(&state),
    };
    let export = projection::render_export(&preview, &state.top_prompt);
    Ok(PreviewOutput { preview, export })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStoryboardStore;
    use crate::domain::{GridSpec, StoryboardState};

    fn ctx_with(state: StoryboardState) -> AppContext<MemoryStoryboardStore> {
        AppContext::new(MemoryStoryboardStore::with_state(state))
    }

    #[test]
    fn uses_preferred_language_by_default() {
        let mut state = StoryboardState::default();
        state.change_grid(GridSpec::from_catalog("2x2").unwrap());
        state.set_shot_text(1, Language::Zh, "远景");
        let ctx = ctx_with(state);

        let output = execute(&ctx, None).unwrap();
        assert_eq!(output.preview.language, Language::Zh);
        assert_eq!(output.preview.effective_scene, "未定义场景");
        assert!(output.export.starts_with("根据参考图"));
        assert!(output.export.contains("镜头01: 远景\n\n镜头02: (等待生成...)"));
    }

    #[test]
    fn explicit_language_overrides_preference() {
        let mut state = StoryboardState::default();
        state.set_top_prompt(Some(""));
        state.set_shot_text(9, Language::En, "birds over roofs");
        let ctx = ctx_with(state);

        let output = execute(&ctx, Some(Language::En)).unwrap();
        assert!(output.export.starts_with("Shot 01: (Waiting for generation...)"));
        assert!(output.export.ends_with("Shot 09: birds over roofs"));
        assert_eq!(output.preview.per_shot_text.len(), 9);
    }

    #[test]
    fn requires_storyboard() {
        let ctx = AppContext::new(MemoryStoryboardStore::new());
        assert!(matches!(execute(&ctx, None), Err(AppError::StoryboardNotFound)));
    }
}
