//! Language-specific preview of the storyboard and the export text built from it.

use serde::Serialize;

use crate::domain::{GridSpec, Language, StoryboardState};

/// Text view of the storyboard in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptPreview {
    pub effective_scene: String,
    pub grid_label: String,
    pub total_slots: usize,
    pub per_shot_text: Vec<String>,
    pub language: Language,
}

/// Derive the preview for the state's active language.
pub fn project(state: &StoryboardState) -> PromptPreview {
    project_in(state, state.preferences.language)
}

/// Derive the preview for an explicit language.
pub fn project_in(state: &StoryboardState, language: Language) -> PromptPreview {
    let per_shot_text = state
        .slots
        .iter()
        .map(|slot| match &slot.content {
            Some(content) => content.get(language).to_string(),
            None => language.waiting_placeholder().to_string(),
        })
        .collect();

    let scene = state.scene.get(language);
    let effective_scene = if scene.is_empty() {
        language.undefined_scene_placeholder().to_string()
    } else {
        scene.to_string()
    };

    PromptPreview {
        effective_scene,
        grid_label: state.grid.label.clone(),
        total_slots: state.grid.total_slots(),
        per_shot_text,
        language,
    }
}

/// Numbered shot lines, one paragraph per shot.
pub fn render_shots(preview: &PromptPreview) -> String {
    preview
        .per_shot_text
        .iter()
        .enumerate()
        .map(|(index, text)| {
            format!("{}{:02}: {}", preview.language.shot_label(), index + 1, text)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Full copyable prompt: top prompt followed by the shot list, empty parts dropped.
pub fn render_export(preview: &PromptPreview, top_prompt: &str) -> String {
    let shots = render_shots(preview);
    [top_prompt.trim(), shots.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Header line prepended to the export for a freshly selected grid.
pub fn default_top_prompt(grid: &GridSpec) -> String {
    format!(
        "根据参考图，生成一张具有凝聚力的{}网格图像，包含在同一环境中的 {}个不同摄像机镜头，严格保持人物/物体、服装和光线的一致性，8K分辨率， 16:9画幅。",
        grid.label,
        grid.total_slots()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GridSpec, SceneDescription};

    fn two_by_two() -> StoryboardState {
        let mut state = StoryboardState::default();
        state.change_grid(GridSpec::from_catalog("2x2").unwrap());
        state
    }

    #[test]
    fn missing_content_uses_waiting_placeholder() {
        let mut state = two_by_two();
        state.set_shot_text(2, Language::En, "a hand on the door");

        let preview = project_in(&state, Language::En);
        assert_eq!(preview.total_slots, 4);
        assert_eq!(preview.grid_label, "2x2");
        assert_eq!(preview.per_shot_text[0], "(Waiting for generation...)");
        assert_eq!(preview.per_shot_text[1], "a hand on the door");

        let preview = project_in(&state, Language::Zh);
        assert_eq!(preview.per_shot_text[0], "(等待生成...)");
        assert_eq!(preview.per_shot_text[1], "");
    }

    #[test]
    fn empty_scene_uses_localized_placeholder() {
        let mut state = two_by_two();
        assert_eq!(project_in(&state, Language::En).effective_scene, "Undefined Scene");
        assert_eq!(project_in(&state, Language::Zh).effective_scene, "未定义场景");

        state.scene = SceneDescription::new("desert road", "");
        assert_eq!(project_in(&state, Language::En).effective_scene, "desert road");
        assert_eq!(project_in(&state, Language::Zh).effective_scene, "未定义场景");
    }

    #[test]
    fn project_follows_active_language() {
        let mut state = two_by_two();
        state.preferences.language = Language::En;
        assert_eq!(project(&state).language, Language::En);
    }

    #[test]
    fn export_numbers_shots_with_language_label() {
        let mut state = two_by_two();
        for id in 1..=4 {
            state.set_shot_text(id, Language::En, &format!("frame {}", id));
        }

        let export = render_export(&project_in(&state, Language::En), "  Top line  ");
        assert!(export.starts_with("Top line\n\nShot 01: frame 1\n\nShot 02: frame 2"));
        assert!(export.ends_with("Shot 04: frame 4"));

        let export = render_export(&project_in(&state, Language::Zh), "");
        assert!(export.starts_with("镜头01: "));
    }
}
