use crate::domain::BilingualText;

/// Shared scene context injected into every generation request.
pub type SceneDescription = BilingualText;

/// Scene sent to the model when the user has not described one in either language.
pub const DEFAULT_SCENE: &str = "A cinematic scene featuring the main subject of the reference image \
in a consistent environment, with coherent lighting, wardrobe and art direction.";

/// Scene text actually sent to generation calls.
///
/// Primary language first, then secondary, then [`DEFAULT_SCENE`]; never empty.
pub fn effective_scene_text(scene: &SceneDescription) -> String {
    [scene.primary.trim(), scene.secondary.trim()]
        .into_iter()
        .find(|text| !text.is_empty())
        .unwrap_or(DEFAULT_SCENE)
        .to_string()
}
