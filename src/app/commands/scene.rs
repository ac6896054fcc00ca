//! Scene description commands.

use std::path::Path;

use tracing::debug;

use crate::app::AppContext;
use crate::app::orchestrator::GenerationOrchestrator;
use crate::domain::{AppError, Language, SceneDescription};
use crate::ports::{GenerativeClient, StoryboardStore};

const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Replace one language of the scene description, the preferred one by default.
pub fn set_text<S: StoryboardStore>(
    ctx: &AppContext<S>,
    language: Option<Language>,
    text: &str,
) -> Result<(SceneDescription, Language), AppError> {
    ctx.update_state(|state| {
        let language = language.unwrap_or(state.preferences.language);
        state.set_scene_text(language, text);
        Ok(((state.scene.clone(), language), true))
    })
}

/// Derive the scene from a reference image and store it.
///
/// Only the scene is replaced, on the state as stored once the reply arrives.
pub fn analyze<S, C>(
    ctx: &AppContext<S>,
    client: C,
    image_path: &Path,
) -> Result<SceneDescription, AppError>
where
    S: StoryboardStore,
    C: GenerativeClient,
{
    if !ctx.store().exists() {
        return Err(AppError::StoryboardNotFound);
    }
    let image = std::fs::read(image_path)?;
    let mime_type = image_mime_type(image_path);
    debug!(path = %image_path.display(), mime_type, bytes = image.len(), "read reference image");

    let scene = GenerationOrchestrator::new(client).describe_image(image, mime_type)?;
    ctx.update_state(|state| {
        state.scene = scene.clone();
        Ok((scene.clone(), true))
    })
}

/// MIME type from the file extension; unknown extensions are sent as JPEG.
pub fn image_mime_type(path: &Path) -> &'static str {
    let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => DEFAULT_IMAGE_MIME,
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::adapters::MemoryStoryboardStore;
    use crate::domain::StoryboardState;
    use crate::domain::generation::{GenerationError, GenerationRequest};
    use crate::testing::{FakeGenerativeClient, pair_reply};

    fn ctx() -> AppContext<MemoryStoryboardStore> {
        AppContext::new(MemoryStoryboardStore::with_state(StoryboardState::default()))
    }

    #[test]
    fn mime_type_follows_extension() {
        assert_eq!(image_mime_type(Path::new("a/b.PNG")), "image/png");
        assert_eq!(image_mime_type(Path::new("shot.jpeg")), "image/jpeg");
        assert_eq!(image_mime_type(Path::new("frame.webp")), "image/webp");
        assert_eq!(image_mime_type(Path::new("noext")), "image/jpeg");
        assert_eq!(image_mime_type(Path::new("clip.bmp")), "image/jpeg");
    }

    #[test]
    fn set_text_keeps_other_language() {
        let ctx = ctx();
        set_text(&ctx, Some(Language::En), "harbor at dawn").unwrap();
        let (scene, language) = set_text(&ctx, None, "黎明港口").unwrap();
        assert_eq!(language, Language::Zh);
        assert_eq!(scene, SceneDescription::new("harbor at dawn", "黎明港口"));
        assert_eq!(ctx.load_state().unwrap().scene, scene);
    }

    #[test]
    fn analyze_sends_image_and_saves_scene() {
        let dir = TempDir::new().unwrap();
        let image_path = dir.path().join("ref.png");
        std::fs::write(&image_path, [1u8, 2, 3]).unwrap();

        let ctx = ctx();
        let client =
            FakeGenerativeClient::new().respond_with(pair_reply("desert road", "沙漠公路"));
        let scene = analyze(&ctx, client.clone(), &image_path).unwrap();

        assert_eq!(scene.primary, "desert road");
        assert_eq!(ctx.load_state().unwrap().scene.secondary, "沙漠公路");
        let image = client.requests()[0].image.clone().unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, vec![1, 2, 3]);
    }

    #[test]
    fn analyze_failure_does_not_save() {
        let dir = TempDir::new().unwrap();
        let image_path = dir.path().join("ref.jpg");
        std::fs::write(&image_path, [9u8]).unwrap();

        let ctx = ctx();
        let client = FakeGenerativeClient::new().fail_with(GenerationError::CredentialMissing);
        assert!(analyze(&ctx, client, &image_path).is_err());
        assert_eq!(ctx.store().save_count(), 0);
    }

    #[test]
    fn analyze_keeps_edits_made_during_request() {
        let dir = TempDir::new().unwrap();
        let image_path = dir.path().join("ref.png");
        std::fs::write(&image_path, [4u8]).unwrap();

        let ctx = ctx();
        let other = AppContext::new(ctx.store().clone());
        let client = EditingClient {
            other,
            reply: pair_reply("snowy ridge", "雪岭"),
        };
        analyze(&ctx, client, &image_path).unwrap();

        let state = ctx.load_state().unwrap();
        assert_eq!(state.scene.primary, "snowy ridge");
        assert_eq!(state.top_prompt, "edited meanwhile");
    }

    struct EditingClient {
        other: AppContext<MemoryStoryboardStore>,
        reply: String,
    }

    impl GenerativeClient for EditingClient {
        fn generate_json(&self, _request: &GenerationRequest) -> Result<String, AppError> {
            self.other.update_state(|state| {
                state.set_top_prompt(Some("edited meanwhile"));
                Ok(((), true))
            })?;
            Ok(self.reply.clone())
        }
    }

    #[test]
    fn analyze_missing_image_is_io_error() {
        let ctx = ctx();
        let err = analyze(&ctx, FakeGenerativeClient::new(), Path::new("/no/such/image.png"))
            .unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
