//! API Facade for the application.
//!
//! Each operation has a current-directory form and an `_at(path)` form that
//! builds the filesystem-backed context for the given storyboard root.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapters::slot_claims_filesystem::DEFAULT_CLAIM_TTL;
use crate::adapters::{FilesystemStoryboardStore, HttpGeminiClient};
use crate::app::AppContext;
use crate::app::commands::{generate, grid, init, key, prefs, preview, prompt, scene, shot, status};
use crate::app::config::{load_config, resolve_credential};
use crate::domain::GenerationError;
use crate::ports::StoryboardStore;

pub use crate::app::commands::grid::GridChange;
pub use crate::app::commands::prefs::PrefsUpdate;
pub use crate::app::commands::preview::PreviewOutput;
pub use crate::app::commands::status::StatusReport;
pub use crate::app::orchestrator::BatchOutcome;
pub use crate::domain::{
    AppError, GridSpec, Language, Preferences, SceneDescription, ShotContent, ShotSlot,
    StoryboardState,
};

fn create_context(path: PathBuf) -> AppContext<FilesystemStoryboardStore> {
    AppContext::new(FilesystemStoryboardStore::new(path))
}

fn current_context() -> Result<AppContext<FilesystemStoryboardStore>, AppError> {
    Ok(AppContext::new(FilesystemStoryboardStore::current()?))
}

/// Time a slot claim stays live beyond the configured request timeout.
const CLAIM_GRACE: Duration = Duration::from_secs(60);

type GenerationContext = (AppContext<FilesystemStoryboardStore>, HttpGeminiClient);

/// Build the context and Gemini client for a generation command.
///
/// Slot claims stay live for at least the request timeout plus a grace period,
/// so a slow request is never taken for an abandoned one.
fn generation_context(path: PathBuf) -> Result<GenerationContext, AppError> {
    let store = FilesystemStoryboardStore::new(path);
    if !store.exists() {
        return Err(AppError::StoryboardNotFound);
    }
    let config = load_config(&store)?;
    let claim_ttl = Duration::from_secs(config.gemini.timeout_secs) + CLAIM_GRACE;
    let ctx = AppContext::new(store.with_claim_ttl(claim_ttl.max(DEFAULT_CLAIM_TTL)));

    let api_key = resolve_credential(ctx.store())?.ok_or(GenerationError::CredentialMissing)?;
    let client = HttpGeminiClient::new(&api_key, &config.gemini)?;
    Ok((ctx, client))
}

// =============================================================================
// Storyboard lifecycle
// =============================================================================

/// Initialize `.storygrid/` in the current directory.
pub fn init() -> Result<StoryboardState, AppError> {
    init_at(std::env::current_dir()?)
}

/// Initialize `.storygrid/` at the specified path.
pub fn init_at(path: impl Into<PathBuf>) -> Result<StoryboardState, AppError> {
    init::execute(&create_context(path.into()))
}

/// Report grid, scene, slots and credential presence.
pub fn status() -> Result<StatusReport, AppError> {
    status::execute(&current_context()?)
}

pub fn status_at(path: impl Into<PathBuf>) -> Result<StatusReport, AppError> {
    status::execute(&create_context(path.into()))
}

// =============================================================================
// Grid and shot edits
// =============================================================================

/// Grid shapes offered for selection.
pub fn grid_catalog() -> Vec<GridSpec> {
    grid::list()
}

/// Switch the current storyboard to a catalog grid.
pub fn select_grid(label: &str) -> Result<GridChange, AppError> {
    grid::select(&current_context()?, label)
}

pub fn select_grid_at(label: &str, path: impl Into<PathBuf>) -> Result<GridChange, AppError> {
    grid::select(&create_context(path.into()), label)
}

/// Switch the current storyboard to a custom grid shape.
pub fn custom_grid(rows: u32, cols: u32) -> Result<GridChange, AppError> {
    grid::custom(&current_context()?, rows, cols)
}

pub fn custom_grid_at(
    rows: u32,
    cols: u32,
    path: impl Into<PathBuf>,
) -> Result<GridChange, AppError> {
    grid::custom(&create_context(path.into()), rows, cols)
}

/// Set the shot type of one slot.
pub fn set_shot_type(id: u32, name: &str) -> Result<ShotSlot, AppError> {
    shot::set_type(&current_context()?, id, name)
}

pub fn set_shot_type_at(
    id: u32,
    name: &str,
    path: impl Into<PathBuf>,
) -> Result<ShotSlot, AppError> {
    shot::set_type(&create_context(path.into()), id, name)
}

/// Edit one language of one slot's content; `None` edits the preferred language.
pub fn set_shot_text(
    id: u32,
    language: Option<Language>,
    text: &str,
) -> Result<(ShotSlot, Language), AppError> {
    shot::set_text(&current_context()?, id, language, text)
}

pub fn set_shot_text_at(
    id: u32,
    language: Option<Language>,
    text: &str,
    path: impl Into<PathBuf>,
) -> Result<(ShotSlot, Language), AppError> {
    shot::set_text(&create_context(path.into()), id, language, text)
}

// =============================================================================
// Scene
// =============================================================================

/// Edit one language of the scene description; `None` edits the preferred language.
pub fn set_scene_text(
    language: Option<Language>,
    text: &str,
) -> Result<(SceneDescription, Language), AppError> {
    scene::set_text(&current_context()?, language, text)
}

pub fn set_scene_text_at(
    language: Option<Language>,
    text: &str,
    path: impl Into<PathBuf>,
) -> Result<(SceneDescription, Language), AppError> {
    scene::set_text(&create_context(path.into()), language, text)
}

/// Derive the scene from a reference image with Gemini.
pub fn analyze_scene(image_path: &Path) -> Result<SceneDescription, AppError> {
    analyze_scene_at(image_path, std::env::current_dir()?)
}

pub fn analyze_scene_at(
    image_path: &Path,
    path: impl Into<PathBuf>,
) -> Result<SceneDescription, AppError> {
    let (ctx, client) = generation_context(path.into())?;
    scene::analyze(&ctx, client, image_path)
}

// =============================================================================
// Generation
// =============================================================================

/// Generate content for every slot in one request.
pub fn generate_all() -> Result<BatchOutcome, AppError> {
    generate_all_at(std::env::current_dir()?)
}

pub fn generate_all_at(path: impl Into<PathBuf>) -> Result<BatchOutcome, AppError> {
    let (ctx, client) = generation_context(path.into())?;
    generate::all(&ctx, client)
}

/// Generate content for one slot.
pub fn generate_single(id: u32) -> Result<ShotContent, AppError> {
    generate_single_at(id, std::env::current_dir()?)
}

pub fn generate_single_at(id: u32, path: impl Into<PathBuf>) -> Result<ShotContent, AppError> {
    let (ctx, client) = generation_context(path.into())?;
    generate::single(&ctx, client, id)
}

// =============================================================================
// Preview, preferences, prompt, key
// =============================================================================

/// Project the storyboard for display or export.
pub fn preview(language: Option<Language>) -> Result<PreviewOutput, AppError> {
    preview::execute(&current_context()?, language)
}

pub fn preview_at(
    language: Option<Language>,
    path: impl Into<PathBuf>,
) -> Result<PreviewOutput, AppError> {
    preview::execute(&create_context(path.into()), language)
}

/// Update display preferences.
pub fn update_prefs(update: PrefsUpdate) -> Result<Preferences, AppError> {
    prefs::execute(&current_context()?, update)
}

pub fn update_prefs_at(
    update: PrefsUpdate,
    path: impl Into<PathBuf>,
) -> Result<Preferences, AppError> {
    prefs::execute(&create_context(path.into()), update)
}

/// Replace the top prompt, or restore the default with `None`.
pub fn set_top_prompt(text: Option<&str>) -> Result<String, AppError> {
    prompt::execute(&current_context()?, text)
}

pub fn set_top_prompt_at(text: Option<&str>, path: impl Into<PathBuf>) -> Result<String, AppError> {
    prompt::execute(&create_context(path.into()), text)
}

/// Store the Gemini API key in `.storygrid/credential`.
pub fn set_key(api_key: &str) -> Result<(), AppError> {
    key::set(&current_context()?, api_key)
}

pub fn set_key_at(api_key: &str, path: impl Into<PathBuf>) -> Result<(), AppError> {
    key::set(&create_context(path.into()), api_key)
}

/// Remove the stored API key.
pub fn clear_key() -> Result<(), AppError> {
    key::clear(&current_context()?)
}

pub fn clear_key_at(path: impl Into<PathBuf>) -> Result<(), AppError> {
    key::clear(&create_context(path.into()))
}
