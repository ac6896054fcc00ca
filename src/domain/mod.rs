pub mod config;
pub mod error;
pub mod generation;
pub mod grid;
pub mod grid_store;
pub mod language;
pub mod projection;
pub mod scene;
pub mod shot;
pub mod storyboard;

pub use config::{GeminiApiConfig, StoryboardConfig};
pub use error::AppError;
pub use generation::GenerationError;
pub use grid::GridSpec;
pub use language::{BilingualText, FontSize, Language};
pub use projection::PromptPreview;
pub use scene::{DEFAULT_SCENE, SceneDescription, effective_scene_text};
pub use shot::{SHOT_TYPES, ShotContent, ShotSlot, lookup_shot_type};
pub use storyboard::{Preferences, StoryboardState};

/// Storyboard directory created in the working directory.
pub const STORYGRID_DIR: &str = ".storygrid";

/// Environment variable consulted when no credential is stored.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
