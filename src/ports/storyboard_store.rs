//! Storyboard persistence port.

use std::sync::Arc;

use crate::domain::{AppError, StoryboardState};
use crate::ports::SlotClaims;

/// Port for loading and saving the storyboard and its credential.
///
/// Each part of the state is stored independently; a missing part falls back
/// to its default without discarding the rest.
pub trait StoryboardStore {
    /// Whether a storyboard has been initialized.
    fn exists(&self) -> bool;

    /// Create the storyboard with `state` and a starter config.
    fn initialize(&self, state: &StoryboardState) -> Result<(), AppError>;

    /// Load the persisted state verbatim. Callers rehydrate it before use.
    fn load(&self) -> Result<StoryboardState, AppError>;

    /// Persist a committed state.
    fn save(&self, state: &StoryboardState) -> Result<(), AppError>;

    /// Read the stored API key, if any.
    fn read_credential(&self) -> Result<Option<String>, AppError>;

    /// Store or remove the API key.
    fn write_credential(&self, credential: Option<&str>) -> Result<(), AppError>;

    /// Read the raw config file contents, if present.
    fn read_config(&self) -> Result<Option<String>, AppError>;

    /// Claim registry shared by every handle on this storyboard.
    fn claims(&self) -> Arc<dyn SlotClaims>;
}
