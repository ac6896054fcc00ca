//! API key management.

use crate::app::AppContext;
use crate::domain::AppError;
use crate::ports::StoryboardStore;

/// Store the API key. Blank keys are rejected.
pub fn set<S: StoryboardStore>(ctx: &AppContext<S>, key: &str) -> Result<(), AppError> {
    if !ctx.store().exists() {
        return Err(AppError::StoryboardNotFound);
    }
    if key.trim().is_empty() {
        return Err(AppError::Validation("API key must not be empty".into()));
    }
    ctx.store().write_credential(Some(key))
}

/// Remove the stored API key.
pub fn clear<S: StoryboardStore>(ctx: &AppContext<S>) -> Result<(), AppError> {
    if !ctx.store().exists() {
        return Err(AppError::StoryboardNotFound);
    }
    ctx.store().write_credential(None)
}
