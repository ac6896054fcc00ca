use crate::domain::{API_KEY_ENV, AppError};
use crate::ports::StoryboardStore;

/// Resolve the API key: stored credential first, then `GEMINI_API_KEY`.
pub fn resolve_credential<S: StoryboardStore>(store: &S) -> Result<Option<String>, AppError> {
    resolve_credential_with(store, |name| std::env::var(name).ok())
}

/// Same as [`resolve_credential`] with an injectable environment lookup.
pub fn resolve_credential_with<S: StoryboardStore>(
    store: &S,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Option<String>, AppError> {
    let stored = store.read_credential()?.filter(|key| !key.trim().is_empty());
    if stored.is_some() {
        return Ok(stored);
    }

    Ok(env(API_KEY_ENV).map(|key| key.trim().to_string()).filter(|key| !key.is_empty()))
}
