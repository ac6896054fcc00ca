//! Display preferences.

use crate::app::AppContext;
use crate::domain::{AppError, FontSize, Language, Preferences};
use crate::ports::StoryboardStore;

/// Preference fields to change; `None` leaves a field as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefsUpdate {
    pub language: Option<Language>,
    /// Switch to the other content language.
    pub toggle_language: bool,
    pub font_size: Option<FontSize>,
}

/// Apply `update` and return the resulting preferences.
pub fn execute<S: StoryboardStore>(
    ctx: &AppContext<S>,
    update: PrefsUpdate,
) -> Result<Preferences, AppError> {
    ctx.update_state(|state| {
        let before = state.preferences;
        let prefs = &mut state.preferences;

        if let Some(language) = update.language {
            prefs.language = language;
        }
        if update.toggle_language {
            prefs.language = prefs.language.toggled();
        }
        if let Some(font_size) = update.font_size {
            prefs.font_size = font_size;
        }

        Ok((*prefs, *prefs != before))
    })
}
