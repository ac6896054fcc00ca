//! Per-slot edits.

use crate::app::AppContext;
use crate::domain::{AppError, Language, ShotSlot, lookup_shot_type};
use crate::ports::StoryboardStore;

/// Set the shot type of slot `id` to a vocabulary entry.
pub fn set_type<S: StoryboardStore>(
    ctx: &AppContext<S>,
    id: u32,
    name: &str,
) -> Result<ShotSlot, AppError> {
    let shot_type = lookup_shot_type(name)?;
    ctx.update_state(|state| {
        require_slot(state.slot(id), id)?;
        state.set_shot_type(id, shot_type);
        Ok((require_slot(state.slot(id), id)?.clone(), true))
    })
}

/// Replace one language of slot `id`'s content.
///
/// Without an explicit language the preferred content language is edited.
/// Returns the slot and the language that was written.
pub fn set_text<S: StoryboardStore>(
    ctx: &AppContext<S>,
    id: u32,
    language: Option<Language>,
    text: &str,
) -> Result<(ShotSlot, Language), AppError> {
    ctx.update_state(|state| {
        require_slot(state.slot(id), id)?;
        let language = language.unwrap_or(state.preferences.language);
        state.set_shot_text(id, language, text);
        Ok(((require_slot(state.slot(id), id)?.clone(), language), true))
    })
}

fn require_slot(slot: Option<&ShotSlot>, id: u32) -> Result<&ShotSlot, AppError> {
    slot.ok_or(AppError::SlotNotFound(id))
}
