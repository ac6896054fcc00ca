//! The storyboard store: grid shape, scene, slots and preferences in one value.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::projection::default_top_prompt;
use crate::domain::{
    FontSize, GridSpec, Language, SHOT_TYPES, SceneDescription, ShotSlot, grid_store,
};

/// User preferences persisted alongside the storyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub font_size: FontSize,
}

/// Everything the orchestrator and projector operate on.
///
/// Loaded from a [`crate::ports::StoryboardStore`] and saved back after each
/// committed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryboardState {
    pub grid: GridSpec,
    pub scene: SceneDescription,
    pub slots: Vec<ShotSlot>,
    pub top_prompt: String,
    pub preferences: Preferences,
}

impl Default for StoryboardState {
    fn default() -> Self {
        let grid = GridSpec::default();
        let mut state = Self {
            top_prompt: default_top_prompt(&grid),
            grid,
            scene: SceneDescription::default(),
            slots: Vec::new(),
            preferences: Preferences::default(),
        };
        state.reconcile_slots();
        state
    }
}

impl StoryboardState {
    /// Normalize state read back from storage.
    ///
    /// The slot list may have been saved under a different grid. Pending flags
    /// survive only for slots in `in_flight`, the ids some live request still
    /// holds a claim on.
    pub fn rehydrate(&mut self, in_flight: &BTreeSet<u32>) {
        self.reconcile_slots();
        for slot in &mut self.slots {
            if !in_flight.contains(&slot.id) {
                slot.is_pending = false;
            }
        }
    }

    /// Switch to a new grid shape, keeping slot content by position.
    ///
    /// The top prompt is regenerated for the new shape. Returns `false` when
    /// `spec` equals the current grid.
    pub fn change_grid(&mut self, spec: GridSpec) -> bool {
        if spec == self.grid {
            return false;
        }
        self.top_prompt = default_top_prompt(&spec);
        self.grid = spec;
        self.reconcile_slots();
        true
    }

    pub fn slot(&self, id: u32) -> Option<&ShotSlot> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    pub fn set_shot_type(&mut self, id: u32, shot_type: &str) {
        grid_store::set_shot_type(&mut self.slots, id, shot_type);
    }

    /// Edit one language of a shot in the given language.
    pub fn set_shot_text(&mut self, id: u32, language: Language, text: &str) {
        grid_store::set_shot_content(&mut self.slots, id, language, text);
    }

    pub fn set_scene_text(&mut self, language: Language, text: &str) {
        self.scene.set(language, text);
    }

    /// Replace the top prompt, or restore the grid default when `text` is `None`.
    pub fn set_top_prompt(&mut self, text: Option<&str>) {
        self.top_prompt = match text {
            Some(text) => text.to_string(),
            None => default_top_prompt(&self.grid),
        };
    }

    /// Shot types in slot order, as sent with a batch request.
    pub fn shot_types(&self) -> Vec<String> {
        self.slots.iter().map(|slot| slot.shot_type.clone()).collect()
    }

    fn reconcile_slots(&mut self) {
        grid_store::reconcile(&mut self.slots, &self.grid, &SHOT_TYPES);
    }
}
