//! Shot slots and the camera-shot vocabulary.

use serde::{Deserialize, Serialize};

use crate::domain::{AppError, BilingualText};

/// Camera shot vocabulary. New slots cycle through it in this order.
pub const SHOT_TYPES: [&str; 12] = [
    "Extreme Long Shot",
    "Long Shot",
    "Full Shot",
    "Medium Long Shot",
    "Medium Shot",
    "Medium Close-Up",
    "Close-Up",
    "Extreme Close-Up",
    "Over-the-Shoulder Shot",
    "Low Angle Shot",
    "High Angle Shot",
    "Bird's-Eye View",
];

/// Bilingual text generated (or typed) for one shot.
pub type ShotContent = BilingualText;

/// One cell of the storyboard grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotSlot {
    pub id: u32,
    #[serde(rename = "type")]
    pub shot_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ShotContent>,
    #[serde(default, rename = "pending")]
    pub is_pending: bool,
}

impl ShotSlot {
    /// Fresh slot for grid position `position` (0-based).
    pub fn fresh<S: AsRef<str>>(position: usize, shot_type_cycle: &[S]) -> Self {
        let shot_type = if shot_type_cycle.is_empty() {
            String::new()
        } else {
            shot_type_cycle[position % shot_type_cycle.len()].as_ref().to_string()
        };
        Self { id: position as u32 + 1, shot_type, content: None, is_pending: false }
    }
}

/// Resolve user input to a vocabulary entry, ignoring case.
pub fn lookup_shot_type(name: &str) -> Result<&'static str, AppError> {
    let wanted = name.trim();
    SHOT_TYPES.iter().copied().find(|candidate| candidate.eq_ignore_ascii_case(wanted)).ok_or_else(
        || AppError::UnknownShotType { name: name.to_string(), available: SHOT_TYPES.join(", ") },
    )
}
