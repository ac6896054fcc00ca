//! Structural validation of model output before anything is merged.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::GenerationError;
use crate::domain::{BilingualText, SceneDescription, ShotContent};

/// Parsed result of a batch storyboard call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryboardReply {
    /// Present when the model returned a non-empty refined primary scene.
    pub refined_scene: Option<SceneDescription>,
    /// Content pairs in requested shot order. Truncated to the shorter language list.
    pub shots: Vec<ShotContent>,
}

#[derive(Debug, Deserialize)]
struct PairWire {
    en: String,
    zh: String,
}

#[derive(Debug, Deserialize)]
struct StoryboardWire {
    en: LanguageBlockWire,
    zh: LanguageBlockWire,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LanguageBlockWire {
    scene_description: String,
    shots: Vec<String>,
}

/// Parse a `{ "en": ..., "zh": ... }` reply (scene analysis and single shot).
pub fn parse_bilingual_pair(text: &str) -> Result<BilingualText, GenerationError> {
    let wire: PairWire = parse_json(text)?;
    Ok(BilingualText::new(wire.en, wire.zh))
}

/// Parse a batch reply.
pub fn parse_storyboard(text: &str) -> Result<StoryboardReply, GenerationError> {
    let wire: StoryboardWire = parse_json(text)?;

    let refined_scene = (!wire.en.scene_description.is_empty())
        .then(|| SceneDescription::new(wire.en.scene_description, wire.zh.scene_description));

    let shots = wire
        .en
        .shots
        .into_iter()
        .zip(wire.zh.shots)
        .map(|(primary, secondary)| ShotContent::new(primary, secondary))
        .collect();

    Ok(StoryboardReply { refined_scene, shots })
}

fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, GenerationError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(GenerationError::malformed("empty response text"));
    }
    serde_json::from_str(body).map_err(|e| GenerationError::malformed(e.to_string()))
}

/// Models occasionally wrap JSON in a markdown fence even in JSON mode.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
