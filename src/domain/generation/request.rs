//! Provider-neutral description of a generation call.

use minijinja::context;
use serde_json::{Value, json};

use super::prompts;
use crate::domain::AppError;

/// Which of the three generation calls a request represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    SceneAnalysis,
    Storyboard,
    SingleShot,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::SceneAnalysis => "scene_analysis",
            RequestKind::Storyboard => "storyboard",
            RequestKind::SingleShot => "single_shot",
        }
    }
}

/// Image bytes sent inline with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// A single structured-output call: instructions, optional image, expected schema.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub kind: RequestKind,
    pub prompt: String,
    pub image: Option<InlineImage>,
    pub response_schema: Value,
}

impl GenerationRequest {
    pub fn analyze_scene(image: Vec<u8>, mime_type: &str) -> Result<Self, AppError> {
        Ok(Self {
            kind: RequestKind::SceneAnalysis,
            prompt: prompts::render(prompts::ANALYZE_SCENE, context! {})?,
            image: Some(InlineImage { mime_type: mime_type.to_string(), data: image }),
            response_schema: bilingual_pair_schema(),
        })
    }

    pub fn storyboard(
        scene: &str,
        grid_label: &str,
        shot_types: &[String],
    ) -> Result<Self, AppError> {
        let prompt = prompts::render(
            prompts::STORYBOARD,
            context! {
                scene => scene,
                grid_label => grid_label,
                total_shots => shot_types.len(),
                shots => shot_types,
            },
        )?;

        Ok(Self {
            kind: RequestKind::Storyboard,
            prompt,
            image: None,
            response_schema: storyboard_schema(),
        })
    }

    pub fn single_shot(scene: &str, shot_type: &str) -> Result<Self, AppError> {
        let prompt = prompts::render(
            prompts::SINGLE_SHOT,
            context! { scene => scene, shot_type => shot_type },
        )?;

        Ok(Self {
            kind: RequestKind::SingleShot,
            prompt,
            image: None,
            response_schema: bilingual_pair_schema(),
        })
    }
}

fn bilingual_pair_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "en": { "type": "STRING" },
            "zh": { "type": "STRING" }
        },
        "required": ["en", "zh"]
    })
}

fn storyboard_schema() -> Value {
    let block = json!({
        "type": "OBJECT",
        "properties": {
            "sceneDescription": { "type": "STRING" },
            "shots": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["sceneDescription", "shots"]
    });

    json!({
        "type": "OBJECT",
        "properties": { "en": block.clone(), "zh": block },
        "required": ["en", "zh"]
    })
}
