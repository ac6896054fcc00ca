use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::json;

use crate::domain::AppError;
use crate::domain::generation::{GenerationError, GenerationRequest};
use crate::ports::GenerativeClient;

/// Scripted client: returns queued replies in order and records every request.
#[derive(Clone, Default)]
pub struct FakeGenerativeClient {
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
    replies: Arc<Mutex<VecDeque<Result<String, GenerationError>>>>,
}

impl FakeGenerativeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(self, text: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    pub fn fail_with(self, error: GenerationError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl GenerativeClient for FakeGenerativeClient {
    fn generate_json(&self, request: &GenerationRequest) -> Result<String, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.replies.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(GenerationError::transport("test: unexpected extra call", Some(500)))
        });
        Ok(reply?)
    }
}

/// Batch reply JSON with `count` shots named `en shot N` / `镜头 N`.
pub fn storyboard_reply(scene: &str, count: usize) -> String {
    let en: Vec<String> = (1..=count).map(|n| format!("en shot {}", n)).collect();
    let zh: Vec<String> = (1..=count).map(|n| format!("镜头 {}", n)).collect();
    json!({
        "en": { "sceneDescription": scene, "shots": en },
        "zh": { "sceneDescription": format!("{}（中文）", scene), "shots": zh }
    })
    .to_string()
}

/// `{ "en": ..., "zh": ... }` reply JSON.
pub fn pair_reply(en: &str, zh: &str) -> String {
    json!({ "en": en, "zh": zh }).to_string()
}
