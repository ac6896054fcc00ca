//! Gemini `generateContent` client implementation using reqwest.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::domain::generation::{GenerationError, GenerationRequest};
use crate::domain::{AppError, GeminiApiConfig};
use crate::ports::GenerativeClient;

const X_GOOG_API_KEY: &str = "x-goog-api-key";
const DEFAULT_STATUS_MESSAGE: &str = "Gemini API request failed";
const JSON_MIME_TYPE: &str = "application/json";
const MAX_LOG_ERROR_CHARS: usize = 512;

/// HTTP transport for the Gemini API.
///
/// One request per call; failures are returned as-is and never retried.
#[derive(Clone)]
pub struct HttpGeminiClient {
    api_key: String,
    endpoint: Url,
    client: Client,
}

impl std::fmt::Debug for HttpGeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGeminiClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpGeminiClient {
    /// Create a client for `config`. A blank key fails with `CredentialMissing`.
    pub fn new(api_key: &str, config: &GeminiApiConfig) -> Result<Self, AppError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(GenerationError::CredentialMissing.into());
        }

        let endpoint = generate_content_url(&config.api_url, &config.model)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                GenerationError::transport(format!("Failed to create HTTP client: {}", e), None)
            })?;

        Ok(Self { api_key: api_key.to_string(), endpoint, client })
    }

    fn send_request(&self, request: &ApiRequest<'_>) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(X_GOOG_API_KEY, &self.api_key)
            .header(CONTENT_TYPE, JSON_MIME_TYPE)
            .json(request)
            .send()
            .map_err(|e| GenerationError::transport(format!("HTTP request failed: {}", e), None))?;

        let status = response.status();
        let body_text = response.text().map_err(|e| {
            GenerationError::transport(
                format!("Failed to read response body: {}", e),
                Some(status.as_u16()),
            )
        })?;

        if !status.is_success() {
            let message = extract_error_message(&body_text).unwrap_or_else(|| {
                if !body_text.trim().is_empty() {
                    body_text.clone()
                } else if status.as_u16() == 429 {
                    "Rate limited".to_string()
                } else if status.is_server_error() {
                    "Server error".to_string()
                } else {
                    DEFAULT_STATUS_MESSAGE.to_string()
                }
            });
            warn!(
                status = status.as_u16(),
                error = %sanitize_and_truncate_for_log(&message),
                "Gemini request rejected"
            );
            return Err(GenerationError::transport(message, Some(status.as_u16())));
        }

        let api_response: ApiResponse = serde_json::from_str(&body_text).map_err(|e| {
            GenerationError::malformed(format!("Failed to parse response envelope: {}", e))
        })?;

        api_response.into_text()
    }
}

fn generate_content_url(base: &Url, model: &str) -> Result<Url, AppError> {
    let raw = format!("{}/models/{}:generateContent", base.as_str().trim_end_matches('/'), model);
    Url::parse(&raw)
        .map_err(|e| AppError::config_error(format!("Invalid Gemini endpoint '{}': {}", raw, e)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    contents: Vec<ApiContent<'a>>,
    generation_config: ApiGenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct ApiContent<'a> {
    role: &'static str,
    parts: Vec<ApiPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ApiPart<'a> {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: ApiInlineData,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiGenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
}

impl<'a> ApiRequest<'a> {
    fn from_request(request: &'a GenerationRequest) -> Self {
        let mut parts = Vec::with_capacity(2);
        if let Some(image) = &request.image {
            parts.push(ApiPart::InlineData {
                inline_data: ApiInlineData {
                    mime_type: image.mime_type.clone(),
                    data: BASE64.encode(&image.data),
                },
            });
        }
        parts.push(ApiPart::Text { text: &request.prompt });

        Self {
            contents: vec![ApiContent { role: "user", parts }],
            generation_config: ApiGenerationConfig {
                response_mime_type: JSON_MIME_TYPE,
                response_schema: &request.response_schema,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<ApiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<ApiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCandidate {
    #[serde(default)]
    content: Option<ApiCandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiCandidateContent {
    #[serde(default)]
    parts: Vec<ApiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ApiResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl ApiResponse {
    fn into_text(self) -> Result<String, GenerationError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            let reason = self
                .prompt_feedback
                .and_then(|feedback| feedback.block_reason)
                .map(|reason| format!("prompt blocked ({})", reason))
                .unwrap_or_else(|| "response contained no candidates".to_string());
            return Err(GenerationError::malformed(reason));
        };

        let text: String = candidate
            .content
            .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            let reason = match candidate.finish_reason {
                Some(reason) => format!("candidate has no text (finish reason {})", reason),
                None => "candidate has no text".to_string(),
            };
            return Err(GenerationError::malformed(reason));
        }

        Ok(text)
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

fn sanitize_and_truncate_for_log(input: &str) -> String {
    let mut output: String = input
        .chars()
        .take(MAX_LOG_ERROR_CHARS)
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if input.chars().count() > MAX_LOG_ERROR_CHARS {
        output.push_str(" [truncated]");
    }
    output
}

impl GenerativeClient for HttpGeminiClient {
    fn generate_json(&self, request: &GenerationRequest) -> Result<String, AppError> {
        debug!(kind = request.kind.as_str(), endpoint = %self.endpoint, "sending Gemini request");
        let api_request = ApiRequest::from_request(request);
        Ok(self.send_request(&api_request)?)
    }
}
