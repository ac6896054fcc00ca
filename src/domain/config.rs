//! Configuration loaded from `.storygrid/config.toml`.

use serde::Deserialize;
use url::Url;

/// Tool configuration. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoryboardConfig {
    /// Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiApiConfig,
}

/// Gemini API configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiApiConfig {
    /// API base URL; requests go to `{api_url}/models/{model}:generateContent`.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// Model used for all three calls.
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for GeminiApiConfig {
    fn default() -> Self {
        Self { api_url: default_api_url(), model: default_model(), timeout_secs: default_timeout() }
    }
}

fn default_api_url() -> Url {
    Url::parse("https://generativelanguage.googleapis.com/v1beta")
        .expect("default Gemini API URL is valid")
}

fn default_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_timeout() -> u64 {
    120
}

/// Commented starter config written by `storygrid init`.
pub const CONFIG_TEMPLATE: &str = r#"# storygrid configuration

[gemini]
# api_url = "https://generativelanguage.googleapis.com/v1beta"
# model = "gemini-3-pro-preview"
# timeout_secs = 120
"#;
