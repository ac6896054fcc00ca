//! Display language and text helpers shared by the grid and the preview.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Active content language.
///
/// English is the primary field of every bilingual pair and Chinese the secondary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Zh,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Zh, Language::En];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
        }
    }

    pub fn toggled(&self) -> Language {
        match self {
            Language::Zh => Language::En,
            Language::En => Language::Zh,
        }
    }

    /// Placeholder for a shot that has never been generated.
    pub fn waiting_placeholder(&self) -> &'static str {
        match self {
            Language::Zh => "(等待生成...)",
            Language::En => "(Waiting for generation...)",
        }
    }

    /// Placeholder for an empty scene in this language.
    pub fn undefined_scene_placeholder(&self) -> &'static str {
        match self {
            Language::Zh => "未定义场景",
            Language::En => "Undefined Scene",
        }
    }

    /// Prefix for a numbered shot line in the export text.
    pub fn shot_label(&self) -> &'static str {
        match self {
            Language::Zh => "镜头",
            Language::En => "Shot ",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "zh" | "cn" | "chinese" => Ok(Language::Zh),
            "en" | "english" => Ok(Language::En),
            _ => Err(AppError::UnknownLanguage(value.to_string())),
        }
    }
}

/// A pair of parallel texts, English first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BilingualText {
    #[serde(rename = "en", default)]
    pub primary: String,
    #[serde(rename = "zh", default)]
    pub secondary: String,
}

impl BilingualText {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self { primary: primary.into(), secondary: secondary.into() }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::En => &self.primary,
            Language::Zh => &self.secondary,
        }
    }

    /// Overwrite one language, leaving the other untouched.
    pub fn set(&mut self, language: Language, text: impl Into<String>) {
        match language {
            Language::En => self.primary = text.into(),
            Language::Zh => self.secondary = text.into(),
        }
    }
}

/// Preview font size. Display-only; persisted with the other preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl FontSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        }
    }
}

impl FromStr for FontSize {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "small" | "s" => Ok(FontSize::Small),
            "medium" | "m" => Ok(FontSize::Medium),
            "large" | "l" => Ok(FontSize::Large),
            _ => Err(AppError::UnknownFontSize(value.to_string())),
        }
    }
}
