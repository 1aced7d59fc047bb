use crate::error::BreedGuruError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Closed set of translation targets: the description's source language
/// (English) and Hindi. Anything else fails validation before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    En,
    Hi,
}

impl TargetLanguage {
    pub fn code(&self) -> &'static str {
        match self {
            TargetLanguage::En => "en",
            TargetLanguage::Hi => "hi",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TargetLanguage::En => "English",
            TargetLanguage::Hi => "Hindi",
        }
    }
}

impl FromStr for TargetLanguage {
    type Err = BreedGuruError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(TargetLanguage::En),
            "hi" => Ok(TargetLanguage::Hi),
            other => Err(BreedGuruError::ValidationError(format!(
                "Unsupported target language '{}': expected 'en' or 'hi'.",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub translated_text: String,
}
