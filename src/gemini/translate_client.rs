use crate::{
    error::{BreedGuruError, Result},
    gemini::{parse_model_json, GeminiTransport},
    models::{TargetLanguage, TranslationResult},
};
use serde_json::json;

#[derive(Clone)]
pub struct TranslateClient {
    transport: GeminiTransport,
}

impl TranslateClient {
    pub(crate) fn new(transport: GeminiTransport) -> Self {
        Self { transport }
    }

    /// Translate a description into the target language. The closed
    /// `TargetLanguage` enum makes unsupported codes unrepresentable here;
    /// use [`translate_code`](Self::translate_code) to validate raw codes.
    pub async fn translate(
        &self,
        text: &str,
        target_language: TargetLanguage,
    ) -> Result<TranslationResult> {
        log::info!("Translating description to {}", target_language.display_name());

        match self.translate_remote(text, target_language).await {
            Ok(result) => Ok(result),
            Err(e) => {
                log::error!("Error translating description: {}", e);
                Err(BreedGuruError::ResponseError(
                    "Failed to translate description.".into(),
                ))
            }
        }
    }

    /// Validate a raw language code, then translate. Rejects anything
    /// outside {en, hi} before any remote call is made.
    pub async fn translate_code(&self, text: &str, target_language: &str) -> Result<TranslationResult> {
        let language = target_language.parse::<TargetLanguage>()?;
        self.translate(text, language).await
    }

    async fn translate_remote(
        &self,
        text: &str,
        target_language: TargetLanguage,
    ) -> Result<TranslationResult> {
        let prompt = format!(
            "Translate the following text to {}:\n\n{}\n\n\
Respond with a JSON object of the form {{\"translatedText\": string}}.",
            target_language.display_name(),
            text
        );

        let response = self
            .transport
            .generate_content(vec![json!({ "text": prompt })])
            .await?;

        parse_model_json(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::GeminiConfig, gemini::GeminiClient};

    #[tokio::test]
    async fn unsupported_language_code_fails_before_any_remote_call() {
        let client = GeminiClient::new(
            GeminiConfig::new()
                .with_api_key("test-key")
                .with_base_url("http://127.0.0.1:0"),
        )
        .unwrap();

        let err = client
            .translate()
            .translate_code("The Gir is a zebu breed.", "fr")
            .await
            .unwrap_err();
        assert!(matches!(err, BreedGuruError::ValidationError(_)));
    }
}
