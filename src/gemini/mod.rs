pub mod classify_client;
pub mod describe_client;
pub mod translate_client;

use crate::{
    config::GeminiConfig,
    error::{BreedGuruError, Result},
    image::EncodedImage,
    models::{ApiErrorBody, BreedDescription, ClassifyResponse, GenerateContentResponse},
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

pub use classify_client::ClassifyClient;
pub use describe_client::DescribeClient;
pub use translate_client::TranslateClient;

/// Shared HTTP transport for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiTransport {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiTransport {
    fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| BreedGuruError::ConfigError("Gemini API key is required".into()))?;

        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            model: config.model().to_string(),
            base_url: config.base_url().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// One structured-output generation call. All three clients go through
    /// here; this is the only place service errors are classified.
    pub async fn generate_content(&self, parts: Vec<Value>) -> Result<GenerateContentResponse> {
        let payload = json!({
            "contents": [{ "parts": parts }],
            "generationConfig": { "responseMimeType": "application/json" }
        });

        log::debug!("Invoking model: {}", self.model);

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| BreedGuruError::RequestError(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_service_error(status.as_u16(), &body));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| BreedGuruError::ResponseError(e.to_string()))
    }
}

/// Classify a non-2xx response. HTTP 503 and the API's `UNAVAILABLE`
/// status both signal the transient overload that the retry policy
/// recovers from; everything else is a plain request failure.
pub(crate) fn map_service_error(status: u16, body: &str) -> BreedGuruError {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error);
    let message = detail
        .as_ref()
        .and_then(|e| e.message.clone())
        .unwrap_or_else(|| format!("HTTP {}", status));
    let api_status = detail.and_then(|e| e.status);

    if status == 503 || api_status.as_deref() == Some("UNAVAILABLE") {
        BreedGuruError::OverloadedError(message)
    } else {
        BreedGuruError::RequestError(format!("HTTP {}: {}", status, message))
    }
}

/// Parse the JSON document the model was instructed to emit.
pub(crate) fn parse_model_json<T: DeserializeOwned>(response: &GenerateContentResponse) -> Result<T> {
    let text = response
        .first_text()
        .ok_or_else(|| BreedGuruError::ResponseError("Model returned no content".into()))?;
    serde_json::from_str(strip_code_fence(&text))
        .map_err(|e| BreedGuruError::SerializationError(format!("Malformed model output: {}", e)))
}

/// Models occasionally wrap their JSON in a Markdown code fence despite
/// the response MIME type.
pub(crate) fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|t| t.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

/// Entry point to the Breed Guru AI surface: one sub-client per logical
/// operation, all sharing a single HTTP transport.
#[derive(Clone)]
pub struct GeminiClient {
    classify_client: ClassifyClient,
    describe_client: DescribeClient,
    translate_client: TranslateClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let transport = GeminiTransport::new(&config)?;

        Ok(Self {
            classify_client: ClassifyClient::new(transport.clone()),
            describe_client: DescribeClient::new(transport.clone()),
            translate_client: TranslateClient::new(transport),
        })
    }

    pub fn classify(&self) -> &ClassifyClient {
        &self.classify_client
    }

    pub fn describe(&self) -> &DescribeClient {
        &self.describe_client
    }

    pub fn translate(&self) -> &TranslateClient {
        &self.translate_client
    }

    /// Classify an image and, when a breed is recognized, fetch the
    /// description of the top prediction in the same call.
    pub async fn classify_and_describe(
        &self,
        image: &EncodedImage,
    ) -> Result<(ClassifyResponse, Option<BreedDescription>)> {
        let classification = self.classify_client.classify(image).await?;

        let description = match classification.predictions.first() {
            Some(top) => Some(self.describe_client.describe(&top.breed).await?),
            None => None,
        };

        Ok((classification, description))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_503_maps_to_overload() {
        assert!(map_service_error(503, "").is_overloaded());
    }

    #[test]
    fn unavailable_status_maps_to_overload() {
        let body = r#"{"error":{"code":503,"message":"The model is overloaded.","status":"UNAVAILABLE"}}"#;
        let err = map_service_error(429, body);
        assert!(err.is_overloaded());
        assert!(err.to_string().contains("overloaded"));
    }

    #[test]
    fn other_statuses_are_plain_request_errors() {
        let body = r#"{"error":{"code":400,"message":"Invalid argument.","status":"INVALID_ARGUMENT"}}"#;
        let err = map_service_error(400, body);
        assert!(!err.is_overloaded());
        assert!(err.to_string().contains("Invalid argument."));
    }

    #[test]
    fn code_fences_are_stripped() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        assert!(matches!(
            GeminiClient::new(GeminiConfig::new()),
            Err(BreedGuruError::ConfigError(_))
        ));
    }
}
