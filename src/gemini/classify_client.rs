use crate::{
    error::{BreedGuruError, Result},
    gemini::{strip_code_fence, GeminiTransport},
    image::EncodedImage,
    models::{normalize_predictions, ClassifyResponse, GenerateContentResponse, Prediction, PredictionList},
    retry::RetryPolicy,
};
use serde_json::json;

const CLASSIFY_PROMPT: &str = "You are an expert in identifying breeds of cattle and buffalo from India.\n\n\
Analyze the provided image and identify the breed of the animal. If the image does not contain a cow or a buffalo, you must return an empty predictions array.\n\n\
Provide your top 3 predictions, ordered by confidence score (highest first). For each prediction, provide the breed name and a confidence score between 0 and 1.\n\n\
Respond with a JSON object of the form {\"predictions\": [{\"breed\": string, \"confidence\": number}]}.";

#[derive(Clone)]
pub struct ClassifyClient {
    transport: GeminiTransport,
    retry: RetryPolicy,
}

impl ClassifyClient {
    pub(crate) fn new(transport: GeminiTransport) -> Self {
        Self {
            transport,
            retry: RetryPolicy::on_overload(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Classify one encoded image. Retries once after the policy backoff
    /// when the service reports overload; every other failure is final.
    /// The returned predictions are re-sorted locally, at most three,
    /// and empty when no cow or buffalo is recognized.
    pub async fn classify(&self, image: &EncodedImage) -> Result<ClassifyResponse> {
        log::info!(
            "Classifying image ({}, {} base64 chars)",
            image.mime_type(),
            image.base64_data().len()
        );

        match self.retry.run(|| self.classify_once(image)).await {
            Ok(predictions) => {
                log::info!("Classification produced {} prediction(s)", predictions.len());
                Ok(ClassifyResponse { predictions })
            }
            Err(e) => {
                log::error!("Error classifying image after retries: {}", e);
                Err(BreedGuruError::ResponseError(format!(
                    "Failed to classify image: {}",
                    e
                )))
            }
        }
    }

    async fn classify_once(&self, image: &EncodedImage) -> Result<Vec<Prediction>> {
        let parts = vec![
            json!({ "text": CLASSIFY_PROMPT }),
            json!({
                "inline_data": {
                    "mime_type": image.mime_type(),
                    "data": image.base64_data()
                }
            }),
        ];

        let response = self.transport.generate_content(parts).await?;
        extract_predictions(&response)
    }
}

/// Post-process a raw model response. An empty or content-less response
/// means "no recognizable subject" and yields an empty list, never an
/// error; only syntactically broken output fails.
fn extract_predictions(response: &GenerateContentResponse) -> Result<Vec<Prediction>> {
    let Some(text) = response.first_text() else {
        return Ok(Vec::new());
    };

    let list: PredictionList = serde_json::from_str(strip_code_fence(&text))
        .map_err(|e| BreedGuruError::SerializationError(format!("Malformed model output: {}", e)))?;

    Ok(normalize_predictions(list.predictions))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_text(text: &str) -> GenerateContentResponse {
        serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        }))
        .unwrap()
    }

    #[test]
    fn unordered_predictions_come_back_sorted() {
        let response = response_with_text(
            r#"{"predictions":[{"breed":"Sahiwal","confidence":0.11},{"breed":"Gir","confidence":0.87}]}"#,
        );
        let predictions = extract_predictions(&response).unwrap();

        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].breed, "Gir");
        assert_eq!(predictions[1].breed, "Sahiwal");
    }

    #[test]
    fn missing_predictions_field_is_an_empty_result() {
        let predictions = extract_predictions(&response_with_text("{}")).unwrap();
        assert!(predictions.is_empty());
    }

    #[test]
    fn content_less_response_is_an_empty_result() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(extract_predictions(&response).unwrap().is_empty());
    }

    #[test]
    fn fenced_output_still_parses() {
        let response =
            response_with_text("```json\n{\"predictions\":[{\"breed\":\"Gir\",\"confidence\":0.9}]}\n```");
        let predictions = extract_predictions(&response).unwrap();
        assert_eq!(predictions[0].breed, "Gir");
    }

    #[test]
    fn broken_output_is_a_serialization_error() {
        let err = extract_predictions(&response_with_text("not json")).unwrap_err();
        assert!(matches!(err, BreedGuruError::SerializationError(_)));
    }
}
