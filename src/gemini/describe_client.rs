use crate::{
    error::{BreedGuruError, Result},
    gemini::{parse_model_json, GeminiTransport},
    models::BreedDescription,
};
use serde_json::json;

#[derive(Clone)]
pub struct DescribeClient {
    transport: GeminiTransport,
}

impl DescribeClient {
    pub(crate) fn new(transport: GeminiTransport) -> Self {
        Self { transport }
    }

    /// Generate a description for a breed. The breed name is validated
    /// before dispatch; remote failures are logged in full and surfaced
    /// as one generic error, never verbatim.
    pub async fn describe(&self, breed_name: &str) -> Result<BreedDescription> {
        let breed_name = breed_name.trim();
        if breed_name.is_empty() {
            return Err(BreedGuruError::ValidationError(
                "Breed name must not be empty.".into(),
            ));
        }

        log::info!("Generating description for breed '{}'", breed_name);

        match self.describe_remote(breed_name).await {
            Ok(description) if !description.description.trim().is_empty() => Ok(description),
            Ok(_) => {
                log::error!("Model returned an empty description for '{}'", breed_name);
                Err(BreedGuruError::ResponseError(
                    "Failed to generate breed description.".into(),
                ))
            }
            Err(e) => {
                log::error!("Error generating breed description: {}", e);
                Err(BreedGuruError::ResponseError(
                    "Failed to generate breed description.".into(),
                ))
            }
        }
    }

    async fn describe_remote(&self, breed_name: &str) -> Result<BreedDescription> {
        let prompt = format!(
            "You are an expert in livestock breeds. Generate a concise description of the breed {}, \
covering its origin, key traits, and milk yield.\n\n\
Respond with a JSON object of the form {{\"description\": string}}.",
            breed_name
        );

        let response = self
            .transport
            .generate_content(vec![json!({ "text": prompt })])
            .await?;

        parse_model_json(&response)
    }
}
