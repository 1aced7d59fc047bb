//! Breed Guru core: Gemini-backed clients for cattle/buffalo breed
//! classification, description generation and translation, plus the
//! supporting pieces a submission flows through — data-URI encoding,
//! an image brightness advisory, overload retry, and correction
//! recording.
//!
//! ```no_run
//! use breed_guru::{GeminiClient, GeminiConfig, ImagePayload};
//!
//! # async fn run() -> breed_guru::Result<()> {
//! let client = GeminiClient::new(GeminiConfig::from_env())?;
//! let image = ImagePayload::from_path("cow.jpg")?.to_data_uri();
//! let result = client.classify().classify(&image).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod corrections;
pub mod error;
pub mod gemini;
pub mod image;
pub mod logger;
pub mod models;
pub mod retry;

pub use config::GeminiConfig;
pub use corrections::{CorrectionRecorder, CorrectionSink, LogCorrectionSink};
pub use error::{BreedGuruError, Result};
pub use gemini::{ClassifyClient, DescribeClient, GeminiClient, TranslateClient};
pub use image::{check_quality, EncodedImage, ImagePayload, QualityAdvisory};
pub use models::{
    BreedDescription, ClassifyResponse, CorrectionAck, CorrectionRecord, Prediction,
    TargetLanguage, TranslationResult,
};
pub use retry::RetryPolicy;
