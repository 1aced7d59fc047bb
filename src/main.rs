use breed_guru::{
    check_quality, logger, CorrectionRecorder, GeminiClient, GeminiConfig, ImagePayload,
    LogCorrectionSink, TargetLanguage,
};
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    logger::init_with_config(
        logger::LoggerConfig::development().with_level(logger::LogLevel::Debug),
    )?;

    log::info!("🔍 Checking Gemini environment...");

    match env::var("GEMINI_API_KEY") {
        Ok(key) => {
            log::info!("✅ Gemini API key found in environment");
            log::debug!("API key starts with: {}...", &key[..5.min(key.len())]);
        }
        Err(_) => {
            log::error!("❌ GEMINI_API_KEY is not set, remote calls will fail");
        }
    }

    if let Ok(model) = env::var("GEMINI_MODEL") {
        log::info!("GEMINI_MODEL: {}", model);
    } else {
        log::warn!("No GEMINI_MODEL set, using the default model");
    }

    let image_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "cow.jpg".to_string());

    log::info!("🔄 Creating Gemini client...");
    let client = match GeminiClient::new(GeminiConfig::from_env()) {
        Ok(client) => {
            log::info!("✅ Gemini client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize Gemini client: {}", e);
            return Err(e.into());
        }
    };

    // Step 1: encode the upload and run the advisory quality check.
    log::info!("📷 Loading image: {}", image_path);
    let payload = ImagePayload::from_path(&image_path)?;

    match check_quality(payload.bytes()) {
        Some(advisory) => {
            log::warn!(
                "⚠️  {} (brightness {:.1})",
                advisory.message,
                advisory.brightness
            );
        }
        None => log::info!("✅ Image quality check passed"),
    }

    let encoded = payload.to_data_uri();
    log::debug!("Encoded image as {} data URI", encoded.mime_type());

    // Step 2: classify.
    log::info!("🐄 Classifying breed...");
    let classification = client.classify().classify(&encoded).await?;

    if classification.predictions.is_empty() {
        log::warn!("🤷 No cow or buffalo recognized in this image");
        return Ok(());
    }

    for (rank, prediction) in classification.predictions.iter().enumerate() {
        log::info!(
            "  {}. {} ({:.0}%)",
            rank + 1,
            prediction.breed,
            prediction.confidence * 100.0
        );
    }

    // Step 3: describe the top prediction.
    let top_breed = classification.predictions[0].breed.clone();
    log::info!("📖 Fetching description for '{}'...", top_breed);
    let description = client.describe().describe(&top_breed).await?;
    log::info!("📝 {}", description.description);

    // Step 4: translate it to Hindi.
    log::info!("🌐 Translating description to Hindi...");
    match client
        .translate()
        .translate(&description.description, TargetLanguage::Hi)
        .await
    {
        Ok(translation) => log::info!("📝 {}", translation.translated_text),
        Err(e) => log::error!("❌ Translation failed: {}", e),
    }

    // Step 5: record a sample correction, as the UI would on user feedback.
    log::info!("✏️  Recording a sample correction...");
    let recorder = CorrectionRecorder::new(Arc::new(LogCorrectionSink));
    let ack = recorder.save(&top_breed, "Sahiwal").await?;
    log::info!("✅ Correction acknowledged: success={}", ack.success);

    log::info!("🎉 Done!");
    Ok(())
}
