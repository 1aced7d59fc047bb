use crate::{
    error::{BreedGuruError, Result},
    models::{CorrectionAck, CorrectionRecord},
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Floor on how quickly a correction call returns, simulating the round
/// trip of a real persistence backend.
pub const MIN_RECORD_LATENCY_MS: u64 = 500;

/// Destination for correction records. Durability is the sink's problem;
/// the recorder only validates and stamps.
#[async_trait]
pub trait CorrectionSink: Send + Sync {
    async fn record(&self, record: &CorrectionRecord) -> Result<()>;
}

/// Default sink: writes the correction to the log. A real deployment
/// would swap in a datastore-backed sink for model retraining.
pub struct LogCorrectionSink;

#[async_trait]
impl CorrectionSink for LogCorrectionSink {
    async fn record(&self, record: &CorrectionRecord) -> Result<()> {
        log::info!(
            "Saving correction {}: '{}' -> '{}' at {}",
            record.id,
            record.original_prediction,
            record.corrected_breed,
            record.timestamp.to_rfc3339()
        );
        Ok(())
    }
}

pub struct CorrectionRecorder {
    sink: Arc<dyn CorrectionSink>,
    min_latency: Duration,
}

impl CorrectionRecorder {
    pub fn new(sink: Arc<dyn CorrectionSink>) -> Self {
        Self {
            sink,
            min_latency: Duration::from_millis(MIN_RECORD_LATENCY_MS),
        }
    }

    pub fn with_min_latency(mut self, min_latency: Duration) -> Self {
        self.min_latency = min_latency;
        self
    }

    /// Validate both halves of the correction pair, stamp a record, and
    /// hand it to the sink. No retry; sink failures surface generically.
    pub async fn save(
        &self,
        original_prediction: &str,
        corrected_breed: &str,
    ) -> Result<CorrectionAck> {
        if original_prediction.trim().is_empty() {
            return Err(BreedGuruError::ValidationError(
                "Original prediction must not be empty.".into(),
            ));
        }
        if corrected_breed.trim().is_empty() {
            return Err(BreedGuruError::ValidationError(
                "Corrected breed must not be empty.".into(),
            ));
        }

        let record = CorrectionRecord::new(original_prediction, corrected_breed);
        let started = Instant::now();

        if let Err(e) = self.sink.record(&record).await {
            log::error!("Error saving correction: {}", e);
            return Err(BreedGuruError::ResponseError(
                "Failed to save correction.".into(),
            ));
        }

        // Pad fast sinks up to the minimum latency.
        let elapsed = started.elapsed();
        if elapsed < self.min_latency {
            tokio::time::sleep(self.min_latency - elapsed).await;
        }

        Ok(CorrectionAck { success: true })
    }
}
