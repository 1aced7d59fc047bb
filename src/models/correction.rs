use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-supplied correction pair, stamped at record time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionRecord {
    pub id: Uuid,
    pub original_prediction: String,
    pub corrected_breed: String,
    pub timestamp: DateTime<Utc>,
}

impl CorrectionRecord {
    pub fn new(original_prediction: impl Into<String>, corrected_breed: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            original_prediction: original_prediction.into(),
            corrected_breed: corrected_breed.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Acknowledgment returned once a correction has been handed to the sink.
#[derive(Debug, Clone, Serialize)]
pub struct CorrectionAck {
    pub success: bool,
}
