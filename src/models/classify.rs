use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// At most this many predictions are returned per classification.
pub const MAX_PREDICTIONS: usize = 3;

/// One breed guess with its model-reported confidence in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub breed: String,
    pub confidence: f64,
}

/// Shape the model is asked to produce. `predictions` is optional so a
/// missing field normalizes to "no subject recognized" instead of a
/// parse error.
#[derive(Debug, Deserialize)]
pub struct PredictionList {
    pub predictions: Option<Vec<Prediction>>,
}

/// The classification result handed to callers: sorted descending by
/// confidence, at most `MAX_PREDICTIONS` entries, empty when the image
/// contains no cow or buffalo.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyResponse {
    pub predictions: Vec<Prediction>,
}

/// Pure post-processing of whatever the model returned. The remote
/// ordering is not trusted; an absent list is a valid empty result.
pub fn normalize_predictions(raw: Option<Vec<Prediction>>) -> Vec<Prediction> {
    let mut predictions = raw.unwrap_or_default();
    predictions.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });
    predictions.truncate(MAX_PREDICTIONS);
    predictions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(breed: &str, confidence: f64) -> Prediction {
        Prediction {
            breed: breed.to_string(),
            confidence,
        }
    }

    #[test]
    fn predictions_are_sorted_descending_by_confidence() {
        let raw = vec![
            prediction("Sahiwal", 0.11),
            prediction("Gir", 0.87),
            prediction("Red Sindhi", 0.02),
        ];
        let normalized = normalize_predictions(Some(raw));

        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized[0].breed, "Gir");
        assert_eq!(normalized[1].breed, "Sahiwal");
        assert_eq!(normalized[2].breed, "Red Sindhi");
    }

    #[test]
    fn missing_predictions_normalize_to_empty() {
        assert!(normalize_predictions(None).is_empty());
        assert!(normalize_predictions(Some(vec![])).is_empty());
    }

    #[test]
    fn overlong_lists_are_truncated_to_the_top_three() {
        let raw = (0..5)
            .map(|i| prediction(&format!("breed-{}", i), i as f64 / 10.0))
            .collect();
        let normalized = normalize_predictions(Some(raw));

        assert_eq!(normalized.len(), MAX_PREDICTIONS);
        assert_eq!(normalized[0].breed, "breed-4");
    }

    #[test]
    fn missing_field_deserializes_as_none() {
        let list: PredictionList = serde_json::from_str("{}").unwrap();
        assert!(list.predictions.is_none());
    }
}
