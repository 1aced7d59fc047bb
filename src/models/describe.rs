use serde::{Deserialize, Serialize};

/// Generated description of a single breed. Not cached; regenerated on
/// every selection because text generation is non-deterministic anyway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedDescription {
    pub description: String,
}
