use serde::{Deserialize, Serialize};

/// A single classification result: breed name plus confidence as a
/// percentage rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub breed: String,
    pub confidence: f32,
}
