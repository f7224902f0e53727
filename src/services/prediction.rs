//! Variety lookups for classified coconut images.

use super::SellerConsole;
use crate::models::{Prediction, PredictionRequest};

impl SellerConsole {
    /// Describe the predicted variety and keep valid results.
    ///
    /// A failed store write is logged and does not affect the result.
    pub async fn predict(&self, request: &PredictionRequest) -> Prediction {
        let prediction = Prediction::evaluate(request);

        if prediction.is_valid {
            match self.store.add_prediction(&prediction).await {
                Ok(id) => tracing::debug!(
                    prediction_id = %id,
                    class_name = %prediction.class_name,
                    "prediction stored"
                ),
                Err(e) => tracing::warn!("Failed to store prediction: {}", e),
            }
        }

        prediction
    }
}
