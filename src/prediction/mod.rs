mod client;
mod prompt;
mod types;

use async_trait::async_trait;

use crate::error::ServiceError;

pub use client::ChatCompletionsClient;
pub use prompt::build_prompt;
pub use types::{HealthResponse, PredictForm, Prediction, PredictionRequest, PredictionResponse};

/// Produces a prediction for one validated request.
///
/// Provider-side failures are reported as [`Prediction::ProviderError`]; an
/// `Err` is reserved for failures of the service itself and surfaces as a 500.
#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, request: &PredictionRequest) -> Result<Prediction, ServiceError>;
}
