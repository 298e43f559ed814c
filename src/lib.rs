pub mod config;
pub mod error;
pub mod prediction;
pub mod server;

pub use config::AppConfig;
pub use error::ServiceError;
pub use prediction::{ChatCompletionsClient, Prediction, PredictionRequest, Predictor};
pub use server::build_router;
