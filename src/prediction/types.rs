use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ServiceError;

pub const MISSING_FIELDS_MESSAGE: &str =
    "All fields (name, surname, place of origin) are required";

/// Raw form body of `POST /predict`. Absent fields are empty.
#[derive(Debug, Default)]
pub struct PredictForm {
    pub name: String,
    pub surname: String,
    pub place_of_origin: String,
}

impl PredictForm {
    /// Collects the fields from decoded form pairs. The first occurrence of a
    /// repeated key wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut name = None;
        let mut surname = None;
        let mut place_of_origin = None;

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "name" => &mut name,
                "surname" => &mut surname,
                "place_of_origin" => &mut place_of_origin,
                _ => continue,
            };
            slot.get_or_insert(value);
        }

        Self {
            name: name.unwrap_or_default(),
            surname: surname.unwrap_or_default(),
            place_of_origin: place_of_origin.unwrap_or_default(),
        }
    }

    pub fn validate(self) -> Result<PredictionRequest, ServiceError> {
        let name = self.name.trim();
        let surname = self.surname.trim();
        let place_of_origin = self.place_of_origin.trim();

        if name.is_empty() || surname.is_empty() || place_of_origin.is_empty() {
            return Err(ServiceError::BadRequest(MISSING_FIELDS_MESSAGE.into()));
        }

        Ok(PredictionRequest {
            name: name.to_string(),
            surname: surname.to_string(),
            place_of_origin: place_of_origin.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionRequest {
    pub name: String,
    pub surname: String,
    pub place_of_origin: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prediction {
    Answer(String),
    ProviderError(String),
}

impl Prediction {
    pub fn text(&self) -> &str {
        match self {
            Prediction::Answer(text) | Prediction::ProviderError(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Prediction::Answer(text) | Prediction::ProviderError(text) => text,
        }
    }

    pub fn is_provider_error(&self) -> bool {
        matches!(self, Prediction::ProviderError(_))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub success: bool,
    pub prediction: String,
    pub input: PredictionRequest,
    pub timestamp: DateTime<Utc>,
}

impl PredictionResponse {
    pub fn new(input: PredictionRequest, prediction: Prediction) -> Self {
        Self {
            success: true,
            prediction: prediction.into_text(),
            input,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            timestamp: Utc::now(),
        }
    }
}
