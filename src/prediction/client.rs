use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    config::AppConfig,
    error::ServiceError,
    prediction::{Prediction, PredictionRequest, Predictor, build_prompt},
};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: String,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatCompletionsClient {
    http: Client,
    url: String,
    model_id: String,
    api_key: Option<String>,
}

impl ChatCompletionsClient {
    pub fn new(config: &AppConfig) -> Result<Self, ServiceError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            url: config.completions_url(),
            model_id: config.model_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    async fn call(&self, prompt: &str) -> Result<Prediction, reqwest::Error> {
        let payload = ChatRequest {
            model: &self.model_id,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut builder = self
            .http
            .post(&self.url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&payload);
        if let Some(key) = self.api_key.as_deref() {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Ok(Prediction::ProviderError(format!(
                "error from prediction provider: {} - {}",
                status.as_u16(),
                body
            )));
        }

        Ok(parse_reply(&body))
    }
}

fn parse_reply(body: &str) -> Prediction {
    let parsed: ChatResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(err) => return making_prediction_failed(err),
    };

    match parsed.choices.into_iter().next() {
        Some(choice) => Prediction::Answer(choice.message.content.trim().to_string()),
        None => making_prediction_failed("provider reply contained no choices"),
    }
}

fn making_prediction_failed(err: impl std::fmt::Display) -> Prediction {
    Prediction::ProviderError(format!("error making prediction: {err}"))
}

#[async_trait]
impl Predictor for ChatCompletionsClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<Prediction, ServiceError> {
        let prompt = build_prompt(request);
        debug!(url = %self.url, model = %self.model_id, "calling prediction provider");

        let prediction = match self.call(&prompt).await {
            Ok(prediction) => prediction,
            Err(err) => making_prediction_failed(err),
        };

        if let Prediction::ProviderError(ref text) = prediction {
            warn!(error = %text, "prediction provider call failed");
        }
        Ok(prediction)
    }
}
