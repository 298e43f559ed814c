#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use http_body_util::BodyExt;
use tokio::net::TcpListener;

use caste_prediction_service::{AppConfig, Prediction, PredictionRequest, Predictor, ServiceError};

pub fn test_config(api_base_url: &str) -> AppConfig {
    let base = api_base_url.to_string();
    AppConfig::from_lookup(move |key| match key {
        "GROQ_API_KEY" => Some("test-key".to_string()),
        "GROQ_API_URL" => Some(base.clone()),
        "MODEL_ID" => Some("test-model".to_string()),
        _ => None,
    })
    .unwrap()
}

pub enum StubBehaviour {
    Reply(Prediction),
    Fail(String),
    Panic,
}

pub struct StubPredictor {
    behaviour: StubBehaviour,
    calls: AtomicUsize,
    seen: Mutex<Vec<PredictionRequest>>,
}

impl StubPredictor {
    pub fn new(behaviour: StubBehaviour) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn answering(text: &str) -> Arc<Self> {
        Self::new(StubBehaviour::Reply(Prediction::Answer(text.to_string())))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<PredictionRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Predictor for StubPredictor {
    async fn predict(&self, request: &PredictionRequest) -> Result<Prediction, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());
        match &self.behaviour {
            StubBehaviour::Reply(prediction) => Ok(prediction.clone()),
            StubBehaviour::Fail(message) => Err(ServiceError::Internal(message.clone())),
            StubBehaviour::Panic => panic!("predictor exploded"),
        }
    }
}

/// What the simulated provider saw on its last call.
#[derive(Debug, Clone)]
pub struct CapturedCall {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct ProviderState {
    status: StatusCode,
    body: String,
    captured: Arc<Mutex<Vec<CapturedCall>>>,
}

pub struct FakeProvider {
    pub addr: SocketAddr,
    pub captured: Arc<Mutex<Vec<CapturedCall>>>,
}

impl FakeProvider {
    pub async fn start(status: StatusCode, body: &str) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = ProviderState {
            status,
            body: body.to_string(),
            captured: captured.clone(),
        };
        let app = Router::new()
            .route("/v1/chat/completions", post(completions))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, captured }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn calls(&self) -> Vec<CapturedCall> {
        self.captured.lock().unwrap().clone()
    }
}

async fn completions(
    State(state): State<ProviderState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.captured.lock().unwrap().push(CapturedCall {
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body,
    });
    (state.status, state.body)
}

pub fn chat_reply(content: &str) -> String {
    serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
    .to_string()
}

pub fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn text_body(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
