use std::{any::Any, sync::Arc};

use axum::{
    Form, Json, Router,
    extract::{State, rejection::FormRejection},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{debug, info};

use crate::{
    config::AppConfig,
    error::ServiceError,
    prediction::{HealthResponse, PredictForm, PredictionResponse, Predictor},
};

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub predictor: Arc<dyn Predictor>,
}

pub fn build_router(config: Arc<AppConfig>, predictor: Arc<dyn Predictor>) -> Router {
    let state = AppState { config, predictor };

    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict))
        .route("/health", get(health))
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

async fn predict(
    State(state): State<AppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Json<PredictionResponse>, ServiceError> {
    // A body that isn't form-encoded carries no fields.
    let form = match form {
        Ok(Form(pairs)) => PredictForm::from_pairs(pairs),
        Err(rejection) => {
            debug!(%rejection, "unreadable predict form");
            PredictForm::default()
        }
    };
    let request = form.validate()?;

    info!(model = %state.config.model_id, "running prediction");
    let prediction = state.predictor.predict(&request).await?;
    debug!(
        chars = prediction.text().len(),
        provider_error = prediction.is_provider_error(),
        "prediction finished"
    );

    Ok(Json(PredictionResponse::new(request, prediction)))
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    ServiceError::Internal(message).into_response()
}
