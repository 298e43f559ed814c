use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use caste_prediction_service::{AppConfig, ChatCompletionsClient, Predictor, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Arc::new(AppConfig::from_env()?);
    if let Some(warning) = config.missing_api_key_warning() {
        tracing::warn!("{warning}");
    }
    tracing::info!(
        model = %config.model_id,
        url = %config.completions_url(),
        "prediction provider configured"
    );

    let predictor: Arc<dyn Predictor> = Arc::new(ChatCompletionsClient::new(config.as_ref())?);
    let router = build_router(config.clone(), predictor);

    let listener = TcpListener::bind(config.listen_addr).await?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "HTTP server ready");

    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,hyper=warn,axum::rejection=trace".into());
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
