use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use places_gateway::auth::AuthGuard;
use places_gateway::config::Args;
use places_gateway::extract::QueryExtractor;
use places_gateway::llm::OllamaClient;
use places_gateway::rate_limit::RateLimiter;
use places_gateway::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // parse cli arguments; a missing GATEWAY_API_KEY aborts here
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let generator = OllamaClient::new(
        args.ollama_endpoint.clone(),
        args.model.clone(),
        Duration::from_secs(args.upstream_timeout),
    )?;

    // shared state for all request handlers
    let state = Arc::new(AppState {
        auth: AuthGuard::new(&args.api_key),
        rate_limiter: RateLimiter::new(args.rate_limit, Duration::from_secs(args.rate_window)),
        extractor: QueryExtractor::new(Arc::new(generator)),
        maps_api_key: args.maps_api_key.clone(),
    });

    let app = places_gateway::router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, "gateway listening");
    info!(
        endpoint = %args.ollama_endpoint,
        model = %args.model,
        "forwarding extraction prompts to Ollama"
    );
    info!(
        rate_limit = args.rate_limit,
        rate_window = args.rate_window,
        "rate limit configured"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
