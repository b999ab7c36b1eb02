use clap::Parser;

// CLI argument structure; every flag can also be supplied via environment
#[derive(Parser, Debug, Clone)]
#[command(name = "places-gateway")]
#[command(about = "LLM-backed gateway that turns location requests into map links")]
pub struct Args {
    // Host to bind the server on
    #[arg(long, env = "GATEWAY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    // Port to run the server on
    #[arg(short, long, env = "GATEWAY_PORT", default_value_t = 8080)]
    pub port: u16,

    // Ollama generate endpoint
    #[arg(
        short,
        long,
        env = "OLLAMA_ENDPOINT",
        default_value = "http://localhost:11434/api/generate"
    )]
    pub ollama_endpoint: String,

    // Model used for query extraction
    #[arg(short, long, env = "OLLAMA_MODEL", default_value = "gemma3:1b")]
    pub model: String,

    // Shared secret expected in X-API-Key; startup fails when absent
    #[arg(long, env = "GATEWAY_API_KEY")]
    pub api_key: String,

    // Google Maps key embedded in the iframe URL
    #[arg(long, env = "GOOGLE_MAPS_API_KEY")]
    pub maps_api_key: String,

    // Rate limit max requests per window
    #[arg(long, env = "RATE_LIMIT", default_value_t = 5)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, env = "RATE_WINDOW", default_value_t = 60)]
    pub rate_window: u64,

    // Upstream call timeout in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT", default_value_t = 30)]
    pub upstream_timeout: u64,
}
