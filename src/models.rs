use serde::{Deserialize, Serialize};

// Gateway API request format
#[derive(Deserialize, Serialize, Clone, Default)]
pub struct PlacesRequest {
    // Absent prompt is treated as empty, not rejected
    #[serde(default)]
    pub prompt: String,
}

// Gateway API response format
#[derive(Deserialize, Serialize, Clone)]
pub struct PlacesResponse {
    pub original_prompt: String,
    pub llm_query_extracted: String,
    pub llm_raw_response: String,
    pub maps_interactive_link: String,
    pub maps_embed_iframe_url: String,
}

// Ollama API request format
#[derive(Deserialize, Serialize, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    #[serde(default)]
    pub stream: bool,
    pub options: GenerateOptions,
}

#[derive(Deserialize, Serialize, Clone, Copy)]
pub struct GenerateOptions {
    pub temperature: f64,
}

// Ollama API response format
#[derive(Deserialize, Serialize, Clone)]
pub struct GenerateResponse {
    pub response: String,
}
