use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::llm::{GenerateError, TextGenerator};

// Fixed contextual location injected into every upstream prompt.
const CONTEXT_LOCATION: &str = "Bengaluru, India";

// Conversational labels models like to prepend despite being told not to.
// Matched case-insensitively at the start of the trimmed text; the longest
// match wins and at most one label is stripped.
const KNOWN_PREFIXES: &[&str] = &[
    "google maps search query:",
    "the query is:",
    "search query:",
    "query:",
];

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("generation backend unreachable")]
    Unavailable,
    #[error("{0}")]
    Upstream(String),
    #[error("empty query extracted from model output")]
    Empty,
}

// One upstream call's normalized query plus the untouched raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub query: String,
    pub raw: String,
}

// Turns a free-form location request into a map search query via one call
// to the generation backend.
pub struct QueryExtractor {
    generator: Arc<dyn TextGenerator>,
}

impl QueryExtractor {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    fn build_prompt(user_prompt: &str) -> String {
        format!(
            "Extract a concise Google Maps search query from: '{user_prompt}'. \
             The user is located in {CONTEXT_LOCATION}. Only return the query."
        )
    }

    pub async fn extract(&self, user_prompt: &str) -> Result<Extraction, ExtractError> {
        let prompt = Self::build_prompt(user_prompt);

        let raw = match self.generator.generate(&prompt).await {
            Ok(text) => text,
            Err(GenerateError::Unreachable(detail)) => {
                debug!(%detail, "generation backend unreachable");
                return Err(ExtractError::Unavailable);
            }
            Err(GenerateError::Call(detail)) => return Err(ExtractError::Upstream(detail)),
        };

        let query = normalize(&raw);
        if query.is_empty() {
            return Err(ExtractError::Empty);
        }

        Ok(Extraction { query, raw })
    }
}

// Trim, drop one known conversational label, then unwrap one layer of
// fully surrounding double quotes.
fn normalize(raw: &str) -> String {
    let mut text = raw.trim();

    for prefix in KNOWN_PREFIXES {
        if text.len() >= prefix.len()
            && text.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
        {
            // the matched bytes are ASCII, so this slice is on a char boundary
            text = text[prefix.len()..].trim_start();
            break;
        }
    }

    let text = text.trim();
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        text[1..text.len() - 1].trim().to_string()
    } else {
        text.to_string()
    }
}
