use crate::auth::AuthGuard;
use crate::extract::QueryExtractor;
use crate::rate_limit::RateLimiter;

// App's shared state, one instance per process.
pub struct AppState {
    pub auth: AuthGuard,
    pub rate_limiter: RateLimiter,
    pub extractor: QueryExtractor,
    pub maps_api_key: String,
}
