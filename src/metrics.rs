use lazy_static::lazy_static;
use prometheus::{Counter, Histogram, register_counter, register_histogram};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("places_requests_total", "Total number of /places requests").unwrap();
    pub static ref AUTH_REJECTED: Counter = register_counter!(
        "places_auth_rejected_total",
        "Requests rejected by the auth guard"
    )
    .unwrap();
    pub static ref RATE_LIMITED: Counter = register_counter!(
        "places_rate_limited_total",
        "Requests rejected by the rate limiter"
    )
    .unwrap();
    pub static ref UPSTREAM_LATENCY: Histogram = register_histogram!(
        "places_upstream_latency_seconds",
        "Query extraction latency in seconds"
    )
    .unwrap();
}
