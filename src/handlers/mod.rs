mod health;
mod metrics;
mod places;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use places::{places_handler, places_preflight};
