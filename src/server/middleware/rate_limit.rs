//! Per-client rate limiting for the AI suggestion endpoint.

use std::sync::Arc;

use governor::{clock::QuantaInstant, middleware::NoOpMiddleware};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};

use crate::server::{config::Config, error::config::ConfigError};

/// Rate limiter layer keyed on the client IP (forwarding headers first, then peer address).
pub type RateLimiterLayer =
    GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Builds the limiter guarding AI suggestion creation.
///
/// One token is replenished every `ai_rate_replenish_secs` seconds, up to `ai_rate_burst`.
///
/// # Returns
/// - `Ok(RateLimiterLayer)` - Layer ready to attach to the route
/// - `Err(ConfigError::InvalidEnvVar(_))` - A zero interval or burst was configured
pub fn ai_rate_limiter(config: &Config) -> Result<RateLimiterLayer, ConfigError> {
    let governor_config = GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .per_second(config.ai_rate_replenish_secs)
        .burst_size(config.ai_rate_burst)
        .finish()
        .ok_or_else(|| ConfigError::InvalidEnvVar("AI_RATE_REPLENISH_SECS".to_string()))?;

    Ok(GovernorLayer::new(Arc::new(governor_config)))
}
