//! CORS middleware built from [`CorsConfig`]

use actix_cors::Cors;
use tracing::{error, warn};

use crate::config::CorsConfig;

fn is_any_origin(config: &CorsConfig) -> bool {
    config.allowed_origins.iter().any(|o| o == "*")
}

/// Validate CORS configuration at startup (runs once, not per worker)
pub fn validate_cors_config(config: &CorsConfig) {
    if config.allowed_origins.is_empty() {
        warn!(
            "CORS allowed_origins is empty. \
            No cross-origin requests will be allowed. \
            Use '[\"*\"]' for any origin."
        );
    }

    if is_any_origin(config) && config.allow_credentials {
        error!(
            "allow_any_origin + allow_credentials lets any website make credentialed \
            cross-origin requests. Credentials are disabled."
        );
    }
}

/// Build the CORS middleware. Every method and header is allowed; the
/// origin list and credentials come from configuration.
pub fn build_cors(config: &CorsConfig) -> Cors {
    let any_origin = is_any_origin(config);

    let mut cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(config.max_age as usize);

    if any_origin {
        cors = cors.allow_any_origin();
    } else {
        // 空列表 = 仅同源
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    // actix-cors 在 any_origin 下会回显 Origin，带凭据等于对所有站点开放
    if config.allow_credentials && !any_origin {
        cors = cors.supports_credentials();
    }

    cors
}
