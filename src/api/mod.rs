//! HTTP 接口层
//!
//! 所有路由挂在 `/api/v1` 下，handler 只做请求解析和转发，
//! 错误统一通过 [`PrivacyApiError`] 的 `ResponseError` 实现转换。

pub mod cors;
pub mod middleware;
pub mod services;
pub mod types;

use actix_web::web;

use crate::errors::PrivacyApiError;
use services::{geo_routes, health_routes, phishing_routes, whois_routes};

pub const API_PREFIX: &str = "/api/v1";

/// 请求体大小上限
const MAX_JSON_BODY: usize = 16 * 1024;

/// Malformed or mistyped JSON bodies become a 400 `Validation` error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_JSON_BODY)
        .error_handler(|err, _req| {
            PrivacyApiError::validation(format!("Invalid request body: {}", err)).into()
        })
}

pub fn api_v1_routes() -> actix_web::Scope {
    web::scope(API_PREFIX)
        .app_data(json_config())
        .service(geo_routes())
        .service(whois_routes())
        .service(phishing_routes())
        .service(health_routes())
}
