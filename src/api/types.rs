//! 请求 / 响应体

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoLookupRequest {
    pub ip_address: String,
}

/// Body shared by every endpoint that takes a single domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainRequest {
    pub domain: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhishingResponse {
    pub phishing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}
