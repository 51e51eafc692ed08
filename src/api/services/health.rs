use actix_web::{HttpResponse, Responder, web};
use tracing::trace;

use crate::api::types::HealthResponse;

/// 存活检查，不探测任何依赖
pub async fn health_check() -> impl Responder {
    trace!("Received health check request");
    HttpResponse::Ok().json(HealthResponse::healthy())
}

pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(health_check))
        .route("", web::head().to(health_check))
}
