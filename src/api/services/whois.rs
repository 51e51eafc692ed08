use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::api::types::DomainRequest;
use crate::errors::Result;
use crate::services::WhoisService;

pub async fn lookup(
    whois: web::Data<Arc<WhoisService>>,
    body: web::Json<DomainRequest>,
) -> Result<HttpResponse> {
    let record = whois.lookup(&body.domain).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// `GET /whois/{domain}`，浏览器扩展使用
pub async fn lookup_by_path(
    whois: web::Data<Arc<WhoisService>>,
    domain: web::Path<String>,
) -> Result<HttpResponse> {
    let record = whois.lookup(&domain).await?;
    Ok(HttpResponse::Ok().json(record))
}

pub fn whois_routes() -> actix_web::Scope {
    web::scope("/whois")
        .route("/lookup", web::post().to(lookup))
        .route("/{domain}", web::get().to(lookup_by_path))
}
