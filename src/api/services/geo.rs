//! GeoIP 路由

use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use tracing::trace;

use crate::api::types::{DomainRequest, GeoLookupRequest};
use crate::errors::Result;
use crate::services::GeoIpService;
use crate::utils::TrustedProxies;

pub async fn lookup(
    geoip: web::Data<Arc<GeoIpService>>,
    body: web::Json<GeoLookupRequest>,
) -> Result<HttpResponse> {
    trace!("Geo lookup for {}", body.ip_address);
    let result = geoip.lookup(&body.ip_address)?;
    Ok(HttpResponse::Ok().json(result))
}

/// Look up the caller's own address
pub async fn lookup_me(
    req: HttpRequest,
    geoip: web::Data<Arc<GeoIpService>>,
    proxies: web::Data<TrustedProxies>,
) -> Result<HttpResponse> {
    let caller = proxies.client_ip(&req);
    trace!("Geo lookup for caller {:?}", caller);
    let result = geoip.lookup_self(caller)?;
    Ok(HttpResponse::Ok().json(result))
}

pub async fn lookup_domain(
    geoip: web::Data<Arc<GeoIpService>>,
    body: web::Json<DomainRequest>,
) -> Result<HttpResponse> {
    let result = geoip.lookup_domain(&body.domain).await?;
    Ok(HttpResponse::Ok().json(result))
}

pub fn geo_routes() -> actix_web::Scope {
    web::scope("/geo")
        .route("/lookup", web::post().to(lookup))
        .route("/me", web::get().to(lookup_me))
        .route("/lookup-domain", web::post().to(lookup_domain))
}
