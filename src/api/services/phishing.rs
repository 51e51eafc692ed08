use actix_web::{HttpResponse, web};
use std::sync::Arc;
use tracing::debug;

use crate::api::types::{DomainRequest, PhishingResponse};
use crate::services::PhishingDomainSet;

pub async fn check_domain(
    phishing: web::Data<Arc<PhishingDomainSet>>,
    body: web::Json<DomainRequest>,
) -> HttpResponse {
    let hit = phishing.contains(&body.domain);
    if hit {
        debug!("Phishing list hit: {}", body.domain);
    }
    HttpResponse::Ok().json(PhishingResponse { phishing: hit })
}

pub fn phishing_routes() -> actix_web::Scope {
    web::scope("/phishing").route("/check-domain-phishing", web::post().to(check_domain))
}
