//! CORS middleware tests

use actix_web::http::{Method, StatusCode};
use actix_web::test::{self, TestRequest};
use actix_web::{App, HttpResponse, web};

use privacy_api::api::cors::build_cors;
use privacy_api::config::CorsConfig;

async fn ok_handler() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}

fn cors_config(origins: &[&str], allow_credentials: bool) -> CorsConfig {
    CorsConfig {
        allowed_origins: origins.iter().map(|o| o.to_string()).collect(),
        allow_credentials,
        max_age: 600,
    }
}

fn preflight(origin: &str) -> TestRequest {
    TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/api/v1/health")
        .insert_header(("Origin", origin))
        .insert_header(("Access-Control-Request-Method", "POST"))
        .insert_header(("Access-Control-Request-Headers", "content-type"))
}

macro_rules! init_app {
    ($config:expr) => {
        test::init_service(
            App::new()
                .wrap(build_cors(&$config))
                .route("/api/v1/health", web::get().to(ok_handler))
                .route("/api/v1/health", web::post().to(ok_handler)),
        )
        .await
    };
}

#[actix_rt::test]
async fn test_any_origin_preflight_allowed() {
    let app = init_app!(cors_config(&["*"], false));

    let resp = test::call_service(&app, preflight("https://news.example").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        resp.headers()
            .contains_key("access-control-allow-origin")
    );
    assert_eq!(
        resp.headers().get("access-control-max-age").unwrap(),
        "600"
    );
}

#[actix_rt::test]
async fn test_any_origin_never_sends_credentials() {
    // 默认配置：["*"] + credentials，凭据被强制关闭
    let app = init_app!(CorsConfig::default());

    let resp = test::call_service(&app, preflight("https://news.example").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        !resp
            .headers()
            .contains_key("access-control-allow-credentials")
    );
}

#[actix_rt::test]
async fn test_explicit_origin_with_credentials() {
    let app = init_app!(cors_config(&["chrome-extension://abcdef"], true));

    let resp =
        test::call_service(&app, preflight("chrome-extension://abcdef").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("access-control-allow-origin").unwrap(),
        "chrome-extension://abcdef"
    );
    assert_eq!(
        resp.headers()
            .get("access-control-allow-credentials")
            .unwrap(),
        "true"
    );
}

#[actix_rt::test]
async fn test_unlisted_origin_rejected() {
    let app = init_app!(cors_config(&["https://allowed.example"], false));

    let resp = test::call_service(&app, preflight("https://evil.example").to_request()).await;
    assert!(
        !resp
            .headers()
            .contains_key("access-control-allow-origin")
    );
}
