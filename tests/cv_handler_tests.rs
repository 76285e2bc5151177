use actix_web::{body, http::StatusCode, test, web, App};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;

use skilldb_backend::{
    errors::{AppError, PlaceholderDiagnostic},
    routes::configure_routes,
    settings::{AppConfig, AppEnvironment},
    tenure::Locale,
    AppState,
};

fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "SkillDB-API-test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        worker_count: 1,
        // Nothing listens on port 1; the pool is lazy so the connection
        // failure only surfaces once a query runs.
        database_url: "postgres://postgres@127.0.0.1:1/skilldb".to_string(),
        renderer_url: "http://127.0.0.1:1".to_string(),
        template_name: "cv_template.docx".to_string(),
        locale: Locale::Fr,
        cors_allowed_origins: vec!["*".to_string()],
    }
}

fn test_state() -> web::Data<AppState> {
    let config = test_config();
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy(&config.database_url)
        .expect("lazy pool");
    web::Data::new(AppState::new(&config, pool))
}

#[actix_rt::test]
async fn home_returns_service_banner() {
    let app = test::init_service(
        App::new()
            .app_data(test_state())
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "Ok");
}

#[actix_rt::test]
async fn generate_without_user_id_returns_400() {
    let app = test::init_service(
        App::new()
            .app_data(test_state())
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/cv/generate")
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("user_id"));
}

#[actix_rt::test]
async fn generate_with_malformed_user_id_returns_400() {
    let app = test::init_service(
        App::new()
            .app_data(test_state())
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/cv/generate?user_id=not-a-uuid")
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid parameter"));
}

#[actix_rt::test]
async fn generate_with_unreachable_store_returns_500_upstream_error() {
    let app = test::init_service(
        App::new()
            .app_data(test_state())
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/cv/generate?user_id=7f8d1a4e-29c3-4f27-9a41-0d6f2b5c8e10")
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Upstream read failed");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .starts_with("user_by_id"));
}

#[actix_rt::test]
async fn not_found_error_maps_to_404_json_body() {
    let resp = AppError::NotFound("User 42".to_string()).to_http_response();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let bytes = body::to_bytes(resp.into_body()).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Not found: User 42");
}

#[actix_rt::test]
async fn template_error_maps_to_500_with_itemized_diagnostics() {
    let resp = AppError::TemplateRender(vec![
        PlaceholderDiagnostic {
            id: "role_in_company".to_string(),
            message: "missing placeholder".to_string(),
            explanation: "template has no {role_in_company} tag".to_string(),
        },
        PlaceholderDiagnostic {
            id: "total_experience".to_string(),
            message: "type mismatch".to_string(),
            explanation: "expected scalar".to_string(),
        },
    ])
    .to_http_response();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = body::to_bytes(resp.into_body()).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["error"], "Template rendering failed");
    let details = body["details"].as_array().unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0]["id"], "role_in_company");
    assert_eq!(details[0]["message"], "missing placeholder");
    assert_eq!(details[0]["explanation"], "template has no {role_in_company} tag");
}

#[actix_rt::test]
async fn missing_parameter_error_maps_to_400() {
    let resp = AppError::MissingParameter("user_id".to_string()).to_http_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn invalid_parameter_error_maps_to_400() {
    let resp = AppError::InvalidParameter("user_id is not a valid uuid: 42".to_string())
        .to_http_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = body::to_bytes(resp.into_body()).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Invalid parameter: user_id is not a valid uuid: 42");
}
