use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use bombona_tracking::build_app;
use bombona_tracking::config::environment::{EnvironmentConfig, FailurePolicy};
use bombona_tracking::database::InMemoryBackend;
use bombona_tracking::models::user::{NewUser, Role};
use bombona_tracking::state::AppState;

const ADMIN_EMAIL: &str = "admin@bioacess.local";
const ADMIN_PASSWORD: &str = "admin123";

struct TestApp {
    app: Router,
    backend: Arc<InMemoryBackend>,
}

impl TestApp {
    async fn new() -> Self {
        let config = EnvironmentConfig {
            environment: "test".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_expiration: 3600,
            cors_origins: Vec::new(),
            failure_policy: FailurePolicy::Strict,
            admin_email: ADMIN_EMAIL.to_string(),
            admin_password: ADMIN_PASSWORD.to_string(),
            ..EnvironmentConfig::default()
        };
        let backend = Arc::new(InMemoryBackend::new());
        let state = AppState::new(config, backend.clone());

        state.bootstrap_admin().await.unwrap();
        for (name, email, role) in [
            ("Carlos", "carlos@example.com", Role::Driver),
            ("Joana", "joana@example.com", Role::Driver),
            ("Operador", "operador@example.com", Role::Operator),
        ] {
            state
                .users
                .create(NewUser {
                    name: name.to_string(),
                    email: email.to_string(),
                    role,
                    password: "senha123".to_string(),
                })
                .await
                .unwrap();
        }

        Self {
            app: build_app(state),
            backend,
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, headers, body)
    }

    async fn login(&self, email: &str, password: &str) -> String {
        let (status, _, body) = self
            .send(
                Method::POST,
                "/api/login",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login falló para {}", email);
        body["data"]["token"].as_str().unwrap().to_string()
    }

    async fn create_ficha(&self, token: &str, site_name: &str) -> Value {
        let (status, _, body) = self
            .send(Method::POST, "/api/fichas", Some(token), Some(ficha_body(site_name)))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"].clone()
    }
}

fn ficha_body(site_name: &str) -> Value {
    json!({
        "site_name": site_name,
        "address": "Rua das Flores, 100",
        "city": "São Paulo",
        "state": "SP",
        "postal_code": "01000-000",
        "responsible_name": "Maria Souza",
        "responsible_phone": "+55 11 99999-0000",
        "container_count": 3,
        "notes": "Portão lateral"
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;
    let (status, _, body) = app.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = TestApp::new().await;
    let (status, headers, body) = app
        .send(
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["role"], "admin");
    assert!(body["data"]["user"].get("password_hash").is_none());

    let cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_login_rejections() {
    let app = TestApp::new().await;

    let (status, _, _) = app
        .send(
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "email": ADMIN_EMAIL, "password": "errada" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = app
        .send(Method::POST, "/api/login", None, Some(json!({ "email": ADMIN_EMAIL })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_accepts_bearer_or_cookie() {
    let app = TestApp::new().await;
    let token = app.login("carlos@example.com", "senha123").await;

    let (status, _, body) = app.send(Method::GET, "/api/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "carlos@example.com");
    assert_eq!(body["data"]["role"], "driver");

    let request = Request::builder()
        .uri("/api/me")
        .header(header::COOKIE, format!("theme=dark; auth_token={}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, _, _) = app.send(Method::GET, "/api/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = app.send(Method::GET, "/api/me", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_expires_cookie() {
    let app = TestApp::new().await;
    let (status, headers, _) = app.send(Method::POST, "/api/logout", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_user_management_is_admin_only() {
    let app = TestApp::new().await;
    let admin = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let driver = app.login("carlos@example.com", "senha123").await;

    let (status, _, _) = app.send(Method::GET, "/api/users", Some(&driver), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, body) = app.send(Method::GET, "/api/users", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 4);

    let new_user = json!({
        "name": "Pedro",
        "email": "pedro@example.com",
        "role": "operator",
        "password": "segredo1"
    });
    let (status, _, body) = app
        .send(Method::POST, "/api/users", Some(&admin), Some(new_user.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["role"], "operator");

    let (status, _, _) = app
        .send(Method::POST, "/api/users", Some(&admin), Some(new_user))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_driver_creates_and_sees_only_own_fichas() {
    let app = TestApp::new().await;
    let carlos = app.login("carlos@example.com", "senha123").await;
    let joana = app.login("joana@example.com", "senha123").await;
    let operator = app.login("operador@example.com", "senha123").await;

    let ficha = app.create_ficha(&carlos, "Hospital Central").await;
    assert_eq!(ficha["driver_name"], "Carlos");
    assert_eq!(ficha["status"], "open");
    assert_eq!(ficha["location"]["responsible_name"], "Maria Souza");
    assert_eq!(ficha["notes"], "Portão lateral");
    let id = ficha["id"].as_str().unwrap();

    let (_, _, body) = app.send(Method::GET, "/api/fichas", Some(&joana), None).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (status, _, _) = app
        .send(Method::GET, &format!("/api/fichas/{}", id), Some(&joana), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, body) = app
        .send(Method::GET, &format!("/api/fichas/{}", id), Some(&operator), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["location"]["responsible_phone"], "+55 11 99999-0000");

    app.create_ficha(&joana, "Clínica Norte").await;
    let (_, _, body) = app.send(Method::GET, "/api/fichas", Some(&operator), None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, _, _) = app
        .send(Method::GET, "/api/fichas/nao-existe", Some(&operator), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_ficha_validation() {
    let app = TestApp::new().await;
    let carlos = app.login("carlos@example.com", "senha123").await;

    let mut body = ficha_body("Hospital");
    body["container_count"] = json!(0);
    let (status, _, _) = app.send(Method::POST, "/api/fichas", Some(&carlos), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut body = ficha_body("Hospital");
    body["city"] = json!("   ");
    let (status, _, _) = app.send(Method::POST, "/api/fichas", Some(&carlos), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_body_fields_are_bad_request() {
    let app = TestApp::new().await;
    let carlos = app.login("carlos@example.com", "senha123").await;

    let mut body = ficha_body("Hospital");
    body.as_object_mut().unwrap().remove("city");
    let (status, _, body) = app.send(Method::POST, "/api/fichas", Some(&carlos), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let ficha_id = app.create_ficha(&carlos, "Hospital").await["id"].clone();
    let (status, _, body) = app
        .send(
            Method::POST,
            "/api/tracking",
            Some(&carlos),
            Some(json!({ "ficha_id": ficha_id, "longitude": -46.6 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, _, body) = app
        .send(
            Method::PATCH,
            &format!("/api/fichas/{}/status", ficha_id.as_str().unwrap()),
            Some(&carlos),
            Some(json!({})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_status_transitions() {
    let app = TestApp::new().await;
    let carlos = app.login("carlos@example.com", "senha123").await;
    let id = app.create_ficha(&carlos, "Hospital")
        .await["id"]
        .as_str()
        .unwrap()
        .to_string();
    let uri = format!("/api/fichas/{}/status", id);

    let (status, _, _) = app
        .send(Method::PATCH, &uri, Some(&carlos), Some(json!({ "status": "cancelada" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) = app
        .send(Method::PATCH, &uri, Some(&carlos), Some(json!({ "status": "finalized" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "finalized");

    let (status, _, _) = app
        .send(Method::PATCH, &uri, Some(&carlos), Some(json!({ "status": "open" })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _, _) = app
        .send(
            Method::PATCH,
            "/api/fichas/nao-existe/status",
            Some(&carlos),
            Some(json!({ "status": "finalized" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_signature_upload() {
    let app = TestApp::new().await;
    let carlos = app.login("carlos@example.com", "senha123").await;
    let joana = app.login("joana@example.com", "senha123").await;
    let id = app.create_ficha(&carlos, "Hospital")
        .await["id"]
        .as_str()
        .unwrap()
        .to_string();
    let uri = format!("/api/fichas/{}/signature", id);
    let payload = "data:image/png;base64,iVBORw0KGgo=";

    let (status, _, _) = app
        .send(Method::POST, &uri, Some(&carlos), Some(json!({ "base64": "" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = app
        .send(Method::POST, &uri, Some(&carlos), Some(json!({ "base64": "não é base64!" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = app
        .send(Method::POST, &uri, Some(&joana), Some(json!({ "base64": payload })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, _) = app
        .send(
            Method::POST,
            "/api/fichas/nao-existe/signature",
            Some(&carlos),
            Some(json!({ "base64": payload })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = app
        .send(Method::POST, &uri, Some(&carlos), Some(json!({ "base64": payload })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["signature"], payload);
}

#[tokio::test]
async fn test_tracking_flow_and_summary() {
    let app = TestApp::new().await;
    let carlos = app.login("carlos@example.com", "senha123").await;
    let joana = app.login("joana@example.com", "senha123").await;
    let operator = app.login("operador@example.com", "senha123").await;

    let carlos_ficha = app.create_ficha(&carlos, "Hospital")
        .await["id"]
        .as_str()
        .unwrap()
        .to_string();
    let joana_ficha = app.create_ficha(&joana, "Clínica")
        .await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, _, _) = app
        .send(
            Method::POST,
            "/api/tracking",
            Some(&joana),
            Some(json!({ "ficha_id": carlos_ficha, "latitude": -23.5, "longitude": -46.6 })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, _) = app
        .send(
            Method::POST,
            "/api/tracking",
            Some(&carlos),
            Some(json!({ "ficha_id": "nao-existe", "latitude": -23.5, "longitude": -46.6 })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for (lat, lng) in [(-23.50, -46.60), (-23.51, -46.61)] {
        let (status, _, body) = app
            .send(
                Method::POST,
                "/api/tracking",
                Some(&carlos),
                Some(json!({ "ficha_id": carlos_ficha, "latitude": lat, "longitude": lng, "accuracy": 8.0 })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["data"]["driver_id"].is_string());
    }
    let (status, _, _) = app
        .send(
            Method::POST,
            "/api/tracking",
            Some(&joana),
            Some(json!({ "ficha_id": joana_ficha, "latitude": -22.9, "longitude": -43.2 })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _, _) = app.send(Method::GET, "/api/tracking", Some(&carlos), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) = app
        .send(
            Method::GET,
            &format!("/api/tracking?ficha_id={}", carlos_ficha),
            Some(&carlos),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let points = body["data"].as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["latitude"], -23.50);

    let (status, _, _) = app
        .send(
            Method::GET,
            &format!("/api/tracking?ficha_id={}", carlos_ficha),
            Some(&joana),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, _, body) = app
        .send(Method::GET, "/api/tracking/summary", Some(&carlos), None)
        .await;
    let summaries = body["data"].as_array().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0]["ficha_id"], carlos_ficha.as_str());
    assert_eq!(summaries[0]["total_points"], 2);
    assert_eq!(summaries[0]["driver_name"], "Carlos");
    assert_eq!(summaries[0]["site_name"], "Hospital");
    assert_eq!(summaries[0]["container_count"], 3);
    assert_eq!(summaries[0]["status"], "open");

    let (_, _, body) = app
        .send(Method::GET, "/api/tracking/summary", Some(&operator), None)
        .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_strict_storage_outage_is_server_error() {
    let app = TestApp::new().await;
    let operator = app.login("operador@example.com", "senha123").await;

    app.backend.set_offline(true);
    let (status, _, _) = app.send(Method::GET, "/api/fichas", Some(&operator), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
