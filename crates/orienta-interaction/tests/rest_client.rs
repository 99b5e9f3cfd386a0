use orienta_core::OrientaError;
use orienta_core::config::ClientConfig;
use orienta_core::guide::{GuideGenerator, GuideRepository, GuideRequest, GuideStatus, KnowledgeLevel};
use orienta_core::status::{ApiStatus, StatusService};
use orienta_core::user::{AuthService, Credentials};
use orienta_interaction::{ApiClient, HttpAuthService, HttpGuideRepository, HttpStatusService};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ApiClient {
    let config = ClientConfig {
        api_base_url: format!("{}/api/v1", server.uri()),
        ..ClientConfig::default()
    };
    ApiClient::new(&config).unwrap()
}

fn day(number: u32, completed: bool) -> Value {
    json!({
        "day": number,
        "title": format!("Day {number}"),
        "goal": "Learn something",
        "theoretical_research": ["Question"],
        "practical_activity": "Practice",
        "learning_verification": "Verify",
        "completed": completed
    })
}

fn guide(id: Option<&str>, status: &str) -> Value {
    let mut value = json!({
        "title": "Rust async",
        "status": status,
        "created_at": "2025-10-01",
        "owner": "ava",
        "inputs": { "topic": "tokio", "knowledge": "zero", "focus_time": 30, "days": 2 },
        "daily_study": [day(1, false), day(2, false)]
    });
    if let Some(id) = id {
        value["id"] = json!(id);
    }
    value
}

#[tokio::test]
async fn login_stores_cookie_for_later_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/sessions"))
        .and(body_json(json!({"email": "ava@example.com", "password": "secret123"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Session created.",
            "data": {
                "userId": "u-1",
                "username": "ava",
                "email": "ava@example.com",
                "sessionCookie": "cookie-abc",
                "sessionExpiresIn": 1209600
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/user"))
        .and(header("cookie", "session_id=cookie-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "ok",
            "data": {"username": "ava", "email": "ava@example.com", "uid": "u-1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let auth = HttpAuthService::new(api.clone());

    let session = auth
        .login(&Credentials::new("ava@example.com", "secret123"))
        .await
        .unwrap();
    assert_eq!(session.session_cookie, "cookie-abc");
    assert!(api.has_session().await);

    let profile = auth.current_user().await.unwrap();
    assert_eq!(profile.username, "ava");
}

#[tokio::test]
async fn unauthorized_body_maps_to_unauthorized_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "name": "UnauthorizedError",
            "message": "Session expired.",
            "action": "Log in again.",
            "code": 401
        })))
        .mount(&server)
        .await;

    let auth = HttpAuthService::new(api_for(&server));
    let err = auth.current_user().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.action(), "Log in again.");
}

#[tokio::test]
async fn find_by_id_falls_back_to_requested_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/guides/g-7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "ok", "data": guide(None, "studying")})),
        )
        .mount(&server)
        .await;

    let repo = HttpGuideRepository::new(api_for(&server));
    let loaded = repo.find_by_id("g-7").await.unwrap();

    assert_eq!(loaded.id, "g-7");
    assert_eq!(loaded.topic, "tokio");
    assert_eq!(loaded.status, GuideStatus::Studying);
    assert_eq!(loaded.total_days(), 2);
}

#[tokio::test]
async fn find_by_id_rejects_malformed_guide() {
    let server = MockServer::start().await;
    let mut broken = guide(Some("g-1"), "studying");
    broken["daily_study"] = json!([day(2, false), day(1, false)]);

    Mock::given(method("GET"))
        .and(path("/api/v1/guides/g-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok", "data": broken})))
        .mount(&server)
        .await;

    let repo = HttpGuideRepository::new(api_for(&server));
    let err = repo.find_by_id("g-1").await.unwrap_err();
    assert!(err.is_malformed());
}

#[tokio::test]
async fn missing_guide_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/guides/nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let repo = HttpGuideRepository::new(api_for(&server));
    let err = repo.find_by_id("nope").await.unwrap_err();
    assert_eq!(err, OrientaError::not_found("guide", "nope"));
}

#[tokio::test]
async fn list_counts_invalid_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/guides"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "ok",
            "data": [
                guide(Some("a"), "studying"),
                guide(Some("b"), "completed"),
                guide(Some("c"), "archived"),
                {"id": "d"}
            ]
        })))
        .mount(&server)
        .await;

    let repo = HttpGuideRepository::new(api_for(&server));
    let catalog = repo.list().await.unwrap();

    assert_eq!(catalog.guides.len(), 2);
    assert_eq!(catalog.invalid_count, 2);
}

#[tokio::test]
async fn update_studies_sends_full_day_list() {
    let server = MockServer::start().await;
    let days = vec![day(1, true), day(2, false)];

    Mock::given(method("PATCH"))
        .and(path("/api/v1/guides/g-1"))
        .and(body_json(json!({ "new_studies_list": days })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "saved",
            "data": days
        })))
        .expect(1)
        .mount(&server)
        .await;

    let repo = HttpGuideRepository::new(api_for(&server));
    let loaded: Vec<orienta_core::guide::DayEntry> =
        serde_json::from_value(json!(days)).unwrap();
    let stored = repo.update_studies("g-1", &loaded).await.unwrap();

    assert_eq!(stored, loaded);
}

#[tokio::test]
async fn validation_error_carries_server_action() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/guides"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "name": "ValidationError",
            "message": "The number of days must be between 1 and 30.",
            "action": "Pick a shorter plan.",
            "code": 400
        })))
        .mount(&server)
        .await;

    let repo = HttpGuideRepository::new(api_for(&server));
    let request = GuideRequest {
        title: "Too long".to_string(),
        topic: "Everything".to_string(),
        knowledge: KnowledgeLevel::Zero,
        focus_time: 30,
        days: 365,
    };
    let err = repo.create(&request).await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(err.user_message(), "The number of days must be between 1 and 30.");
    assert_eq!(err.action(), "Pick a shorter plan.");
}

#[tokio::test]
async fn status_503_reports_offline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/status"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "message": "API is offline.",
            "data": {"status": "Offline"}
        })))
        .mount(&server)
        .await;

    let status = HttpStatusService::new(api_for(&server));
    assert_eq!(status.status().await.unwrap(), ApiStatus::Offline);
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let config = ClientConfig {
        api_base_url: "http://127.0.0.1:9/api/v1".to_string(),
        ..ClientConfig::default()
    };
    let status = HttpStatusService::new(ApiClient::new(&config).unwrap());

    let err = status.status().await.unwrap_err();
    assert!(err.is_transport());
}
