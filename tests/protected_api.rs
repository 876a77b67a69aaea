use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use axum_test::TestServer;
use najm_dispatch::core::app::{api_router, AppServices};
use najm_dispatch::core::config::{AlertConfig, SupabaseConfig};
use najm_dispatch::modules::supabase::SupabaseClient;
use serde_json::{json, Value};
use std::sync::Arc;

const GOOD_TOKEN: &str = "good-token";
const USER_ID: &str = "6f1c2a9e-0000-4000-8000-000000000001";

async fn stub_user(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    if bearer == Some(GOOD_TOKEN) {
        (
            StatusCode::OK,
            Json(json!({
                "id": USER_ID,
                "email": "responder@najm.test",
                "user_metadata": { "full_name": "Sara Responder" },
                "email_confirmed_at": "2025-11-01T08:00:00Z",
                "created_at": "2025-10-01T08:00:00Z"
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "msg": "invalid JWT" })),
        )
    }
}

async fn stub_incidents() -> Json<Value> {
    Json(json!([
        {
            "id": 11,
            "display_id": "INC-2025-101",
            "date": "Nov 30, 2025",
            "time": "09:15",
            "location": "Khobar, King Fahd Rd",
            "severity": "High",
            "confidence": 94.5,
            "status": "Active"
        },
        {
            "id": 12,
            "display_id": "INC-2025-102",
            "date": "Nov 30, 2025",
            "time": "08:40",
            "location": "Dammam, Corniche",
            "severity": "Low",
            "confidence": 71.0,
            "status": "Resolved"
        }
    ]))
}

async fn stub_profiles() -> Json<Value> {
    Json(json!([
        {
            "id": USER_ID,
            "full_name": "Sara Responder",
            "email": "responder@najm.test",
            "phone": "+966500000000"
        }
    ]))
}

/// Serves the few backend endpoints the protected routes touch
async fn stub_backend() -> String {
    let app = Router::new()
        .route("/auth/v1/user", get(stub_user))
        .route("/rest/v1/incidents", get(stub_incidents))
        .route("/rest/v1/profiles", get(stub_profiles));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn server_with(config: SupabaseConfig) -> TestServer {
    let backend = Arc::new(SupabaseClient::new(config).unwrap());
    let services = AppServices::new(backend, &AlertConfig::default());
    TestServer::new(api_router(&services)).unwrap()
}

async fn backed_server() -> TestServer {
    let config = SupabaseConfig {
        url: stub_backend().await,
        anon_key: "anon".to_string(),
        ..SupabaseConfig::disabled()
    };
    server_with(config)
}

#[tokio::test]
async fn me_resolves_the_bearer_through_the_auth_provider() {
    let server = backed_server().await;

    let body: Value = server
        .get("/api/auth/me")
        .authorization_bearer(GOOD_TOKEN)
        .await
        .json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], USER_ID);
    assert_eq!(body["data"]["full_name"], "Sara Responder");
    assert_eq!(body["data"]["email_verified"], true);

    server
        .get("/api/auth/me")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/api/auth/me")
        .authorization_bearer("expired")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_is_read_for_the_authenticated_user() {
    let server = backed_server().await;

    let body: Value = server
        .get("/api/users/me/profile")
        .authorization_bearer(GOOD_TOKEN)
        .await
        .json();
    assert_eq!(body["data"]["id"], USER_ID);
    assert_eq!(body["data"]["phone"], "+966500000000");

    server
        .get("/api/users/me/profile")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn incidents_come_from_the_backend_with_a_bearer() {
    let server = backed_server().await;

    let body: Value = server
        .get("/api/incidents")
        .authorization_bearer(GOOD_TOKEN)
        .await
        .json();
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["display_id"], "INC-2025-101");
    assert_eq!(rows[0]["id"], "11");
    assert_eq!(body["meta"]["total"], 2);

    server
        .get("/api/incidents")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn dashboard_summary_counts_backend_incidents() {
    let server = backed_server().await;

    let body: Value = server
        .get("/api/dashboard/summary")
        .authorization_bearer(GOOD_TOKEN)
        .await
        .json();
    assert_eq!(body["data"]["total_incidents"], 2);
    assert_eq!(body["data"]["active_incidents"], 1);
    assert_eq!(body["data"]["resolved_incidents"], 1);

    server
        .get("/api/dashboard/map")
        .authorization_bearer("expired")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn demo_incidents_are_public_without_a_backend() {
    let server = server_with(SupabaseConfig::disabled());

    let response = server.get("/api/incidents").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 7);

    let response = server.get("/api/dashboard/summary").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["total_incidents"], 7);

    server.get("/api/dashboard/map").await.assert_status_ok();
}

#[tokio::test]
async fn account_routes_stay_protected_without_a_backend() {
    let server = server_with(SupabaseConfig::disabled());

    server
        .get("/api/users/me/profile")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/api/auth/me")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
