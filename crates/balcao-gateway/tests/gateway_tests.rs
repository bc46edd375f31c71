// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the gateway router, with store backends mocked.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tokio::sync::watch;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use balcao_config::model::{DiscordConfig, StoreAuth, StoreConfig};
use balcao_core::BotStatus;
use balcao_gateway::{router, GatewayState};
use balcao_storage::Database;
use balcao_stores::StoreClient;
use balcao_tickets::TicketStore;

fn store(key: &str, name: &str, url: &str) -> StoreConfig {
    StoreConfig {
        key: key.to_string(),
        name: name.to_string(),
        backend_url: url.to_string(),
        auth: StoreAuth::Bearer,
        token: "secret".to_string(),
        active: true,
        stats_endpoint: "/api/payments/dashboard/stats".to_string(),
    }
}

async fn test_state(stores: Vec<StoreConfig>) -> (GatewayState, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("gateway-test.db");
    let db = Arc::new(Database::open(db_path.to_str().unwrap()).await.unwrap());
    let client = Arc::new(StoreClient::new(stores).unwrap());
    let tickets = Arc::new(TicketStore::new());
    let (_status_tx, bot_status) = watch::channel(BotStatus::Offline);

    (
        GatewayState {
            client,
            db,
            tickets,
            bot_status,
            discord: DiscordConfig::default(),
        },
        dir,
    )
}

async fn get_json(
    state: GatewayState,
    uri: &str,
) -> (StatusCode, serde_json::Value) {
    let response = router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

fn paid_order_body() -> serde_json::Value {
    serde_json::json!({
        "status": "paid",
        "order": {
            "id": 77,
            "amount": 49.9,
            "status": "paid",
            "customer_email": "cliente@gmail.com",
            "created_at": "2026-01-30T08:00:00Z"
        }
    })
}

#[tokio::test]
async fn stores_endpoint_lists_sanitized_records() {
    let (state, _dir) = test_state(vec![
        store("lojabux", "RecargaBX", "https://rebuxbr.com"),
        store("recarregabux", "RecarregaBux", "https://recarregabux.com"),
    ])
    .await;

    let (status, body) = get_json(state, "/stores").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["store_key"], "lojabux");
    assert_eq!(body["message"], "2 lojas encontradas");
    assert!(!body.to_string().contains("secret"));
}

#[tokio::test]
async fn consolidated_search_requires_an_email() {
    let (state, _dir) = test_state(vec![]).await;
    let (status, body) = get_json(state, "/payments/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Email é obrigatório");
}

#[tokio::test]
async fn consolidated_search_rejects_malformed_emails() {
    let (state, _dir) = test_state(vec![]).await;
    let (status, body) = get_json(state, "/payments/search?email=nada").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email inválido");
}

#[tokio::test]
async fn consolidated_search_finds_and_records_a_paid_order() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/check-order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paid_order_body()))
        .mount(&backend)
        .await;

    let (state, _dir) = test_state(vec![store("lojabux", "RecargaBX", &backend.uri())]).await;
    let db = state.db.clone();

    let (status, body) = get_json(state, "/payments/search?email=cliente%40gmail.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["storeName"], "RecargaBX");
    assert_eq!(body["data"]["order"]["id"], 77);
    assert_eq!(body["message"], "Pagamento encontrado com sucesso");

    // Recording is fire-and-forget; give it a moment.
    let mut recorded = Vec::new();
    for _ in 0..50 {
        recorded = balcao_storage::queries::payments::recent_payments(&db, 10)
            .await
            .unwrap();
        if !recorded.is_empty() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].external_id, "77");
    assert_eq!(recorded[0].store_key, "lojabux");
}

#[tokio::test]
async fn consolidated_search_misses_with_404_envelope() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/check-order"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "not_found" })),
        )
        .mount(&backend)
        .await;

    let (state, _dir) = test_state(vec![store("lojabux", "RecargaBX", &backend.uri())]).await;
    let (status, body) = get_json(state, "/payments/search?email=x%40y.com").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "Nenhum pagamento encontrado para este email em nenhuma loja"
    );
}

#[tokio::test]
async fn passthrough_search_returns_the_raw_shape() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/check-order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paid_order_body()))
        .mount(&backend)
        .await;

    let (state, _dir) = test_state(vec![store("lojabux", "RecargaBX", &backend.uri())]).await;
    let (status, body) = get_json(state, "/stores/all/payments/search?email=cliente%40gmail.com").await;
    assert_eq!(status, StatusCode::OK);
    // Raw passthrough: no envelope.
    assert!(body.get("success").is_none());
    assert_eq!(body["status"], "paid");
    assert_eq!(body["store"], "lojabux");
    assert_eq!(body["store_name"], "RecargaBX");
}

#[tokio::test]
async fn passthrough_search_unknown_store_is_404() {
    let (state, _dir) = test_state(vec![]).await;
    let (status, body) = get_json(state, "/stores/nada/payments/search?email=a%40b.com").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Loja não encontrada");
}

#[tokio::test]
async fn billing_consolidates_across_backends() {
    let backend_a = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/payments/dashboard/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "today": { "total": 10.0, "count": 2 },
            "topProducts": [{ "name": "400 Robux", "sales_count": 3 }]
        })))
        .mount(&backend_a)
        .await;

    let backend_b = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/payments/dashboard/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "today": { "total": 5.0, "count": 1 },
            "topProducts": [{ "name": "400 Robux", "sales_count": 2 }]
        })))
        .mount(&backend_b)
        .await;

    let (state, _dir) = test_state(vec![
        store("a", "Loja A", &backend_a.uri()),
        store("b", "Loja B", &backend_b.uri()),
    ])
    .await;

    let (status, body) = get_json(state, "/billing").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let consolidated = &body["consolidated"];
    assert_eq!(consolidated["stats"]["today"]["revenue"], 15.0);
    assert_eq!(consolidated["stats"]["today"]["count"], 3);
    assert_eq!(consolidated["topProducts"][0]["name"], "400 Robux");
    assert_eq!(consolidated["topProducts"][0]["sales"], 5);
    assert_eq!(consolidated["stores"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn billing_with_a_dead_backend_still_answers() {
    // Port 9 is discard; connection will fail fast and count as absent.
    let (state, _dir) = test_state(vec![store("morta", "Morta", "http://127.0.0.1:9")]).await;
    let (status, body) = get_json(state, "/billing").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["consolidated"]["stats"]["today"]["revenue"], 0.0);
    assert_eq!(body["consolidated"]["stores"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn billing_post_rejects_unknown_commands() {
    let (state, _dir) = test_state(vec![]).await;
    let response = router(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/billing")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"command":"explodir"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bot_liveness_reports_status_and_ticket_count() {
    let (state, _dir) = test_state(vec![]).await;
    let (status, body) = get_json(state, "/discord/bot").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "offline");
    assert_eq!(body["tickets"], 0);
}

#[tokio::test]
async fn listing_commands_needs_no_discord_credentials() {
    let (state, _dir) = test_state(vec![]).await;
    let (status, body) = get_json(state, "/discord/commands").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 6);
    assert_eq!(body["data"][0]["name"], "suporte");
}
