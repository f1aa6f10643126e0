// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - POST /analyze
// - GET/POST /documents, DELETE /documents/{id}
// - POST /upload (success, malformed, store failing part way)
// - GET /dashboard on an empty store
// - GET /report content type

use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::json;
use serde_json::Value as Json;
use shuttle_axum::axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use tower::ServiceExt as _; // for `oneshot`

use ev_sentiment_explorer::api::{self, AppState};
use ev_sentiment_explorer::{AppConfig, Document, DocumentSource, InMemoryDocuments, Lexicon};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

/// Fresh router over an empty in-memory store.
fn test_router() -> Router {
    api::router(AppState::in_memory())
}

fn post_json(uri: &str, payload: Json) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build POST")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build GET")
}

async fn read_json(resp: Response) -> Json {
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let resp = test_router().oneshot(get("/health")).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK, "health should be 200");

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    assert_eq!(String::from_utf8(bytes).expect("utf8").trim(), "OK");
}

#[tokio::test]
async fn api_analyze_returns_expected_json_fields() {
    let payload = json!({ "text": "Viar Q1 di Bandung murah, saya puas dan mau beli" });
    let resp = test_router()
        .oneshot(post_json("/analyze", payload))
        .await
        .expect("oneshot /analyze");
    assert!(resp.status().is_success(), "got {}", resp.status());

    let v = read_json(resp).await;
    assert_eq!(v["brand"], "Viar");
    assert_eq!(v["location"], "bandung");
    assert_eq!(v["emotion"], "satisfaction");
    assert_eq!(v["emotion_label"], "Kepuasan");
    let score = v["intention"]["score"].as_u64().expect("intention.score");
    assert!(score <= 100);
    assert!(v["intention"]["level"].is_string());
    assert_eq!(v["utaut2"].as_array().map(Vec::len), Some(7));
    assert_eq!(v["marketing_mix"].as_array().map(Vec::len), Some(8));
    assert_eq!(v["funnel"].as_array().map(Vec::len), Some(5));
    assert_eq!(v["psycho_social"].as_array().map(Vec::len), Some(6));
    assert_eq!(v["utaut2"][0]["dimension"], "PE");
    assert!(v.get("id").is_none(), "free text has no id");
}

#[tokio::test]
async fn api_analyze_rejects_invalid_json() {
    let req = Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = test_router().oneshot(req).await.unwrap();
    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn api_documents_crud() {
    let app = test_router();

    let resp = app
        .clone()
        .oneshot(post_json("/documents", json!({ "content": "Gesits mantap" })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = read_json(resp).await["id"].as_u64().expect("id");

    let resp = app.clone().oneshot(get("/documents")).await.unwrap();
    let list = read_json(resp).await;
    assert_eq!(list.as_array().map(Vec::len), Some(1));
    assert_eq!(list[0]["content"], "Gesits mantap");

    let del = |id: u64| {
        Request::builder()
            .method("DELETE")
            .uri(format!("/documents/{id}"))
            .body(Body::empty())
            .unwrap()
    };
    let resp = app.clone().oneshot(del(id)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_json(resp).await["deleted"], true);

    // second delete of the same id → not found
    let resp = app.clone().oneshot(del(id)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(resp).await["deleted"], false);
}

#[tokio::test]
async fn api_documents_rejects_empty_content() {
    let resp = test_router()
        .oneshot(post_json("/documents", json!({ "content": "   " })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(read_json(resp).await["error"].is_string());
}

#[tokio::test]
async fn api_upload_csv_creates_documents() {
    let app = test_router();
    let csv = "id,text\n1,Gesits irit\n2,\n3,\"Viar Q1, mantap\"\n";
    let resp = app
        .clone()
        .oneshot(post_json("/upload", json!({ "filename": "ulasan.csv", "content": csv })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let v = read_json(resp).await;
    assert_eq!(v["success"], true);
    assert_eq!(v["valid_count"], 2);
    assert_eq!(v["skipped_count"], 1);
    assert_eq!(v["ids"].as_array().map(Vec::len), Some(2));

    let list = read_json(app.oneshot(get("/documents")).await.unwrap()).await;
    assert_eq!(list[1]["content"], "Viar Q1, mantap");
}

#[tokio::test]
async fn api_upload_malformed_is_422_with_error() {
    let resp = test_router()
        .oneshot(post_json(
            "/upload",
            json!({ "filename": "data.json", "content": "{\"text\":\"x\"}" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let v = read_json(resp).await;
    assert_eq!(v["success"], false);
    assert_eq!(v["valid_count"], 0);
    assert!(v["error"].is_string());
    assert_eq!(v["ids"].as_array().map(Vec::len), Some(0));
}

/// Store that refuses documents mentioning "rusak" and keeps the rest.
struct FlakyStore(InMemoryDocuments);

#[async_trait]
impl DocumentSource for FlakyStore {
    async fn get_all_documents(&self) -> Result<Vec<Document>> {
        self.0.get_all_documents().await
    }
    async fn upload_document(&self, content: String) -> Result<u64> {
        if content.contains("rusak") {
            bail!("storage unavailable");
        }
        self.0.upload_document(content).await
    }
    async fn delete_document(&self, id: u64) -> Result<bool> {
        self.0.delete_document(id).await
    }
    fn name(&self) -> &'static str {
        "flaky"
    }
}

#[tokio::test]
async fn api_upload_partial_failure_returns_committed_ids() {
    let config = AppConfig {
        upload_chunk_size: 1,
        ..AppConfig::default()
    };
    let store = Arc::new(FlakyStore(InMemoryDocuments::new()));
    let app = api::router(AppState::new(store, Lexicon::builtin(), config));

    let csv = "text\nGesits irit\nViar mantap\ndata rusak\nSelis oke\n";
    let resp = app
        .clone()
        .oneshot(post_json("/upload", json!({ "filename": "ulasan.csv", "content": csv })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let v = read_json(resp).await;
    assert_eq!(v["success"], false);
    assert_eq!(v["valid_count"], 4);
    assert_eq!(v["ids"], json!([0, 1]));
    assert!(v["error"].as_str().unwrap_or_default().contains("storage unavailable"));

    // the committed documents stay listed
    let list = read_json(app.oneshot(get("/documents")).await.unwrap()).await;
    assert_eq!(list.as_array().map(Vec::len), Some(2));
    assert_eq!(list[1]["content"], "Viar mantap");
}

#[tokio::test]
async fn api_router_alias_matches_create_router() {
    for app in [
        ev_sentiment_explorer::router(AppState::in_memory()),
        api::create_router(AppState::in_memory()),
    ] {
        let resp = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn api_dashboard_on_empty_store() {
    let v = read_json(test_router().oneshot(get("/dashboard")).await.unwrap()).await;
    assert_eq!(v["total_documents"], 0);
    assert_eq!(v["intention"], json!({ "high": 0, "medium": 0, "low": 0 }));
    assert_eq!(v["emotions"].as_array().map(Vec::len), Some(5));
    assert_eq!(v["psycho_social_matrix"]["cells"].as_array().map(Vec::len), Some(0));
    assert_eq!(v["trend"].as_array().map(Vec::len), Some(6));
}

#[tokio::test]
async fn api_report_is_markdown() {
    let resp = test_router().oneshot(get("/report")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let ct = resp
        .headers()
        .get(http::header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(ct.starts_with("text/markdown"), "content-type was {ct}");
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    let md = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(md.starts_with("# EV Motorcycle Strategic Report"));
}
