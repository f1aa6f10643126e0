use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use shuttle_axum::axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

use crate::aggregate::Dashboard;
use crate::analysis::{analyze_text, DocumentAnalysis};
use crate::config::AppConfig;
use crate::document::{BatchUpload, Document, DocumentSource, InMemoryDocuments};
use crate::ingest::{anon_hash, ingest_file, IngestReport};
use crate::lexicon::Lexicon;
use crate::metrics::{record_deleted, record_uploaded};
use crate::report::StrategicReport;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentSource>,
    pub lexicon: Arc<Lexicon>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentSource>, lexicon: Lexicon, config: AppConfig) -> Self {
        Self {
            store,
            lexicon: Arc::new(lexicon),
            config: Arc::new(config),
        }
    }

    /// Empty in-memory store, built-in lexicon and default config.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryDocuments::new()),
            Lexicon::builtin(),
            AppConfig::default(),
        )
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/analyze", post(analyze))
        .route("/documents", get(list_documents).post(create_document))
        .route("/documents/{id}", delete(delete_document))
        .route("/upload", post(upload))
        .route("/dashboard", get(dashboard))
        .route("/report", get(report))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Alias of [`create_router`], re-exported at the crate root as
/// `ev_sentiment_explorer::router`.
pub fn router(state: AppState) -> Router {
    create_router(state)
}

/// JSON error body with a status code.
#[derive(Debug)]
pub struct ApiError(StatusCode, String);

impl ApiError {
    fn bad_request(msg: impl Into<String>) -> Self {
        Self(StatusCode::BAD_REQUEST, msg.into())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self(StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.1 }));
        (self.0, body).into_response()
    }
}

#[derive(Deserialize)]
struct AnalyzeReq {
    text: String,
}

async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeReq>,
) -> Json<DocumentAnalysis> {
    let out = analyze_text(&body.text, &state.lexicon);
    debug!(
        target: "api",
        doc = %anon_hash(&body.text),
        emotion = out.emotion.as_str(),
        intention = out.intention.score,
        "analyzed"
    );
    Json(out)
}

async fn list_documents(State(state): State<AppState>) -> Result<Json<Vec<Document>>, ApiError> {
    Ok(Json(state.store.get_all_documents().await?))
}

#[derive(Deserialize)]
struct CreateReq {
    content: String,
}

#[derive(Serialize)]
struct CreatedResp {
    id: u64,
}

async fn create_document(
    State(state): State<AppState>,
    Json(body): Json<CreateReq>,
) -> Result<(StatusCode, Json<CreatedResp>), ApiError> {
    if body.content.trim().is_empty() {
        return Err(ApiError::bad_request("content must not be empty"));
    }
    let id = state.store.upload_document(body.content).await?;
    record_uploaded(1);
    info!(target: "api", id, store = state.store.name(), "document created");
    Ok((StatusCode::CREATED, Json(CreatedResp { id })))
}

#[derive(Serialize)]
struct DeletedResp {
    deleted: bool,
}

async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<(StatusCode, Json<DeletedResp>), ApiError> {
    let deleted = state.store.delete_document(id).await?;
    if deleted {
        record_deleted();
        info!(target: "api", id, "document deleted");
        Ok((StatusCode::OK, Json(DeletedResp { deleted })))
    } else {
        Ok((StatusCode::NOT_FOUND, Json(DeletedResp { deleted })))
    }
}

#[derive(Deserialize)]
struct UploadReq {
    filename: String,
    content: String,
}

#[derive(Serialize)]
struct UploadResp {
    success: bool,
    valid_count: usize,
    skipped_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    ids: Vec<u64>,
}

impl UploadResp {
    fn from_report(report: IngestReport, ids: Vec<u64>) -> Self {
        Self {
            success: report.success,
            valid_count: report.valid_count,
            skipped_count: report.skipped_count,
            error: report.error,
            ids,
        }
    }
}

async fn upload(
    State(state): State<AppState>,
    Json(body): Json<UploadReq>,
) -> Result<(StatusCode, Json<UploadResp>), ApiError> {
    let mut report = ingest_file(&body.filename, &body.content);
    if !report.success {
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(UploadResp::from_report(report, Vec::new())),
        ));
    }

    let contents: Vec<String> = std::mem::take(&mut report.rows)
        .into_iter()
        .map(|r| r.text)
        .collect();
    let filename = body.filename.as_str();
    let progress = |done: usize, total: usize| {
        debug!(target: "api", file = filename, done, total, "upload progress");
    };
    let BatchUpload { ids, error } = state
        .store
        .upload_batch(contents, state.config.upload_chunk_size, &progress)
        .await;
    record_uploaded(ids.len());

    if let Some(e) = error {
        warn!(
            target: "api",
            file = filename,
            committed = ids.len(),
            valid = report.valid_count,
            error = %e,
            "batch upload stopped part way"
        );
        report.success = false;
        report.error = Some(format!("{e:#}"));
        return Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(UploadResp::from_report(report, ids)),
        ));
    }

    Ok((StatusCode::OK, Json(UploadResp::from_report(report, ids))))
}

async fn dashboard(State(state): State<AppState>) -> Result<Json<Dashboard>, ApiError> {
    let docs = state.store.get_all_documents().await?;
    Ok(Json(Dashboard::build(
        &docs,
        &state.lexicon,
        state.config.trend_buckets,
    )))
}

async fn report(State(state): State<AppState>) -> Result<Response, ApiError> {
    let docs = state.store.get_all_documents().await?;
    let dash = Dashboard::build(&docs, &state.lexicon, state.config.trend_buckets);
    let md = StrategicReport::from_dashboard(&dash, Utc::now()).to_markdown();
    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        md,
    )
        .into_response())
}
