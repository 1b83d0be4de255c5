//! HTTP handlers and the JSON output contract.

use axum::extract::{Multipart, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use retailflow_engine::report::TransferReport;
use retailflow_engine::session::DatasetSummary;
use retailflow_engine::store_metrics::StoreMetrics;
use retailflow_engine::EngineError;
use retailflow_ingest::export::{render_report_csv, EXPORT_FILE_NAME};
use retailflow_ingest::reader::read_table;
use retailflow_ingest::template::{template_csv, TEMPLATE_FILE_NAME};
use retailflow_ingest::IngestError;

use crate::AppState;

// ---------------------------------------------------------------------------
// Error translation
// ---------------------------------------------------------------------------

/// Anything a handler can fail with, translated to a JSON error body.
#[derive(Debug)]
pub enum ApiError {
    Engine(EngineError),
    Ingest(IngestError),
    BadRequest(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::Engine(err)
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        ApiError::Ingest(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Engine(err) => err.to_string(),
            ApiError::Ingest(err) => err.to_string(),
            ApiError::BadRequest(message) => message.clone(),
        };
        tracing::warn!(error = %message, "request rejected");
        (StatusCode::BAD_REQUEST, Json(ErrorBody { error: message })).into_response()
    }
}

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub message: String,
    #[serde(flatten)]
    pub dataset: DatasetSummary,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub results: TransferReport,
}

#[derive(Serialize)]
pub struct StoresResponse {
    pub success: bool,
    pub stores: Vec<StoreMetrics>,
}

#[derive(Deserialize)]
pub struct AnalyzeParams {
    /// Optional presentation cap on the recommendation list.
    pub top: Option<usize>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "RetailFlow Transfer API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// POST /upload
///
/// Multipart file upload. Only `.csv` files are accepted; the parsed table
/// replaces the session's dataset snapshot.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(format!("invalid multipart body: {}", err)))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload.csv").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|err| ApiError::BadRequest(format!("failed to read upload: {}", err)))?;
            file = Some((filename, data));
            break;
        }
    }

    let (filename, data) =
        file.ok_or_else(|| ApiError::BadRequest("no file selected".to_string()))?;
    if !filename.to_ascii_lowercase().ends_with(".csv") {
        return Err(ApiError::BadRequest(
            "only CSV files are supported".to_string(),
        ));
    }

    let table = read_table(&data)?;
    let dataset = state.session.lock().await.load(&table)?;

    tracing::info!(
        rows = dataset.record_count,
        stores = dataset.store_count,
        dropped = dataset.dropped_rows,
        %filename,
        "dataset loaded"
    );

    let message = format!(
        "Loaded {} records across {} stores.",
        dataset.record_count, dataset.store_count
    );
    Ok(Json(UploadResponse {
        success: true,
        filename,
        message,
        dataset,
    }))
}

/// POST /analyze
pub async fn analyze(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeParams>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let report = state.session.lock().await.analyze(params.top)?;

    tracing::info!(
        recommendations = report.summary.total_recommendations,
        rejections = report.summary.total_rejections,
        "analysis complete"
    );

    Ok(Json(AnalyzeResponse {
        success: true,
        results: (*report).clone(),
    }))
}

/// GET /stores
pub async fn stores(State(state): State<AppState>) -> Result<Json<StoresResponse>, ApiError> {
    let metrics = state.session.lock().await.store_metrics()?;
    Ok(Json(StoresResponse {
        success: true,
        stores: metrics,
    }))
}

/// GET /export
///
/// Most recent report as a downloadable CSV.
pub async fn export(State(state): State<AppState>) -> Result<Response, ApiError> {
    let report = state.session.lock().await.last_report()?;
    let csv_text = render_report_csv(&report);
    Ok(csv_download(EXPORT_FILE_NAME, csv_text))
}

/// GET /template
pub async fn template() -> Response {
    csv_download(TEMPLATE_FILE_NAME, template_csv())
}

fn csv_download(filename: &str, body: String) -> Response {
    let headers = [
        (
            header::CONTENT_TYPE,
            "text/csv; charset=utf-8".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];
    (headers, body).into_response()
}
