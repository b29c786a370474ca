use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::error;

use crate::error::AppError;
use super::classifier::IntentClassifier;
use super::domain::Offer;
use super::ingest::LeadCsvImporter;
use super::repository::ScoringRepository;
use super::service::{LeadScoringService, ScoringServiceError};

const UPLOAD_FIELD: &str = "file";
const NOT_CSV_DETAIL: &str = "Please upload a CSV file.";
/// Upload cap for `/leads/upload`, replacing axum's 2 MB default body limit.
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Router builder exposing the offer, upload, scoring, and results endpoints.
pub fn lead_router<R, C>(service: Arc<LeadScoringService<R, C>>) -> Router
where
    R: ScoringRepository + 'static,
    C: IntentClassifier + 'static,
{
    Router::new()
        .route("/", get(index_handler))
        .route("/offer", post(offer_handler::<R, C>))
        .route(
            "/leads/upload",
            post(upload_handler::<R, C>).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/score", post(score_handler::<R, C>))
        .route("/results", get(results_handler::<R, C>))
        .route("/results.csv", get(results_csv_handler::<R, C>))
        .with_state(service)
}

pub(crate) async fn index_handler() -> Json<serde_json::Value> {
    Json(json!({
        "ok": true,
        "endpoints": [
            "POST /offer",
            "POST /leads/upload",
            "POST /score",
            "GET /results",
            "GET /results.csv",
        ],
    }))
}

pub(crate) async fn offer_handler<R, C>(
    State(service): State<Arc<LeadScoringService<R, C>>>,
    Json(offer): Json<Offer>,
) -> Response
where
    R: ScoringRepository + 'static,
    C: IntentClassifier + 'static,
{
    match service.set_offer(offer) {
        Ok(offer) => (StatusCode::OK, Json(offer)).into_response(),
        Err(err) => service_error_response(err),
    }
}

pub(crate) async fn upload_handler<R, C>(
    State(service): State<Arc<LeadScoringService<R, C>>>,
    multipart: Multipart,
) -> Result<Response, AppError>
where
    R: ScoringRepository + 'static,
    C: IntentClassifier + 'static,
{
    let raw = match read_csv_upload(multipart).await {
        Ok(raw) => raw,
        Err(detail) => return Ok(detail_response(StatusCode::BAD_REQUEST, detail)),
    };

    let leads = LeadCsvImporter::from_bytes(&raw)?;

    Ok(match service.upload_leads(leads) {
        Ok(count) => (StatusCode::OK, Json(json!({ "count": count }))).into_response(),
        Err(err) => service_error_response(err),
    })
}

pub(crate) async fn score_handler<R, C>(
    State(service): State<Arc<LeadScoringService<R, C>>>,
) -> Response
where
    R: ScoringRepository + 'static,
    C: IntentClassifier + 'static,
{
    match tokio::task::spawn_blocking(move || service.score()).await {
        Ok(Ok(results)) => (StatusCode::OK, Json(results)).into_response(),
        Ok(Err(err)) => service_error_response(err),
        Err(join_error) => {
            error!(error = %join_error, "scoring task did not complete");
            detail_response(StatusCode::INTERNAL_SERVER_ERROR, "scoring failed")
        }
    }
}

pub(crate) async fn results_handler<R, C>(
    State(service): State<Arc<LeadScoringService<R, C>>>,
) -> Response
where
    R: ScoringRepository + 'static,
    C: IntentClassifier + 'static,
{
    match service.results() {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(err) => service_error_response(err),
    }
}

pub(crate) async fn results_csv_handler<R, C>(
    State(service): State<Arc<LeadScoringService<R, C>>>,
) -> Response
where
    R: ScoringRepository + 'static,
    C: IntentClassifier + 'static,
{
    match service.results_csv() {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, mime::TEXT_CSV.as_ref()),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=results.csv",
                ),
            ],
            body,
        )
            .into_response(),
        Err(err) => service_error_response(err),
    }
}

async fn read_csv_upload(mut multipart: Multipart) -> Result<Vec<u8>, String> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| err.body_text())?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let is_csv = field
            .file_name()
            .map(|name| name.to_lowercase().ends_with(".csv"))
            .unwrap_or(false);
        if !is_csv {
            return Err(NOT_CSV_DETAIL.to_string());
        }

        let bytes = field.bytes().await.map_err(|err| err.body_text())?;
        return Ok(bytes.to_vec());
    }

    Err(NOT_CSV_DETAIL.to_string())
}

fn service_error_response(err: ScoringServiceError) -> Response {
    match err {
        ScoringServiceError::OfferMissing => detail_response(
            StatusCode::BAD_REQUEST,
            "Offer not set. POST /offer first.",
        ),
        ScoringServiceError::LeadsMissing => detail_response(
            StatusCode::BAD_REQUEST,
            "No leads uploaded. POST /leads/upload first.",
        ),
        ScoringServiceError::EmptyBatch => {
            detail_response(StatusCode::BAD_REQUEST, "No leads found in CSV.")
        }
        ScoringServiceError::NoResults => detail_response(
            StatusCode::NOT_FOUND,
            "No results yet. Run POST /score first.",
        ),
        ScoringServiceError::Export(_) | ScoringServiceError::Repository(_) => {
            error!(error = %err, "lead scoring request failed");
            detail_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

fn detail_response(status: StatusCode, detail: impl Into<String>) -> Response {
    let payload = json!({ "detail": detail.into() });
    (status, Json(payload)).into_response()
}
