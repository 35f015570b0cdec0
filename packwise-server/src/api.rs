//! HTTP surface of the service.
//!
//! Route shape is kept compatible with the original API: pack sizes are
//! added and removed via a size-bearing JSON body, calculation takes a
//! single non-negative integer quantity parameter and reports the
//! assignment as a size → count mapping. Failure categories stay
//! distinguishable through status codes; every error body is
//! `{"error": ...}`.

use crate::store::{CatalogStore, StoreError};
use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::{debug, error};
use packwise::{Catalog, PackAssignment, PackSize};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
}

pub fn router(store: Arc<dyn CatalogStore>) -> Router {
    let state = AppState { store };

    Router::new()
        .route(
            "/api/v1/packs",
            get(list_pack_sizes).post(add_pack_size).delete(remove_pack_size),
        )
        .route("/api/v1/calculate", get(calculate))
        .route("/healthz", get(healthz))
        .with_state(state)
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PackSizeRequest {
    pub size: PackSize,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub sizes: Vec<PackSize>,
}

#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub quantity: u64,
    pub packs: PackAssignment,
}

/// Failure categories of the API, in increasing order of severity. Bad
/// input never reaches the selector or the store; store variants map to
/// their own status codes; everything else is an internal failure.
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(anyhow::Error),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::InvalidSize => ApiError::BadRequest(e.to_string()),
            StoreError::NotFound(_) => ApiError::NotFound(e.to_string()),
            StoreError::AlreadyExists(_) => ApiError::Conflict(e.to_string()),
            StoreError::Backend(inner) => ApiError::Internal(inner),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(e) => {
                error!("internal error: {e:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Parses a size-bearing JSON body by hand so malformed input yields the
/// same `{"error": ...}` shape as every other failure.
fn parse_size_request(body: &str) -> Result<PackSizeRequest, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::BadRequest(format!("invalid request: {e}")))
}

async fn add_pack_size(State(state): State<AppState>, body: String) -> Result<Response, ApiError> {
    let req = parse_size_request(&body)?;
    state.store.add(req.size).await?;

    debug!("added pack size {}", req.size);
    Ok(Json(MessageResponse {
        message: "pack size successfully added".to_string(),
    })
    .into_response())
}

async fn remove_pack_size(
    State(state): State<AppState>,
    body: String,
) -> Result<Response, ApiError> {
    let req = parse_size_request(&body)?;
    state.store.remove(req.size).await?;

    debug!("removed pack size {}", req.size);
    Ok(Json(MessageResponse {
        message: "pack size successfully deleted".to_string(),
    })
    .into_response())
}

async fn list_pack_sizes(State(state): State<AppState>) -> Result<Response, ApiError> {
    let sizes = state.store.list().await?;
    Ok(Json(CatalogResponse { sizes }).into_response())
}

/// Computes the pack assignment for a quantity against a fresh catalog
/// snapshot. An empty catalog yields an empty assignment with status 200:
/// callers must be able to distinguish "no packs exist" from a failure.
async fn calculate(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    let raw = quantity_param(query.as_deref())?;
    let quantity: u64 = raw
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid quantity parameter: {raw:?}")))?;

    let snapshot = state.store.list().await?;
    let catalog = Catalog::new(snapshot);
    let packs = packwise::select(&catalog, quantity);

    Ok(Json(CalculateResponse { quantity, packs }).into_response())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Pulls the `quantity` parameter out of the raw query string. The query is
/// scanned by hand so that any malformed input, percent-encoding included,
/// produces the same `{"error": ...}` body as every other failure path
/// instead of an extractor's plain-text rejection. Quantities are plain
/// digits, so no decoding is needed: an encoded value simply fails to parse.
fn quantity_param(query: Option<&str>) -> Result<String, ApiError> {
    query
        .unwrap_or("")
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "quantity")
        .map(|(_, value)| value.to_string())
        .ok_or_else(|| ApiError::BadRequest("no quantity parameter".to_string()))
}
