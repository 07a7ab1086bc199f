use std::io::Cursor;
use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{Datelike, Local};
use serde::Deserialize;
use serde_json::json;

use super::service::{BuildingDocumentService, DocumentServiceError};
use super::store::{DocumentFilter, DocumentStore, NewDocument, StoreError};
use crate::compliance::{BuildingId, DocumentId, DocumentStatus, DocumentType, TenantId};

/// Tenant identity resolved by the session layer in front of this router.
///
/// The router never authenticates; it only consumes the identity the service
/// in front of it established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentTenant(pub TenantId);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentTenant
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CurrentTenant>().copied().ok_or_else(|| {
            let payload = json!({ "error": "inloggning krävs" });
            (StatusCode::UNAUTHORIZED, Json(payload)).into_response()
        })
    }
}

/// Router builder exposing the building and document endpoints.
pub fn document_router<S>(service: Arc<BuildingDocumentService<S>>) -> Router
where
    S: DocumentStore + 'static,
{
    Router::new()
        .route("/api/v1/buildings", get(list_buildings_handler::<S>))
        .route(
            "/api/v1/buildings/:building_id",
            get(building_overview_handler::<S>),
        )
        .route(
            "/api/v1/buildings/:building_id/documents",
            post(create_document_handler::<S>),
        )
        .route(
            "/api/v1/buildings/:building_id/documents/import",
            post(import_register_handler::<S>),
        )
        .route(
            "/api/v1/documents/:document_id",
            get(document_detail_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct BuildingSearchQuery {
    #[serde(default)]
    search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BuildingDocumentsQuery {
    #[serde(default, rename = "type")]
    document_type: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    year: Option<String>,
    #[serde(default)]
    reference_year: Option<i32>,
}

impl BuildingDocumentsQuery {
    /// Blank query values mean "no filter".
    fn filter(&self) -> DocumentFilter {
        DocumentFilter {
            document_type: self
                .document_type
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(DocumentType::new),
            status: self
                .status
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(DocumentStatus::from_raw),
            year: self
                .year
                .as_deref()
                .and_then(|value| value.trim().parse::<i32>().ok()),
        }
    }
}

pub(crate) async fn list_buildings_handler<S>(
    State(service): State<Arc<BuildingDocumentService<S>>>,
    CurrentTenant(tenant): CurrentTenant,
    Query(query): Query<BuildingSearchQuery>,
) -> Response
where
    S: DocumentStore + 'static,
{
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty());

    match service.list_buildings(tenant, search) {
        Ok(buildings) => (StatusCode::OK, Json(buildings)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn building_overview_handler<S>(
    State(service): State<Arc<BuildingDocumentService<S>>>,
    CurrentTenant(tenant): CurrentTenant,
    Path(building_id): Path<u64>,
    Query(query): Query<BuildingDocumentsQuery>,
) -> Response
where
    S: DocumentStore + 'static,
{
    let filter = query.filter();
    let reference_year = query
        .reference_year
        .unwrap_or_else(|| Local::now().year());

    match service.building_overview(tenant, BuildingId(building_id), &filter, reference_year) {
        Ok(overview) => (StatusCode::OK, Json(overview)).into_response(),
        Err(DocumentServiceError::BuildingNotFound) => not_found("Byggnaden hittades inte"),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn document_detail_handler<S>(
    State(service): State<Arc<BuildingDocumentService<S>>>,
    CurrentTenant(tenant): CurrentTenant,
    Path(document_id): Path<u64>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match service.document_detail(tenant, DocumentId(document_id)) {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(DocumentServiceError::DocumentNotFound) => not_found("Dokumentet hittades inte"),
        Err(error) => service_error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewDocumentRequest {
    filename: String,
    document_type: String,
    status: String,
    year: i32,
    #[serde(default)]
    file_url: Option<String>,
}

pub(crate) async fn create_document_handler<S>(
    State(service): State<Arc<BuildingDocumentService<S>>>,
    CurrentTenant(tenant): CurrentTenant,
    Path(building_id): Path<u64>,
    Json(request): Json<NewDocumentRequest>,
) -> Response
where
    S: DocumentStore + 'static,
{
    let document = NewDocument {
        building_id: BuildingId(building_id),
        document_type: DocumentType::new(&request.document_type),
        status: DocumentStatus::from_raw(&request.status),
        year: request.year,
        file_url: request
            .file_url
            .unwrap_or_else(|| format!("/docs/{}", request.filename)),
        filename: request.filename,
    };

    match service.add_document(tenant, document) {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(DocumentServiceError::BuildingNotFound) => not_found("Byggnaden hittades inte"),
        Err(error) => service_error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterImportRequest {
    csv: String,
}

pub(crate) async fn import_register_handler<S>(
    State(service): State<Arc<BuildingDocumentService<S>>>,
    CurrentTenant(tenant): CurrentTenant,
    Path(building_id): Path<u64>,
    Json(request): Json<RegisterImportRequest>,
) -> Response
where
    S: DocumentStore + 'static,
{
    let reader = Cursor::new(request.csv.into_bytes());
    match service.import_register(tenant, BuildingId(building_id), reader) {
        Ok(documents) => {
            let payload = json!({
                "imported": documents.len(),
                "documents": documents,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(DocumentServiceError::BuildingNotFound) => not_found("Byggnaden hittades inte"),
        Err(error) => service_error_response(error),
    }
}

fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
}

fn service_error_response(error: DocumentServiceError) -> Response {
    let status = match &error {
        DocumentServiceError::BuildingNotFound | DocumentServiceError::DocumentNotFound => {
            StatusCode::NOT_FOUND
        }
        DocumentServiceError::Import(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DocumentServiceError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        DocumentServiceError::Store(_) | DocumentServiceError::Configuration(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(json!({ "error": error.to_string() }))).into_response()
}
