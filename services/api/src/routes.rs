use crate::infra::AppState;
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use byggdok::documents::{
    document_router, BuildingDocumentService, CurrentTenant, DocumentStore,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Assemble the application router: the tenant-scoped document routes behind
/// the session middleware, plus the public operational endpoints.
pub(crate) fn app_router<S>(
    service: Arc<BuildingDocumentService<S>>,
    state: AppState,
) -> Router
where
    S: DocumentStore + 'static,
{
    document_router(service)
        .layer(middleware::from_fn_with_state(state, require_session))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/session", post(login_endpoint).delete(logout_endpoint))
        .route("/api/v1/uploads", post(upload_endpoint))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolve the bearer token to a tenant and stash it for the document router.
pub(crate) async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let tenant = bearer_token(request.headers()).and_then(|token| state.sessions.resolve(token));

    match tenant {
        Some(tenant) => {
            request.extensions_mut().insert(CurrentTenant(tenant));
            next.run(request).await
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "inloggning krävs" })),
        )
            .into_response(),
    }
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    email: String,
    password: String,
}

pub(crate) async fn login_endpoint(
    Extension(state): Extension<AppState>,
    Json(request): Json<LoginRequest>,
) -> Response {
    if request.email == state.auth.demo_email && request.password == state.auth.demo_password {
        let tenant = state.auth.demo_tenant;
        let token = state.sessions.issue(tenant);
        (
            StatusCode::OK,
            Json(json!({ "token": token, "tenant_id": tenant })),
        )
            .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Fel email eller lösenord" })),
        )
            .into_response()
    }
}

pub(crate) async fn logout_endpoint(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Response {
    match bearer_token(&headers) {
        Some(token) if state.sessions.revoke(token) => StatusCode::NO_CONTENT.into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "inloggning krävs" })),
        )
            .into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadRequest {
    filename: String,
}

/// Acknowledge an upload and tag it with a guessed content type. Storage is
/// local MVP storage behind an opaque url; no content inspection happens here.
pub(crate) async fn upload_endpoint(Json(request): Json<UploadRequest>) -> Response {
    let filename = request.filename.trim();
    if filename.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Ingen fil mottagen" })),
        )
            .into_response();
    }

    let content_type = mime_guess::from_path(filename)
        .first_or_octet_stream()
        .to_string();
    let payload = json!({
        "message": "Fil uppladdad (lokal MVP-lagring)",
        "filename": filename,
        "url": format!("/uploads/{filename}"),
        "content_type": content_type,
    });
    (StatusCode::OK, Json(payload)).into_response()
}
