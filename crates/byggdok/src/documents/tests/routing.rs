use super::common::*;
use crate::documents::{document_router, CurrentTenant};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{Extension, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn build_router() -> Router {
    let (service, _) = build_service();
    document_router(Arc::new(service)).layer(Extension(CurrentTenant(TENANT)))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_vec(payload).expect("serialize payload"),
        ))
        .expect("request")
}

#[tokio::test]
async fn buildings_endpoint_lists_tenant_buildings_sorted_by_name() {
    let router = build_router();
    let response = router
        .oneshot(get("/api/v1/buildings"))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let buildings = payload.as_array().expect("array payload");
    assert_eq!(buildings.len(), 2);
    assert_eq!(
        buildings[0].get("name").and_then(Value::as_str),
        Some("Kontor Eken")
    );
}

#[tokio::test]
async fn buildings_endpoint_applies_search() {
    let router = build_router();
    let response = router
        .oneshot(get("/api/v1/buildings?search=skola"))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let buildings = payload.as_array().expect("array payload");
    assert_eq!(buildings.len(), 1);
    assert_eq!(
        buildings[0].get("name").and_then(Value::as_str),
        Some("Skola Björken")
    );
}

#[tokio::test]
async fn overview_endpoint_returns_gap_report() {
    let router = build_router();
    let response = router
        .oneshot(get("/api/v1/buildings/1?reference_year=2024"))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;

    let gaps = payload.get("gaps").and_then(Value::as_array).expect("gaps");
    assert_eq!(gaps.len(), 1);
    assert_eq!(gaps[0].get("severity"), Some(&json!("uncertain")));
    assert_eq!(gaps[0].get("severity_label"), Some(&json!("Osäker")));
    assert_eq!(
        gaps[0].get("message").and_then(Value::as_str),
        Some("Flera BRANDSKYDD – osäkert vilken som gäller")
    );

    let groups = payload
        .get("documents_by_type")
        .and_then(Value::as_array)
        .expect("groups");
    let order: Vec<&str> = groups
        .iter()
        .filter_map(|group| group.get("document_type").and_then(Value::as_str))
        .collect();
    assert_eq!(order, vec!["ritning", "OVK", "brandskydd", "service"]);
}

#[tokio::test]
async fn overview_endpoint_applies_view_filters() {
    let router = build_router();
    let response = router
        .oneshot(get(
            "/api/v1/buildings/1?type=OVK&status=g%C3%A4llande&reference_year=2024",
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;

    let documents = payload
        .get("documents")
        .and_then(Value::as_array)
        .expect("documents");
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].get("year"), Some(&json!(2020)));
    assert_eq!(
        documents[0].get("status_label").and_then(Value::as_str),
        Some("✅ Gällande")
    );

    // Filters narrow the view only; the gap report is unchanged.
    let gaps = payload.get("gaps").and_then(Value::as_array).expect("gaps");
    assert_eq!(gaps.len(), 1);
}

#[tokio::test]
async fn missing_building_answers_404_in_swedish() {
    let router = build_router();
    let response = router
        .oneshot(get("/api/v1/buildings/99"))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("error"), Some(&json!("Byggnaden hittades inte")));
}

#[tokio::test]
async fn missing_document_answers_404_in_swedish() {
    let router = build_router();
    let response = router
        .oneshot(get("/api/v1/documents/999"))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("error"),
        Some(&json!("Dokumentet hittades inte"))
    );
}

#[tokio::test]
async fn document_detail_endpoint_includes_building_name() {
    let router = build_router();
    let response = router
        .oneshot(get("/api/v1/documents/1"))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("building_name").and_then(Value::as_str),
        Some("Skola Björken")
    );
    assert!(payload
        .get("document")
        .and_then(|document| document.get("status_label"))
        .is_some());
}

#[tokio::test]
async fn create_document_endpoint_answers_created() {
    let router = build_router();
    let payload = json!({
        "filename": "ovk-eken-2024.pdf",
        "document_type": "OVK",
        "status": "gällande",
        "year": 2024,
    });

    let response = router
        .oneshot(post_json("/api/v1/buildings/2/documents", &payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert!(body.get("id").is_some());
    assert_eq!(body.get("file_url"), Some(&json!("/docs/ovk-eken-2024.pdf")));
}

#[tokio::test]
async fn import_endpoint_accepts_register_csv() {
    let router = build_router();
    let payload = json!({
        "csv": "Filnamn,Dokumenttyp,Status,År,Länk\n\
                service-eken-2024.pdf,service,gällande,2024,/docs/service-eken-2024.pdf\n",
    });

    let response = router
        .oneshot(post_json("/api/v1/buildings/2/documents/import", &payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body.get("imported"), Some(&json!(1)));
}

#[tokio::test]
async fn malformed_register_csv_answers_unprocessable() {
    let router = build_router();
    let payload = json!({
        "csv": "Filnamn,Dokumenttyp,Status,År,Länk\nservice.pdf,service,gällande,tjugo,\n",
    });

    let response = router
        .oneshot(post_json("/api/v1/buildings/2/documents/import", &payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn requests_without_tenant_identity_are_rejected() {
    let (service, _) = build_service();
    let router = document_router(Arc::new(service));

    let response = router
        .oneshot(get("/api/v1/buildings"))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("error"), Some(&json!("inloggning krävs")));
}
