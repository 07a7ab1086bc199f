use crate::cli::ServeArgs;
use crate::demo;
use crate::infra::{AppState, InMemoryDocumentStore, SessionManager};
use crate::routes::app_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use byggdok::compliance::{ComplianceEngine, CompliancePolicy, RequiredDocumentTypes};
use byggdok::config::AppConfig;
use byggdok::documents::{BuildingDocumentService, DocumentServiceError};
use byggdok::error::AppError;
use byggdok::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        sessions: Arc::new(SessionManager::default()),
        auth: config.auth.clone(),
    };

    // The MVP store starts from the seeded portfolio.
    let store = Arc::new(InMemoryDocumentStore::default());
    demo::seed_demo_portfolio(&store).map_err(DocumentServiceError::from)?;

    let required_types = RequiredDocumentTypes::from(&config.compliance);
    let engine = ComplianceEngine::new(CompliancePolicy::from(&config.compliance));
    let service = Arc::new(BuildingDocumentService::new(store, required_types, engine));

    let app = app_router(service, app_state.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "document compliance service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
