use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use byggdok::compliance::{
    Building, BuildingId, Document, DocumentId, DocumentType, TenantId,
};
use byggdok::config::AuthConfig;
use byggdok::documents::{DocumentFilter, DocumentStore, NewDocument, StoreError};
use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) sessions: Arc<SessionManager>,
    pub(crate) auth: AuthConfig,
}

/// Demo-grade bearer sessions backing the login flow.
#[derive(Default)]
pub(crate) struct SessionManager {
    sessions: Mutex<HashMap<String, TenantId>>,
    sequence: AtomicU64,
}

impl SessionManager {
    pub(crate) fn issue(&self, tenant: TenantId) -> String {
        let serial = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let stamp = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let token = format!("session-{serial:06}-{stamp:x}");
        self.sessions
            .lock()
            .expect("session mutex poisoned")
            .insert(token.clone(), tenant);
        token
    }

    pub(crate) fn resolve(&self, token: &str) -> Option<TenantId> {
        self.sessions
            .lock()
            .expect("session mutex poisoned")
            .get(token)
            .copied()
    }

    pub(crate) fn revoke(&self, token: &str) -> bool {
        self.sessions
            .lock()
            .expect("session mutex poisoned")
            .remove(token)
            .is_some()
    }
}

/// Volatile store backing the MVP deployment; rows live for the process
/// lifetime only.
#[derive(Default)]
pub(crate) struct InMemoryDocumentStore {
    buildings: Mutex<Vec<Building>>,
    documents: Mutex<Vec<Document>>,
    document_sequence: AtomicU64,
}

impl InMemoryDocumentStore {
    pub(crate) fn insert_building(&self, building: Building) {
        self.buildings
            .lock()
            .expect("building mutex poisoned")
            .push(building);
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn list_buildings(
        &self,
        tenant: TenantId,
        search: Option<&str>,
    ) -> Result<Vec<Building>, StoreError> {
        let buildings = self.buildings.lock().expect("building mutex poisoned");
        let needle = search.map(str::to_lowercase);
        let mut rows: Vec<Building> = buildings
            .iter()
            .filter(|building| building.tenant_id == tenant)
            .filter(|building| match &needle {
                Some(needle) => {
                    building.name.to_lowercase().contains(needle)
                        || building.address.to_lowercase().contains(needle)
                }
                None => true,
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    fn fetch_building(
        &self,
        tenant: TenantId,
        building: BuildingId,
    ) -> Result<Option<Building>, StoreError> {
        let buildings = self.buildings.lock().expect("building mutex poisoned");
        Ok(buildings
            .iter()
            .find(|row| row.id == building && row.tenant_id == tenant)
            .cloned())
    }

    fn documents_for_building(
        &self,
        building: BuildingId,
        filter: &DocumentFilter,
    ) -> Result<Vec<Document>, StoreError> {
        let documents = self.documents.lock().expect("document mutex poisoned");
        let mut rows: Vec<Document> = documents
            .iter()
            .filter(|document| document.building_id == building)
            .filter(|document| filter.matches(document))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            a.document_type
                .cmp(&b.document_type)
                .then(b.year.cmp(&a.year))
        });
        Ok(rows)
    }

    fn documents_by_building_and_type(
        &self,
        building: BuildingId,
        document_type: &DocumentType,
    ) -> Result<Vec<Document>, StoreError> {
        let documents = self.documents.lock().expect("document mutex poisoned");
        let mut rows: Vec<Document> = documents
            .iter()
            .filter(|document| {
                document.building_id == building && &document.document_type == document_type
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.year.cmp(&a.year));
        Ok(rows)
    }

    fn fetch_document(
        &self,
        tenant: TenantId,
        document: DocumentId,
    ) -> Result<Option<(Document, Building)>, StoreError> {
        let documents = self.documents.lock().expect("document mutex poisoned");
        let Some(row) = documents.iter().find(|row| row.id == document).cloned() else {
            return Ok(None);
        };

        let buildings = self.buildings.lock().expect("building mutex poisoned");
        let building = buildings
            .iter()
            .find(|building| building.id == row.building_id && building.tenant_id == tenant)
            .cloned();
        Ok(building.map(|building| (row, building)))
    }

    fn insert_document(&self, document: NewDocument) -> Result<Document, StoreError> {
        {
            let buildings = self.buildings.lock().expect("building mutex poisoned");
            if !buildings
                .iter()
                .any(|building| building.id == document.building_id)
            {
                return Err(StoreError::NotFound);
            }
        }

        let id = DocumentId(self.document_sequence.fetch_add(1, Ordering::Relaxed) + 1);
        let stored = Document {
            id,
            filename: document.filename,
            document_type: document.document_type,
            building_id: document.building_id,
            status: document.status,
            year: document.year,
            uploaded_at: Utc::now(),
            file_url: document.file_url,
        };
        self.documents
            .lock()
            .expect("document mutex poisoned")
            .push(stored.clone());
        Ok(stored)
    }
}
