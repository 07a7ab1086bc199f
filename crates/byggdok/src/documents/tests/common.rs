use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::compliance::{
    Building, BuildingId, ComplianceEngine, CompliancePolicy, Document, DocumentId,
    DocumentStatus, DocumentType, RequiredDocumentTypes, TenantId,
};
use crate::documents::store::{DocumentFilter, DocumentStore, NewDocument, StoreError};
use crate::documents::BuildingDocumentService;

pub(super) const TENANT: TenantId = TenantId(1);
pub(super) const OTHER_TENANT: TenantId = TenantId(2);
pub(super) const SCHOOL: BuildingId = BuildingId(1);
pub(super) const EMPTY_BUILDING: BuildingId = BuildingId(2);
pub(super) const FOREIGN_BUILDING: BuildingId = BuildingId(3);

#[derive(Default)]
pub(super) struct MemoryStore {
    buildings: Mutex<Vec<Building>>,
    documents: Mutex<Vec<Document>>,
    sequence: AtomicU64,
}

impl MemoryStore {
    pub(super) fn insert_building(&self, building: Building) {
        self.buildings
            .lock()
            .expect("building mutex poisoned")
            .push(building);
    }
}

impl DocumentStore for MemoryStore {
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

        let id = DocumentId(self.sequence.fetch_add(1, Ordering::Relaxed) + 1);
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

fn seed_document(store: &MemoryStore, building: BuildingId, tag: &str, year: i32, status: &str) {
    let filename = format!("{tag}-{year}.pdf");
    store
        .insert_document(NewDocument {
            building_id: building,
            document_type: DocumentType::new(tag),
            status: DocumentStatus::from_raw(status),
            year,
            file_url: format!("/docs/{filename}"),
            filename,
        })
        .expect("seed insert succeeds");
}

/// School portfolio: complete except for one ambiguous fire-safety pair.
pub(super) fn seeded_store() -> Arc<MemoryStore> {
    let store = MemoryStore::default();
    store.insert_building(Building {
        id: SCHOOL,
        name: "Skola Björken".to_string(),
        address: "Björkgatan 12, Göteborg".to_string(),
        tenant_id: TENANT,
    });
    store.insert_building(Building {
        id: EMPTY_BUILDING,
        name: "Kontor Eken".to_string(),
        address: "Ekallén 4, Göteborg".to_string(),
        tenant_id: TENANT,
    });
    store.insert_building(Building {
        id: FOREIGN_BUILDING,
        name: "Bostäder Lönnen".to_string(),
        address: "Lönnvägen 9, Göteborg".to_string(),
        tenant_id: OTHER_TENANT,
    });

    for (tag, year, status) in [
        ("ritning", 2016, "ersatt"),
        ("ritning", 2018, "ersatt"),
        ("ritning", 2021, "gällande"),
        ("OVK", 2014, "ersatt"),
        ("OVK", 2017, "ersatt"),
        ("OVK", 2020, "gällande"),
        ("brandskydd", 2019, "osäker"),
        ("brandskydd", 2021, "gällande"),
        ("service", 2019, "ersatt"),
        ("service", 2022, "gällande"),
    ] {
        seed_document(&store, SCHOOL, tag, year, status);
    }

    Arc::new(store)
}

pub(super) fn build_service() -> (BuildingDocumentService<MemoryStore>, Arc<MemoryStore>) {
    let store = seeded_store();
    let service = BuildingDocumentService::new(
        store.clone(),
        RequiredDocumentTypes::standard(),
        ComplianceEngine::new(CompliancePolicy::default()),
    );
    (service, store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
