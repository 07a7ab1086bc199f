use serde::{Deserialize, Serialize};

use crate::compliance::{
    Building, BuildingId, Document, DocumentId, DocumentStatus, DocumentType, TenantId,
};

/// Filters applied to the document list view. Gap analysis never sees these;
/// it always runs on the full per-type lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    pub document_type: Option<DocumentType>,
    pub status: Option<DocumentStatus>,
    pub year: Option<i32>,
}

impl DocumentFilter {
    pub fn matches(&self, document: &Document) -> bool {
        if let Some(document_type) = &self.document_type {
            if &document.document_type != document_type {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if &document.status != status {
                return false;
            }
        }
        if let Some(year) = self.year {
            if document.year != year {
                return false;
            }
        }
        true
    }
}

/// Payload for inserting a document record. The ingestion timestamp is
/// assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDocument {
    pub building_id: BuildingId,
    pub filename: String,
    pub document_type: DocumentType,
    pub status: DocumentStatus,
    pub year: i32,
    pub file_url: String,
}

/// Storage abstraction the document service runs against.
///
/// Tenant scoping is enforced at this seam: building and document lookups
/// take the calling tenant and answer `None` for rows owned by other tenants.
pub trait DocumentStore: Send + Sync {
    /// Tenant's buildings sorted by name, optionally narrowed by a name or
    /// address search.
    fn list_buildings(
        &self,
        tenant: TenantId,
        search: Option<&str>,
    ) -> Result<Vec<Building>, StoreError>;

    fn fetch_building(
        &self,
        tenant: TenantId,
        building: BuildingId,
    ) -> Result<Option<Building>, StoreError>;

    /// Filtered list view, sorted by document type then year descending.
    fn documents_for_building(
        &self,
        building: BuildingId,
        filter: &DocumentFilter,
    ) -> Result<Vec<Document>, StoreError>;

    /// Full per-type list, year descending. Answers an empty list, never an
    /// error, when no documents of the type exist.
    fn documents_by_building_and_type(
        &self,
        building: BuildingId,
        document_type: &DocumentType,
    ) -> Result<Vec<Document>, StoreError>;

    /// Document joined with its owning building, tenant-scoped.
    fn fetch_document(
        &self,
        tenant: TenantId,
        document: DocumentId,
    ) -> Result<Option<(Document, Building)>, StoreError>;

    fn insert_document(&self, document: NewDocument) -> Result<Document, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("referenced record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
