use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

use tracing::debug;

use super::import::{DocumentRegisterImporter, RegisterImportError};
use super::store::{DocumentFilter, DocumentStore, NewDocument, StoreError};
use super::views::{BuildingOverview, BuildingView, DocumentDetailView, DocumentView};
use crate::compliance::{
    BuildingId, ComplianceEngine, ConfigurationError, DocumentId, RequiredDocumentTypes, TenantId,
};

/// Service composing the document store, the required-type configuration, and
/// the compliance engine.
pub struct BuildingDocumentService<S> {
    store: Arc<S>,
    required_types: RequiredDocumentTypes,
    engine: ComplianceEngine,
}

impl<S> BuildingDocumentService<S>
where
    S: DocumentStore + 'static,
{
    pub fn new(store: Arc<S>, required_types: RequiredDocumentTypes, engine: ComplianceEngine) -> Self {
        Self {
            store,
            required_types,
            engine,
        }
    }

    pub fn required_types(&self) -> &RequiredDocumentTypes {
        &self.required_types
    }

    pub fn list_buildings(
        &self,
        tenant: TenantId,
        search: Option<&str>,
    ) -> Result<Vec<BuildingView>, DocumentServiceError> {
        let buildings = self.store.list_buildings(tenant, search)?;
        Ok(buildings.into_iter().map(BuildingView::from).collect())
    }

    /// Assemble the building page payload: the filtered document view plus a
    /// gap report computed over the full per-type lists. Filters shape only
    /// the view; the gap analysis always sees every document.
    pub fn building_overview(
        &self,
        tenant: TenantId,
        building: BuildingId,
        filter: &DocumentFilter,
        reference_year: i32,
    ) -> Result<BuildingOverview, DocumentServiceError> {
        let building = self
            .store
            .fetch_building(tenant, building)?
            .ok_or(DocumentServiceError::BuildingNotFound)?;

        let documents = self.store.documents_for_building(building.id, filter)?;

        let mut documents_by_type = HashMap::with_capacity(self.required_types.len());
        for document_type in self.required_types.iter() {
            let complete = self
                .store
                .documents_by_building_and_type(building.id, document_type)?;
            documents_by_type.insert(document_type.clone(), complete);
        }

        let gaps = self
            .engine
            .aggregate(&self.required_types, &documents_by_type, reference_year)?;
        debug!(
            building = building.id.0,
            gap_count = gaps.len(),
            reference_year,
            "gap report computed"
        );

        Ok(BuildingOverview::assemble(
            building,
            reference_year,
            filter,
            documents,
            &self.required_types,
            documents_by_type,
            gaps,
        ))
    }

    pub fn document_detail(
        &self,
        tenant: TenantId,
        document: DocumentId,
    ) -> Result<DocumentDetailView, DocumentServiceError> {
        let (document, building) = self
            .store
            .fetch_document(tenant, document)?
            .ok_or(DocumentServiceError::DocumentNotFound)?;

        Ok(DocumentDetailView {
            document: document.into(),
            building_id: building.id,
            building_name: building.name,
        })
    }

    /// Insert a document record after checking the building belongs to the
    /// calling tenant.
    pub fn add_document(
        &self,
        tenant: TenantId,
        document: NewDocument,
    ) -> Result<DocumentView, DocumentServiceError> {
        self.store
            .fetch_building(tenant, document.building_id)?
            .ok_or(DocumentServiceError::BuildingNotFound)?;

        let stored = self.store.insert_document(document)?;
        Ok(stored.into())
    }

    /// Bulk-insert documents from a register export.
    pub fn import_register<R: Read>(
        &self,
        tenant: TenantId,
        building: BuildingId,
        reader: R,
    ) -> Result<Vec<DocumentView>, DocumentServiceError> {
        self.store
            .fetch_building(tenant, building)?
            .ok_or(DocumentServiceError::BuildingNotFound)?;

        let rows = DocumentRegisterImporter::from_reader(reader, building)?;
        let mut imported = Vec::with_capacity(rows.len());
        for row in rows {
            imported.push(self.store.insert_document(row)?.into());
        }
        Ok(imported)
    }
}

/// Error raised by the document service.
#[derive(Debug, thiserror::Error)]
pub enum DocumentServiceError {
    #[error("building not found")]
    BuildingNotFound,
    #[error("document not found")]
    DocumentNotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Import(#[from] RegisterImportError),
}
