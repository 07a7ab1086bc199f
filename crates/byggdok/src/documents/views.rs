use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::store::DocumentFilter;
use crate::compliance::{
    Building, BuildingId, Document, DocumentId, DocumentStatus, DocumentType, GapFinding,
    GapSeverity, RequiredDocumentTypes,
};

/// Building row for list views.
#[derive(Debug, Clone, Serialize)]
pub struct BuildingView {
    pub id: BuildingId,
    pub name: String,
    pub address: String,
}

impl From<Building> for BuildingView {
    fn from(building: Building) -> Self {
        Self {
            id: building.id,
            name: building.name,
            address: building.address,
        }
    }
}

/// Document row decorated with its display label.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentView {
    pub id: DocumentId,
    pub filename: String,
    pub document_type: DocumentType,
    pub status: DocumentStatus,
    pub status_label: String,
    pub year: i32,
    pub uploaded_at: DateTime<Utc>,
    pub file_url: String,
}

impl From<Document> for DocumentView {
    fn from(document: Document) -> Self {
        let status_label = document.status.display_label();
        Self {
            id: document.id,
            filename: document.filename,
            document_type: document.document_type,
            status: document.status,
            status_label,
            year: document.year,
            uploaded_at: document.uploaded_at,
            file_url: document.file_url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GapFindingView {
    pub document_type: DocumentType,
    pub severity: GapSeverity,
    pub severity_label: &'static str,
    pub message: String,
}

impl From<GapFinding> for GapFindingView {
    fn from(finding: GapFinding) -> Self {
        Self {
            document_type: finding.document_type,
            severity: finding.severity,
            severity_label: finding.severity.label(),
            message: finding.message,
        }
    }
}

/// Per-type document grouping in the canonical required order.
#[derive(Debug, Clone, Serialize)]
pub struct TypeDocumentsView {
    pub document_type: DocumentType,
    pub documents: Vec<DocumentView>,
}

/// Echo of the filters applied to the list view.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentFilterView {
    pub document_type: Option<DocumentType>,
    pub status: Option<DocumentStatus>,
    pub year: Option<i32>,
}

impl From<&DocumentFilter> for DocumentFilterView {
    fn from(filter: &DocumentFilter) -> Self {
        Self {
            document_type: filter.document_type.clone(),
            status: filter.status.clone(),
            year: filter.year,
        }
    }
}

/// Full building page payload: the filtered document view plus the gap report
/// computed from the unfiltered per-type lists.
#[derive(Debug, Clone, Serialize)]
pub struct BuildingOverview {
    pub building: BuildingView,
    pub reference_year: i32,
    pub filters: DocumentFilterView,
    pub documents: Vec<DocumentView>,
    pub documents_by_type: Vec<TypeDocumentsView>,
    pub gaps: Vec<GapFindingView>,
}

impl BuildingOverview {
    pub(crate) fn assemble(
        building: Building,
        reference_year: i32,
        filter: &DocumentFilter,
        documents: Vec<Document>,
        required: &RequiredDocumentTypes,
        mut documents_by_type: HashMap<DocumentType, Vec<Document>>,
        gaps: Vec<GapFinding>,
    ) -> Self {
        let grouped = required
            .iter()
            .map(|document_type| TypeDocumentsView {
                document_type: document_type.clone(),
                documents: documents_by_type
                    .remove(document_type)
                    .unwrap_or_default()
                    .into_iter()
                    .map(DocumentView::from)
                    .collect(),
            })
            .collect();

        Self {
            building: building.into(),
            reference_year,
            filters: filter.into(),
            documents: documents.into_iter().map(DocumentView::from).collect(),
            documents_by_type: grouped,
            gaps: gaps.into_iter().map(GapFindingView::from).collect(),
        }
    }
}

/// Document detail joined with its building.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentDetailView {
    pub document: DocumentView,
    pub building_id: BuildingId,
    pub building_name: String,
}
