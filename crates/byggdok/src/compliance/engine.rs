use std::collections::HashMap;

use super::domain::{Document, DocumentStatus, DocumentType, GapFinding};
use super::policy::{CompliancePolicy, RequiredDocumentTypes};

/// Raised when the aggregation input does not cover the configured required
/// types. This is a caller bug, not a runtime condition, and a type is never
/// silently skipped.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("aggregation input is missing an entry for required document type '{document_type}'")]
    MissingTypeEntry { document_type: DocumentType },
}

/// Classifies the documentation state per document type and aggregates gap
/// findings across a building's required types.
#[derive(Debug, Clone, Default)]
pub struct ComplianceEngine {
    policy: CompliancePolicy,
}

impl ComplianceEngine {
    pub fn new(policy: CompliancePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &CompliancePolicy {
        &self.policy
    }

    /// Classify the documentation state for one document type.
    ///
    /// The input must be the full list of documents of that type for the
    /// building, regardless of any active view filters. Returns zero, one, or
    /// two findings: an empty list short-circuits to a single missing finding,
    /// otherwise staleness and uncertainty are judged independently and can
    /// both fire for the same type.
    pub fn evaluate(
        &self,
        document_type: &DocumentType,
        documents: &[Document],
        reference_year: i32,
    ) -> Vec<GapFinding> {
        let Some(latest) = latest_by_year(documents) else {
            return vec![GapFinding::missing(document_type)];
        };

        let mut findings = Vec::new();

        let window = self.policy.validity_window_years();
        if reference_year - latest.year >= window {
            findings.push(GapFinding::stale(document_type, window));
        }

        let uncertain = documents
            .iter()
            .any(|document| document.status == DocumentStatus::Uncertain);
        if uncertain && documents.len() > 1 {
            findings.push(GapFinding::uncertain(document_type));
        }

        findings
    }

    /// Run the classification across every required type, flattening findings
    /// while preserving the configured type order. Every required type must
    /// have an entry (possibly an empty list) in the input mapping.
    pub fn aggregate(
        &self,
        required: &RequiredDocumentTypes,
        documents_by_type: &HashMap<DocumentType, Vec<Document>>,
        reference_year: i32,
    ) -> Result<Vec<GapFinding>, ConfigurationError> {
        let mut findings = Vec::new();
        for document_type in required.iter() {
            let documents = documents_by_type.get(document_type).ok_or_else(|| {
                ConfigurationError::MissingTypeEntry {
                    document_type: document_type.clone(),
                }
            })?;
            findings.extend(self.evaluate(document_type, documents, reference_year));
        }
        Ok(findings)
    }
}

/// Ties on the maximum year keep the first document in input order.
fn latest_by_year(documents: &[Document]) -> Option<&Document> {
    let mut iter = documents.iter();
    let first = iter.next()?;
    Some(iter.fold(first, |latest, document| {
        if document.year > latest.year {
            document
        } else {
            latest
        }
    }))
}
