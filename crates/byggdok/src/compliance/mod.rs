//! Document compliance analysis: per-type classification and gap aggregation.
//!
//! Everything in this module is pure and clock-free; the reference year is an
//! explicit input so evaluations stay deterministic and testable.

pub mod domain;
mod engine;
mod policy;

pub use domain::{
    Building, BuildingId, Document, DocumentId, DocumentStatus, DocumentType, GapFinding,
    GapSeverity, TenantId,
};
pub use engine::{ComplianceEngine, ConfigurationError};
pub use policy::{CompliancePolicy, RequiredDocumentTypes};
