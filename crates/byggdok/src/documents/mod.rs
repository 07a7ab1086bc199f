//! Document CRUD plumbing around the compliance core: the storage seam, the
//! service facade, the HTTP router, and register import.

mod import;
mod router;
mod service;
pub mod store;
pub mod views;

#[cfg(test)]
mod tests;

pub use import::{DocumentRegisterImporter, RegisterImportError};
pub use router::{document_router, CurrentTenant};
pub use service::{BuildingDocumentService, DocumentServiceError};
pub use store::{DocumentFilter, DocumentStore, NewDocument, StoreError};
