use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::store::NewDocument;
use crate::compliance::{BuildingId, DocumentStatus, DocumentType};

/// Error raised while reading a document register export.
#[derive(Debug, thiserror::Error)]
pub enum RegisterImportError {
    #[error("failed to read register export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid register CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("register row {line} has an empty '{field}' column")]
    EmptyField { line: u64, field: &'static str },
}

/// Parses document register exports (one building per file) into insertable
/// document rows.
pub struct DocumentRegisterImporter;

impl DocumentRegisterImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        building: BuildingId,
    ) -> Result<Vec<NewDocument>, RegisterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, building)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        building: BuildingId,
    ) -> Result<Vec<NewDocument>, RegisterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut rows = Vec::new();

        for (index, record) in csv_reader.deserialize::<RegisterRow>().enumerate() {
            let row = record?;
            // The header occupies line one.
            let line = index as u64 + 2;
            if row.filename.is_empty() {
                return Err(RegisterImportError::EmptyField {
                    line,
                    field: "Filnamn",
                });
            }
            if row.document_type.is_empty() {
                return Err(RegisterImportError::EmptyField {
                    line,
                    field: "Dokumenttyp",
                });
            }

            rows.push(NewDocument {
                building_id: building,
                document_type: DocumentType::new(&row.document_type),
                status: DocumentStatus::from_raw(&row.status),
                year: row.year,
                file_url: if row.file_url.is_empty() {
                    format!("/docs/{}", row.filename)
                } else {
                    row.file_url
                },
                filename: row.filename,
            });
        }

        Ok(rows)
    }
}

#[derive(Debug, Deserialize)]
struct RegisterRow {
    #[serde(rename = "Filnamn")]
    filename: String,
    #[serde(rename = "Dokumenttyp")]
    document_type: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "År")]
    year: i32,
    #[serde(rename = "Länk", default)]
    file_url: String,
}
