use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for stored documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub u64);

/// Identifier wrapper for buildings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingId(pub u64);

/// Identifier wrapper for tenant organizations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub u64);

/// Open tag identifying a compliance document category.
///
/// The well-known categories (drawings, ventilation inspections, fire-safety
/// certificates, service records) are configuration rather than code: new
/// categories are introduced by extending the injected required-type set, and
/// this tag intentionally accepts any value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentType(String);

impl DocumentType {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Uppercased form used in gap messages ("OVK saknas").
    pub fn heading(&self) -> String {
        self.0.to_uppercase()
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Validity status assigned by an operator at upload or edit time.
///
/// The status is independent input to gap analysis and is never derived from
/// recency. Values outside the known set are preserved as-is so records
/// written by newer services survive round-trips through this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    #[serde(rename = "gällande")]
    Current,
    #[serde(rename = "osäker")]
    Uncertain,
    #[serde(rename = "ersatt")]
    Superseded,
    #[serde(untagged)]
    Other(String),
}

impl DocumentStatus {
    /// Parse a stored status value; unknown values are preserved verbatim.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "gällande" => Self::Current,
            "osäker" => Self::Uncertain,
            "ersatt" => Self::Superseded,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    pub fn glyph(&self) -> Option<&'static str> {
        match self {
            Self::Current => Some("✅"),
            Self::Uncertain => Some("⚠️"),
            Self::Superseded => Some("❌"),
            Self::Other(_) => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Current => "Gällande",
            Self::Uncertain => "Osäker",
            Self::Superseded => "Ersatt",
            Self::Other(raw) => raw,
        }
    }

    /// Glyph-decorated label for display. Unknown statuses pass through
    /// unchanged.
    pub fn display_label(&self) -> String {
        match self.glyph() {
            Some(glyph) => format!("{} {}", glyph, self.label()),
            None => self.label().to_string(),
        }
    }
}

/// A stored compliance document attached to a building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    pub document_type: DocumentType,
    pub building_id: BuildingId,
    pub status: DocumentStatus,
    /// Effective year of the document (issue or inspection year), not the
    /// upload time.
    pub year: i32,
    /// Ingestion timestamp, informational only.
    pub uploaded_at: DateTime<Utc>,
    pub file_url: String,
}

/// A building owned by a tenant organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub name: String,
    pub address: String,
    pub tenant_id: TenantId,
}

/// Severity classes for documentation gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapSeverity {
    Missing,
    Stale,
    Uncertain,
}

impl GapSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Missing => "Saknas",
            Self::Stale => "Föråldrad",
            Self::Uncertain => "Osäker",
        }
    }
}

/// A computed statement that a building's documentation for one type is
/// missing, stale, or ambiguous. Never persisted; recomputed on every
/// evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapFinding {
    pub document_type: DocumentType,
    pub severity: GapSeverity,
    pub message: String,
}

impl GapFinding {
    pub(crate) fn missing(document_type: &DocumentType) -> Self {
        Self {
            message: format!("{} saknas", document_type.heading()),
            document_type: document_type.clone(),
            severity: GapSeverity::Missing,
        }
    }

    pub(crate) fn stale(document_type: &DocumentType, window_years: i32) -> Self {
        Self {
            message: format!(
                "Senaste {} är äldre än {} år",
                document_type.heading(),
                window_years
            ),
            document_type: document_type.clone(),
            severity: GapSeverity::Stale,
        }
    }

    pub(crate) fn uncertain(document_type: &DocumentType) -> Self {
        Self {
            message: format!(
                "Flera {} – osäkert vilken som gäller",
                document_type.heading()
            ),
            document_type: document_type.clone(),
            severity: GapSeverity::Uncertain,
        }
    }
}
