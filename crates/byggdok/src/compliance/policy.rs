use super::domain::DocumentType;
use crate::config::ComplianceConfig;

const DEFAULT_VALIDITY_WINDOW_YEARS: i32 = 5;

/// Policy dial backing gap analysis: how old the newest document of a type
/// may be before the type counts as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompliancePolicy {
    validity_window_years: i32,
}

impl CompliancePolicy {
    pub fn new(validity_window_years: i32) -> Self {
        let sanitized = if validity_window_years > 0 {
            validity_window_years
        } else {
            DEFAULT_VALIDITY_WINDOW_YEARS
        };

        Self {
            validity_window_years: sanitized,
        }
    }

    pub fn validity_window_years(&self) -> i32 {
        self.validity_window_years
    }
}

impl Default for CompliancePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_VALIDITY_WINDOW_YEARS)
    }
}

impl From<&ComplianceConfig> for CompliancePolicy {
    fn from(config: &ComplianceConfig) -> Self {
        Self::new(config.validity_window_years)
    }
}

/// Ordered set of document types every building is expected to carry.
///
/// The canonical display order is the insertion order of the configuration;
/// aggregated gap reports follow it. The set is injected data, never a
/// hardcoded engine constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredDocumentTypes(Vec<DocumentType>);

impl RequiredDocumentTypes {
    /// The register categories of the standard property portfolio.
    pub fn standard() -> Self {
        Self::from_keys(["ritning", "OVK", "brandskydd", "service"])
    }

    /// Build from raw keys, preserving first-seen order and dropping blanks
    /// and duplicates.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut types: Vec<DocumentType> = Vec::new();
        for key in keys {
            let key = key.as_ref().trim();
            if key.is_empty() {
                continue;
            }
            let document_type = DocumentType::new(key);
            if !types.contains(&document_type) {
                types.push(document_type);
            }
        }
        Self(types)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocumentType> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, document_type: &DocumentType) -> bool {
        self.0.contains(document_type)
    }
}

impl From<&ComplianceConfig> for RequiredDocumentTypes {
    fn from(config: &ComplianceConfig) -> Self {
        Self::from_keys(&config.required_document_types)
    }
}
