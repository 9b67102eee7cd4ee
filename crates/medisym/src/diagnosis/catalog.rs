use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const EMBEDDED_CATALOG: &str = include_str!("../../data/diseases.json");

/// Stable identifier of a disease record.
pub type DiseaseId = u32;

/// Severity label displayed next to a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "légère")]
    Mild,
    #[serde(rename = "modérée")]
    Moderate,
    #[serde(rename = "grave")]
    Severe,
    #[serde(rename = "chronique")]
    Chronic,
    #[serde(rename = "urgence")]
    Emergency,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Mild => "légère",
            Severity::Moderate => "modérée",
            Severity::Severe => "grave",
            Severity::Chronic => "chronique",
            Severity::Emergency => "urgence",
        }
    }
}

/// Immutable disease record. Only the four term lists feed scoring; the
/// remaining fields are carried through for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseProfile {
    pub id: DiseaseId,
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub key_symptoms: Vec<String>,
    #[serde(default)]
    pub common_symptoms: Vec<String>,
    #[serde(default)]
    pub excludes: Vec<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub treatment: Vec<String>,
    #[serde(default)]
    pub prevention: Vec<String>,
    pub severity: Severity,
    #[serde(default)]
    pub color: String,
}

/// Compact catalog entry for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiseaseListing {
    pub id: DiseaseId,
    pub name: String,
    pub severity: Severity,
    pub color: String,
}

impl DiseaseProfile {
    pub fn listing(&self) -> DiseaseListing {
        DiseaseListing {
            id: self.id,
            name: self.name.clone(),
            severity: self.severity,
            color: self.color.clone(),
        }
    }
}

/// Read-only catalog of disease profiles, kept in definition order.
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeBase {
    diseases: Vec<DiseaseProfile>,
}

impl KnowledgeBase {
    /// Parses the catalog bundled with the crate.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_reader(EMBEDDED_CATALOG.as_bytes())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let diseases: Vec<DiseaseProfile> = serde_json::from_reader(reader)?;
        Self::from_profiles(diseases)
    }

    pub fn from_profiles(diseases: Vec<DiseaseProfile>) -> Result<Self, CatalogError> {
        if diseases.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(diseases.len());
        for disease in &diseases {
            if disease.name.trim().is_empty() {
                return Err(CatalogError::MissingName(disease.id));
            }
            if !seen.insert(disease.id) {
                return Err(CatalogError::DuplicateId(disease.id));
            }
        }

        Ok(Self { diseases })
    }

    pub fn get(&self, id: DiseaseId) -> Option<&DiseaseProfile> {
        self.diseases.iter().find(|disease| disease.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiseaseProfile> {
        self.diseases.iter()
    }

    pub fn listings(&self) -> Vec<DiseaseListing> {
        self.diseases.iter().map(DiseaseProfile::listing).collect()
    }

    pub fn len(&self) -> usize {
        self.diseases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }
}

/// Failure raised while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read disease catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid disease catalog data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("disease catalog contains no records")]
    Empty,
    #[error("disease id {0} is defined more than once")]
    DuplicateId(DiseaseId),
    #[error("disease id {0} has an empty name")]
    MissingName(DiseaseId),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: DiseaseId, name: &str) -> DiseaseProfile {
        DiseaseProfile {
            id,
            name: name.to_string(),
            keywords: Vec::new(),
            key_symptoms: Vec::new(),
            common_symptoms: Vec::new(),
            excludes: Vec::new(),
            symptoms: Vec::new(),
            description: String::new(),
            treatment: Vec::new(),
            prevention: Vec::new(),
            severity: Severity::Mild,
            color: String::new(),
        }
    }

    #[test]
    fn embedded_catalog_loads_in_definition_order() {
        let catalog = KnowledgeBase::embedded().expect("embedded catalog parses");
        assert_eq!(catalog.len(), 45);

        let first = catalog.iter().next().expect("catalog not empty");
        assert_eq!(first.id, 1);
        assert_eq!(first.name, "Grippe (Influenza)");
        assert_eq!(first.severity, Severity::Moderate);

        let malaria = catalog.get(2).expect("malaria present");
        assert_eq!(malaria.name, "Paludisme (Malaria)");
        assert!(malaria.key_symptoms.iter().any(|term| term == "moustique"));
        assert_eq!(malaria.excludes, vec!["toux", "nez", "gorge"]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = KnowledgeBase::from_profiles(vec![profile(4, "A"), profile(4, "B")])
            .expect_err("duplicate ids rejected");
        assert!(matches!(err, CatalogError::DuplicateId(4)));
    }

    #[test]
    fn rejects_blank_names_and_empty_catalogs() {
        let err = KnowledgeBase::from_profiles(vec![profile(1, "  ")]).expect_err("blank name");
        assert!(matches!(err, CatalogError::MissingName(1)));

        let err = KnowledgeBase::from_profiles(Vec::new()).expect_err("empty catalog");
        assert!(matches!(err, CatalogError::Empty));
    }

    #[test]
    fn term_lists_default_when_absent() {
        let raw = r#"[{"id": 9, "name": "Test", "severity": "urgence"}]"#;
        let catalog = KnowledgeBase::from_reader(raw.as_bytes()).expect("minimal record parses");
        let disease = catalog.get(9).expect("record present");
        assert!(disease.keywords.is_empty());
        assert_eq!(disease.severity.label(), "urgence");
    }

    #[test]
    fn unknown_severity_label_is_a_parse_error() {
        let raw = r#"[{"id": 9, "name": "Test", "severity": "bénigne"}]"#;
        let err = KnowledgeBase::from_reader(raw.as_bytes()).expect_err("bad severity");
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
