//! Symptom matching engine: normalization, graded term matching, weighted
//! scoring with exclusion penalties, and confidence ranking.

pub mod catalog;
pub mod consultation;
pub mod matcher;
pub mod normalizer;
pub(crate) mod ranking;
pub mod router;
pub(crate) mod scoring;
pub mod similarity;

pub use catalog::{
    CatalogError, DiseaseId, DiseaseListing, DiseaseProfile, KnowledgeBase, Severity,
};
pub use consultation::{
    ConsultationError, ConsultationOutcome, ConsultationPolicy, ConsultationReport,
    ConsultationRequest, ConsultationService, ConsultationSummary,
};
pub use matcher::partial_match;
pub use normalizer::{normalize_symptoms, SynonymRule, SYNONYMS};
pub use router::diagnosis_router;

use ranking::rank_candidates;
use scoring::score_profile;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_TOP_N: usize = 3;

/// Stateless matcher over a shared, read-only knowledge base.
#[derive(Debug, Clone)]
pub struct DiagnosisEngine {
    catalog: Arc<KnowledgeBase>,
}

impl DiagnosisEngine {
    pub fn new(catalog: Arc<KnowledgeBase>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &KnowledgeBase {
        &self.catalog
    }

    /// Ranks the diseases whose terms appear in `symptom_text`, best first,
    /// keeping at most `top_n`. An empty result means no confident match.
    pub fn find_diseases(&self, symptom_text: &str, top_n: usize) -> Vec<MatchResult> {
        let normalized = normalize_symptoms(symptom_text);

        let candidates: Vec<_> = self
            .catalog
            .iter()
            .filter_map(|disease| score_profile(disease, &normalized))
            .collect();
        let survivors = candidates.len();

        let results = rank_candidates(candidates, top_n);
        debug!(
            diseases = self.catalog.len(),
            survivors,
            returned = results.len(),
            "scored symptom text"
        );
        results
    }

    pub fn find_diseases_default(&self, symptom_text: &str) -> Vec<MatchResult> {
        self.find_diseases(symptom_text, DEFAULT_TOP_N)
    }
}

/// Ranked suggestion returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub disease: DiseaseProfile,
    /// Weighted score after exclusion penalties, rounded to two decimals.
    pub score: f64,
    /// Display confidence in `[15, 92]`, relative to the best result.
    pub confidence: u8,
    /// Per-disease confidence used to filter weak candidates.
    #[serde(skip_serializing)]
    pub provisional_confidence: u8,
    pub key_ratio: f64,
    pub matched_keywords: Vec<String>,
    pub matched_key_symptoms: Vec<String>,
}
