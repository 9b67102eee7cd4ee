use serde::{Deserialize, Serialize};

use super::catalog::{DiseaseId, Severity};
use super::{DiagnosisEngine, MatchResult, DEFAULT_TOP_N};

/// Limits applied to incoming consultations before the engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsultationPolicy {
    pub default_top_n: usize,
    pub max_top_n: usize,
    pub min_symptom_chars: usize,
}

impl Default for ConsultationPolicy {
    fn default() -> Self {
        Self {
            default_top_n: DEFAULT_TOP_N,
            max_top_n: 10,
            min_symptom_chars: 10,
        }
    }
}

/// Free-text symptom description submitted by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationRequest {
    pub symptoms: String,
    #[serde(default)]
    pub top_n: Option<usize>,
}

impl ConsultationRequest {
    pub fn new(symptoms: impl Into<String>) -> Self {
        Self {
            symptoms: symptoms.into(),
            top_n: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationOutcome {
    Suggested,
    NoMatch,
}

/// Engine output for one consultation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsultationReport {
    pub symptoms: String,
    pub outcome: ConsultationOutcome,
    pub results: Vec<MatchResult>,
}

impl ConsultationReport {
    /// Projection callers persist as consultation history.
    pub fn summary(&self) -> Vec<ConsultationSummary> {
        self.results
            .iter()
            .map(|result| ConsultationSummary {
                disease_id: result.disease.id,
                name: result.disease.name.clone(),
                confidence: result.confidence,
                severity: result.disease.severity,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationSummary {
    pub disease_id: DiseaseId,
    pub name: String,
    pub confidence: u8,
    pub severity: Severity,
}

/// Validates consultations and runs them through the engine.
#[derive(Debug, Clone)]
pub struct ConsultationService {
    engine: DiagnosisEngine,
    policy: ConsultationPolicy,
}

impl ConsultationService {
    pub fn new(engine: DiagnosisEngine, policy: ConsultationPolicy) -> Self {
        Self { engine, policy }
    }

    pub fn engine(&self) -> &DiagnosisEngine {
        &self.engine
    }

    pub fn policy(&self) -> ConsultationPolicy {
        self.policy
    }

    pub fn consult(
        &self,
        request: ConsultationRequest,
    ) -> Result<ConsultationReport, ConsultationError> {
        let symptoms = request.symptoms.trim();
        let actual = symptoms.chars().count();
        if actual < self.policy.min_symptom_chars {
            return Err(ConsultationError::SymptomsTooShort {
                min: self.policy.min_symptom_chars,
                actual,
            });
        }

        let top_n = request.top_n.unwrap_or(self.policy.default_top_n);
        if top_n > self.policy.max_top_n {
            return Err(ConsultationError::TopNTooLarge {
                max: self.policy.max_top_n,
                requested: top_n,
            });
        }

        let results = self.engine.find_diseases(symptoms, top_n);
        let outcome = if results.is_empty() {
            ConsultationOutcome::NoMatch
        } else {
            ConsultationOutcome::Suggested
        };

        Ok(ConsultationReport {
            symptoms: symptoms.to_string(),
            outcome,
            results,
        })
    }
}

/// Rejected consultation input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsultationError {
    #[error("symptom description needs at least {min} characters (got {actual})")]
    SymptomsTooShort { min: usize, actual: usize },
    #[error("at most {max} suggestions can be requested (got {requested})")]
    TopNTooLarge { max: usize, requested: usize },
}
