use chrono::{DateTime, Utc};
use medisym::config::DiagnosisConfig;
use medisym::diagnosis::{ConsultationService, DiagnosisEngine, KnowledgeBase};
use medisym::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) started_at: DateTime<Utc>,
}

/// Loads the replacement catalog when one is configured, else the bundled one.
pub(crate) fn load_catalog(config: &DiagnosisConfig) -> Result<KnowledgeBase, AppError> {
    let catalog = match &config.catalog_path {
        Some(path) => {
            let catalog = KnowledgeBase::from_path(path)?;
            info!(path = %path.display(), diseases = catalog.len(), "loaded disease catalog");
            catalog
        }
        None => KnowledgeBase::embedded()?,
    };
    Ok(catalog)
}

pub(crate) fn build_consultation_service(
    config: &DiagnosisConfig,
) -> Result<ConsultationService, AppError> {
    let catalog = load_catalog(config)?;
    let engine = DiagnosisEngine::new(Arc::new(catalog));
    Ok(ConsultationService::new(engine, config.policy()))
}

#[cfg(test)]
pub(crate) fn default_diagnosis_config() -> DiagnosisConfig {
    DiagnosisConfig {
        default_top_n: 3,
        max_top_n: 10,
        min_symptom_chars: 10,
        catalog_path: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medisym::diagnosis::CatalogError;
    use std::path::PathBuf;

    #[test]
    fn falls_back_to_the_embedded_catalog() {
        let catalog = load_catalog(&default_diagnosis_config()).expect("embedded catalog");
        assert_eq!(catalog.len(), 45);
    }

    #[test]
    fn missing_catalog_file_is_reported() {
        let config = DiagnosisConfig {
            catalog_path: Some(PathBuf::from("/nonexistent/medisym/diseases.json")),
            ..default_diagnosis_config()
        };
        let err = load_catalog(&config).expect_err("missing file");
        assert!(matches!(err, AppError::Catalog(CatalogError::Io(_))));
    }

    #[test]
    fn service_uses_configured_policy() {
        let config = DiagnosisConfig {
            default_top_n: 1,
            ..default_diagnosis_config()
        };
        let service = build_consultation_service(&config).expect("service builds");
        assert_eq!(service.policy().default_top_n, 1);
    }
}
