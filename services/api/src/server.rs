use crate::cli::ServeArgs;
use crate::infra::{build_consultation_service, AppState};
use crate::routes::with_diagnosis_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use medisym::config::AppConfig;
use medisym::error::AppError;
use medisym::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        started_at: Utc::now(),
    };

    let consultation_service = Arc::new(build_consultation_service(&config.diagnosis)?);
    let diseases = consultation_service.engine().catalog().len();

    let app = with_diagnosis_routes(consultation_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, diseases, "symptom matching service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
