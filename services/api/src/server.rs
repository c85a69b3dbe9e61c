use crate::cli::ServeArgs;
use crate::infra::{load_engine, AppState};
use crate::routes::with_valuation_routes;
use autovalue::config::AppConfig;
use autovalue::error::AppError;
use autovalue::telemetry;
use autovalue::valuation::ValuationService;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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
    };

    let engine = load_engine(&config.valuation)?;
    let tables = engine.tables().summary();
    let valuation_service = Arc::new(ValuationService::new(engine));

    let app = with_valuation_routes(valuation_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        tables_version = %tables.version,
        catalog_entries = tables.catalog_entries,
        "vehicle valuation service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
