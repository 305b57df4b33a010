use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_loan_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use loan_approval::config::AppConfig;
use loan_approval::error::AppError;
use loan_approval::telemetry;
use loan_approval::workflows::loan::{LoanPredictor, ModelStore};
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
    if let Some(directory) = args.model_dir.take() {
        config.models.directory = directory;
    }

    telemetry::init(&config.telemetry)?;

    // Both artifacts must load before the listener opens.
    let store = ModelStore::load(&config.models.directory)?;
    let predictor = Arc::new(LoanPredictor::new(Arc::new(store)));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let app_state = AppState::new(prometheus_handle);

    let app = with_loan_routes(predictor)
        .layer(Extension(app_state.clone()))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    app_state.mark_ready();

    info!(
        ?config.environment,
        %addr,
        models = %config.models.directory.display(),
        "loan approval predictor ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
