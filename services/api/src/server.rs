use crate::cli::ServeArgs;
use crate::infra::{spawn_scheduled_refresh, AppState};
use crate::routes::report_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use crime_intel::config::AppConfig;
use crime_intel::error::AppError;
use crime_intel::reports::{FileReportSource, ReportFeed, ReportSource, StaticReportSource};
use crime_intel::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.reports.take() {
        config.feed.reports_path = Some(path);
    }
    if let Some(minutes) = args.refresh_minutes.take() {
        config.feed.refresh_minutes = Some(minutes);
    }

    telemetry::init(&config.telemetry)?;

    let source: Arc<dyn ReportSource> = match &config.feed.reports_path {
        Some(path) => Arc::new(FileReportSource::new(path.clone())),
        None => {
            warn!("no report batch configured; serving an empty feed");
            Arc::new(StaticReportSource::default())
        }
    };
    let feed = Arc::new(ReportFeed::new(source).with_schedule(config.feed.refresh_minutes));
    if let Err(err) = feed.refresh() {
        warn!(error = %err, "initial report load failed; feed starts empty");
    }
    spawn_scheduled_refresh(Arc::clone(&feed));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        feed,
    };

    let app = report_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "crime intelligence service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
