//! Cohort Dashboard API Server
//!
//! REST API serving summary statistics, attribute distributions and
//! hospital comparisons to the dashboard.

use axum::{
    extract::State,
    http::{HeaderValue, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use cohort_engine::{OperationalMetrics, StaticMetrics};
use cohort_model::{load_records_json, DataModel, EnrichedTable};
use derivation::{derive, DomainValidator};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub mod error;
pub mod rate_limit;
mod routes;
pub mod settings;
pub mod telemetry;

pub use error::{ApiError, StartupError};
pub use settings::Settings;
pub use telemetry::init_logging;

/// Application state shared across handlers
///
/// Everything here is read-only once the server starts.
pub struct AppState {
    /// Enriched table snapshot
    pub table: Arc<EnrichedTable>,
    /// Operational figures for `/stats`
    pub metrics: Arc<dyn OperationalMetrics>,
    /// Prometheus handle, when the recorder is installed
    pub prometheus: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(table: EnrichedTable, metrics: Arc<dyn OperationalMetrics>) -> Self {
        Self {
            table: Arc::new(table),
            metrics,
            prometheus: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub patients: usize,
    pub hospitals: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(routes::stats::get_stats))
        .route("/graphs", get(routes::graphs::get_graphs))
        .route("/compare", get(routes::compare::get_compare))
        .route("/records", get(routes::records::get_records))
        .route("/metrics", get(routes::prometheus::get_metrics))
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        patients: state.table.patient_count(),
        hospitals: state.table.hospital_count(),
    })
}

/// CORS layer for the configured origins
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin {:?}", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET])
        .allow_headers(Any)
}

fn open(path: &str) -> Result<BufReader<File>, StartupError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| StartupError::Io {
            path: path.to_string(),
            source,
        })
}

/// Load the data, derive computed fields and audit categorical domains
///
/// Runs once before serving; the resulting table is never mutated.
pub fn bootstrap(settings: &Settings) -> Result<AppState, StartupError> {
    let model = match &settings.data.data_model_path {
        Some(path) => {
            info!("Loading data model from {}", path);
            DataModel::from_json_reader(open(path)?)?
        }
        None => DataModel::pag_default(),
    };

    info!("Loading patient records from {}", settings.data.records_path);
    let records = load_records_json(open(&settings.data.records_path)?)?;
    let table = derive(model, records)?;

    let report = DomainValidator::new(table.model()).audit(&table);
    for violation in report.violations.iter().take(20) {
        warn!(
            "Patient {}: {} = {:?} is outside its declared values",
            violation.patient_id, violation.column, violation.value
        );
    }
    if !report.valid && settings.data.strict_domains {
        return Err(StartupError::DomainViolations(report.violations.len()));
    }

    info!(
        "Dataset ready: {} rows, {} patients, {} hospitals",
        table.len(),
        table.patient_count(),
        table.hospital_count()
    );

    let metrics: Arc<dyn OperationalMetrics> = Arc::new(settings.stats.clone());
    Ok(AppState::new(table, metrics))
}

/// Run the server
pub async fn run_server(settings: Settings) -> Result<(), StartupError> {
    let prometheus = telemetry::install_recorder()?;
    let state = Arc::new(bootstrap(&settings)?.with_prometheus(prometheus));

    let mut app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&settings.cors.allowed_origins));

    if settings.rate_limit.enabled {
        let config = rate_limit::create_governor_config(&settings.rate_limit)?;
        info!(
            "Rate limiting enabled: burst {}, replenish every {}s",
            settings.rate_limit.burst_size, settings.rate_limit.per_second
        );
        app = app.layer(GovernorLayer { config });
    }

    info!("Starting API server on {}", settings.server.bind_addr);

    let listener = tokio::net::TcpListener::bind(settings.server.bind_addr.as_str())
        .await
        .map_err(StartupError::Server)?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .map_err(StartupError::Server)?;

    Ok(())
}
