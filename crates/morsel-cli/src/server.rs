//! HTTP surface over the chart engine.
//!
//! The dataset is loaded once at startup and shared read-only through router
//! state; each request is a plain synchronous query against it.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use morsel_client::commands::options::dashboard_options;
use morsel_client::commands::query::chart_for;
use morsel_client::contracts::envelope::{FailureEnvelope, failure_from_error, success};
use morsel_client::contracts::types::{DashboardOptions, ServeData};
use morsel_client::series::chart::ChartSeries;
use morsel_client::{ClientError, ClientResult, SalesDataset, Settings, SuccessEnvelope};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    dataset: Arc<SalesDataset>,
    hike_date: NaiveDate,
}

impl AppState {
    pub fn new(dataset: SalesDataset, hike_date: NaiveDate) -> Self {
        Self {
            dataset: Arc::new(dataset),
            hike_date,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SeriesParams {
    pub metric: Option<String>,
    pub region: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

type ApiError = (StatusCode, Json<FailureEnvelope>);

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/options", get(get_options))
        .route("/api/series", get(get_series))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Loads the dataset, serves until ctrl-c, then reports what was served.
pub fn run(settings: &Settings) -> ClientResult<SuccessEnvelope> {
    let dataset = SalesDataset::load(&settings.dataset_path)?;
    let rows = dataset.len() as i64;
    let address = format!("{}:{}", settings.host, settings.port);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|error| ClientError::listener_failed(&address, &error.to_string()))?;
    let bound = runtime.block_on(serve(AppState::new(dataset, settings.hike_date), &address))?;

    success(
        "serve",
        ServeData {
            address: bound.to_string(),
            url: format!("http://{bound}"),
            dataset_path: settings.dataset_path.display().to_string(),
            rows,
        },
    )
}

async fn serve(state: AppState, address: &str) -> ClientResult<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| ClientError::listener_failed(address, &error.to_string()))?;
    let bound = listener
        .local_addr()
        .map_err(|error| ClientError::listener_failed(address, &error.to_string()))?;

    tracing::info!(url = %format!("http://{bound}"), "serving chart queries; press ctrl-c to stop");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|error| ClientError::listener_failed(address, &error.to_string()))?;
    tracing::info!(address = %bound, "listener stopped");

    Ok(bound)
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %error, "could not install ctrl-c handler; shutting down");
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn get_options(State(state): State<AppState>) -> Json<DashboardOptions> {
    Json(dashboard_options(&state.dataset, state.hike_date))
}

async fn get_series(
    State(state): State<AppState>,
    Query(params): Query<SeriesParams>,
) -> Result<Json<ChartSeries>, ApiError> {
    chart_for(
        &state.dataset,
        state.hike_date,
        params.metric.as_deref(),
        params.region.as_deref(),
        params.start.as_deref(),
        params.end.as_deref(),
    )
    .map(Json)
    .map_err(|error| api_error(&error))
}

fn api_error(error: &ClientError) -> ApiError {
    let status = if error.code == "invalid_request" {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    if status.is_server_error() {
        tracing::error!(code = %error.code, message = %error.message, "chart request failed");
    } else {
        tracing::debug!(code = %error.code, message = %error.message, "rejected chart request");
    }
    (status, Json(failure_from_error(error)))
}
