use chrono::NaiveDate;

use crate::ClientResult;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::series::chart::{ChartSeries, chart};
use crate::series::dataset::SalesDataset;
use crate::series::types::FilterRequest;
use crate::settings::{Settings, SettingsOverrides};

#[derive(Debug, Clone, Default)]
pub struct QueryRunOptions {
    pub metric: Option<String>,
    pub region: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub settings: SettingsOverrides,
}

pub fn run(options: &QueryRunOptions) -> ClientResult<SuccessEnvelope> {
    let settings = Settings::resolve(&options.settings)?;
    run_with_settings(options, &settings)
}

#[doc(hidden)]
pub fn run_with_settings(
    options: &QueryRunOptions,
    settings: &Settings,
) -> ClientResult<SuccessEnvelope> {
    let dataset = SalesDataset::load(&settings.dataset_path)?;
    let series = chart_for(
        &dataset,
        settings.hike_date,
        options.metric.as_deref(),
        options.region.as_deref(),
        options.from.as_deref(),
        options.to.as_deref(),
    )?;
    success("query", series)
}

/// Parses a loosely typed request and charts it. Shared by the CLI and the
/// HTTP handler.
pub fn chart_for(
    dataset: &SalesDataset,
    hike_date: NaiveDate,
    metric: Option<&str>,
    region: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
) -> ClientResult<ChartSeries> {
    let request = FilterRequest::build(metric, region, from, to, dataset)?;
    let series = chart(dataset, &request, hike_date)?;
    tracing::debug!(
        metric = request.metric.as_str(),
        region = request.region.as_str(),
        start = %request.date_start,
        end = %request.date_end,
        points = series.points.len(),
        "answered chart query"
    );
    Ok(series)
}
