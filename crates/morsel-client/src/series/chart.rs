use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::ClientResult;
use crate::series::aggregate::max_value;
use crate::series::dataset::SalesDataset;
use crate::series::types::{FilterRequest, Metric, SeriesPoint};

pub const PRICE_HIKE_LABEL: &str = "Price Hike";

/// Fixed annotation drawn at the configured price-hike date. `y` sits at the
/// top of the plotted series so the label clears the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceHikeMarker {
    pub date: NaiveDate,
    pub label: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub y: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub metric: Metric,
    pub metric_label: String,
    pub region: String,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub points: Vec<SeriesPoint>,
    pub marker: PriceHikeMarker,
}

pub fn chart(
    dataset: &SalesDataset,
    request: &FilterRequest,
    hike_date: NaiveDate,
) -> ClientResult<ChartSeries> {
    let points = dataset.query(request)?;
    let marker = PriceHikeMarker {
        date: hike_date,
        label: PRICE_HIKE_LABEL.to_string(),
        y: max_value(&points),
    };

    Ok(ChartSeries {
        metric: request.metric,
        metric_label: request.metric.label().to_string(),
        region: request.region.as_str().to_string(),
        date_start: request.date_start,
        date_end: request.date_end,
        points,
        marker,
    })
}
