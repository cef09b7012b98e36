use chrono::NaiveDate;

use crate::ClientResult;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{DashboardOptions, DataRange, MarkerData, MetricOption};
use crate::date::format_iso_date;
use crate::series::chart::PRICE_HIKE_LABEL;
use crate::series::dataset::SalesDataset;
use crate::series::types::{ALL_REGIONS, Metric};
use crate::settings::{Settings, SettingsOverrides};

pub fn run(overrides: &SettingsOverrides) -> ClientResult<SuccessEnvelope> {
    let settings = Settings::resolve(overrides)?;
    run_with_settings(&settings)
}

#[doc(hidden)]
pub fn run_with_settings(settings: &Settings) -> ClientResult<SuccessEnvelope> {
    let dataset = SalesDataset::load(&settings.dataset_path)?;
    success("options", dashboard_options(&dataset, settings.hike_date))
}

/// Everything a front end needs to draw its filter widgets.
pub fn dashboard_options(dataset: &SalesDataset, hike_date: NaiveDate) -> DashboardOptions {
    let mut regions = vec![ALL_REGIONS.to_string()];
    regions.extend(dataset.regions().iter().cloned());

    let range = dataset.date_range();
    DashboardOptions {
        dataset_path: dataset
            .source()
            .map(|path| path.display().to_string())
            .unwrap_or_default(),
        rows: dataset.len() as i64,
        metrics: Metric::ALL
            .iter()
            .map(|metric| MetricOption {
                value: metric.as_str().to_string(),
                label: metric.label().to_string(),
            })
            .collect(),
        regions,
        data_range: DataRange {
            earliest: range.map(|(earliest, _)| format_iso_date(&earliest)),
            latest: range.map(|(_, latest)| format_iso_date(&latest)),
        },
        marker: MarkerData {
            date: format_iso_date(&hike_date),
            label: PRICE_HIKE_LABEL.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::dashboard_options;
    use crate::records::SalesRecord;
    use crate::series::dataset::SalesDataset;

    #[test]
    fn regions_lead_with_all_sentinel() {
        let date = NaiveDate::from_ymd_opt(2018, 2, 6).unwrap_or_default();
        let dataset = SalesDataset::from_records(
            ["west", "north", "East", "south", "north"]
                .iter()
                .map(|region| SalesRecord {
                    date,
                    region: region.to_string(),
                    quantity: 1,
                    price: dec!(3.00),
                    sales: dec!(3.00),
                })
                .collect(),
        );

        let options = dashboard_options(&dataset, date);
        assert_eq!(options.regions, vec!["all", "east", "north", "south", "west"]);
        assert_eq!(options.metrics.len(), 3);
        assert_eq!(options.data_range.earliest.as_deref(), Some("2018-02-06"));
        assert_eq!(options.marker.label, "Price Hike");
        assert_eq!(options.rows, 5);
    }
}
