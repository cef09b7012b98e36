use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::date::parse_iso_date_strict;
use crate::series::dataset::SalesDataset;
use crate::{ClientError, ClientResult};

pub const ALL_REGIONS: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Quantity,
    Price,
    Sales,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Quantity, Metric::Price, Metric::Sales];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quantity => "quantity",
            Self::Price => "price",
            Self::Sales => "sales",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Quantity => "Total Quantity Sold",
            Self::Price => "Average Price",
            Self::Sales => "Total Sales",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "quantity" | "total_quantity" => Some(Self::Quantity),
            "price" | "average_price" => Some(Self::Price),
            "sales" | "total_sales" => Some(Self::Sales),
            _ => None,
        }
    }
}

/// Region selection. Region names compare case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionFilter {
    All,
    Only(String),
}

impl RegionFilter {
    pub fn parse(value: &str) -> Self {
        let normalized = value.trim().to_lowercase();
        if normalized.is_empty() || normalized == ALL_REGIONS {
            return Self::All;
        }
        Self::Only(normalized)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_REGIONS,
            Self::Only(region) => region,
        }
    }

    pub fn matches(&self, region: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => region.to_lowercase() == *wanted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRequest {
    pub metric: Metric,
    pub region: RegionFilter,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
}

impl FilterRequest {
    /// Builds a request from loosely typed inputs (query string, CLI flags).
    ///
    /// Missing bounds default to the dataset's first/last date, a missing
    /// region to "all", a missing metric to quantity. An inverted range is
    /// accepted here and simply matches nothing.
    pub fn build(
        metric: Option<&str>,
        region: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
        dataset: &SalesDataset,
    ) -> ClientResult<Self> {
        let metric = match metric.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => Metric::parse(value).ok_or_else(|| {
                ClientError::invalid_request(&format!(
                    "Unknown metric \"{value}\"; expected quantity, price, or sales."
                ))
            })?,
            None => Metric::Quantity,
        };
        let region = region.map(RegionFilter::parse).unwrap_or(RegionFilter::All);

        let (earliest, latest) = dataset
            .date_range()
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        let date_start = match from.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => parse_iso_date_strict(value, "start")?,
            None => earliest,
        };
        let date_end = match to.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => parse_iso_date_strict(value, "end")?,
            None => latest,
        };

        Ok(Self {
            metric,
            region,
            date_start,
            date_end,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::{FilterRequest, Metric, RegionFilter};
    use crate::records::SalesRecord;
    use crate::series::dataset::SalesDataset;

    fn dataset() -> SalesDataset {
        SalesDataset::from_records(
            [5, 9]
                .iter()
                .map(|day| SalesRecord {
                    date: NaiveDate::from_ymd_opt(2018, 2, *day).unwrap_or_default(),
                    region: "north".to_string(),
                    quantity: 1,
                    price: dec!(3.00),
                    sales: dec!(3.00),
                })
                .collect(),
        )
    }

    #[test]
    fn metric_parse_accepts_names_and_labels() {
        assert_eq!(Metric::parse("quantity"), Some(Metric::Quantity));
        assert_eq!(Metric::parse(" Price "), Some(Metric::Price));
        assert_eq!(Metric::parse("total_sales"), Some(Metric::Sales));
        assert_eq!(Metric::parse("average_price"), Some(Metric::Price));
        assert_eq!(Metric::parse("revenue"), None);
    }

    #[test]
    fn region_filter_is_case_insensitive_with_all_sentinel() {
        assert_eq!(RegionFilter::parse("All"), RegionFilter::All);
        assert_eq!(RegionFilter::parse(""), RegionFilter::All);
        let south = RegionFilter::parse("South");
        assert_eq!(south.as_str(), "south");
        assert!(south.matches("south"));
        assert!(south.matches("SOUTH"));
        assert!(!south.matches("north"));
        assert!(RegionFilter::All.matches("anything"));
    }

    #[test]
    fn build_defaults_to_quantity_all_regions_and_dataset_range() {
        let request = FilterRequest::build(None, None, None, Some(" "), &dataset());
        assert!(request.is_ok());
        if let Ok(request) = request {
            assert_eq!(request.metric, Metric::Quantity);
            assert_eq!(request.region, RegionFilter::All);
            assert_eq!(request.date_start, NaiveDate::from_ymd_opt(2018, 2, 5).unwrap_or_default());
            assert_eq!(request.date_end, NaiveDate::from_ymd_opt(2018, 2, 9).unwrap_or_default());
        }
    }

    #[test]
    fn build_rejects_unknown_metric_and_loose_dates() {
        let metric = FilterRequest::build(Some("revenue"), None, None, None, &dataset());
        assert!(metric.is_err());
        if let Err(error) = metric {
            assert_eq!(error.code, "invalid_request");
            assert!(error.message.contains("revenue"));
        }

        let date = FilterRequest::build(None, None, None, Some("2018/02/09"), &dataset());
        assert!(date.is_err());
        if let Err(error) = date {
            assert_eq!(error.code, "invalid_request");
            assert!(error.message.contains("`end`"));
        }
    }

    #[test]
    fn build_accepts_inverted_range() {
        let request = FilterRequest::build(
            Some("sales"),
            Some("North"),
            Some("2018-02-09"),
            Some("2018-02-05"),
            &dataset(),
        );
        assert!(request.is_ok());
        if let Ok(request) = request {
            assert_eq!(request.metric, Metric::Sales);
            assert_eq!(request.region, RegionFilter::Only("north".to_string()));
            assert!(request.date_start > request.date_end);
        }
    }
}
