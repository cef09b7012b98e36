use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::date::format_iso_date;
use crate::records::SalesRecord;
use crate::series::types::{FilterRequest, Metric, SeriesPoint};
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
struct DayTotals {
    rows: i64,
    total: Decimal,
}

impl DayTotals {
    fn add(&mut self, amount: Decimal) -> Option<()> {
        self.total = self.total.checked_add(amount)?;
        self.rows += 1;
        Some(())
    }

    fn value(&self, metric: Metric) -> Decimal {
        match metric {
            Metric::Price => self.total / Decimal::from(self.rows),
            Metric::Quantity | Metric::Sales => self.total,
        }
    }
}

fn amount(row: &SalesRecord, metric: Metric) -> Decimal {
    match metric {
        Metric::Quantity => Decimal::from(row.quantity),
        Metric::Price => row.price,
        Metric::Sales => row.sales,
    }
}

/// One point per distinct matching date, ascending. Dates with no matching
/// rows are absent rather than zero. Fails only when a day's total does not
/// fit in a `Decimal`.
pub fn query(rows: &[SalesRecord], request: &FilterRequest) -> ClientResult<Vec<SeriesPoint>> {
    if request.date_start > request.date_end {
        return Ok(Vec::new());
    }

    let mut days: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();
    for row in rows {
        if row.date < request.date_start || row.date > request.date_end {
            continue;
        }
        if !request.region.matches(&row.region) {
            continue;
        }
        let totals = days.entry(row.date).or_default();
        if totals.add(amount(row, request.metric)).is_none() {
            tracing::warn!(date = %row.date, metric = request.metric.as_str(), "daily total overflowed");
            return Err(ClientError::total_overflow(
                request.metric.as_str(),
                &format_iso_date(&row.date),
            ));
        }
    }

    Ok(days
        .into_iter()
        .map(|(date, totals)| SeriesPoint {
            date,
            value: totals.value(request.metric),
        })
        .collect())
}

/// Largest value in the series, or zero when it is empty.
pub fn max_value(points: &[SeriesPoint]) -> Decimal {
    points
        .iter()
        .map(|point| point.value)
        .max()
        .unwrap_or(Decimal::ZERO)
}
