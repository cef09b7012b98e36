use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::money::round_cents;

/// A raw per-day transaction after type normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub source_file: String,
    pub source_row: i64,
    pub product: String,
    pub date: NaiveDate,
    pub region: String,
    pub quantity: i64,
    pub price: Decimal,
}

/// One row of the derived dataset.
///
/// `quantity` and `price` are kept next to `sales` so the chart can plot
/// total quantity and average price, not only revenue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub region: String,
    pub quantity: i64,
    pub price: Decimal,
    pub sales: Decimal,
}

impl SalesRecord {
    /// `None` when `price × quantity` does not fit in a `Decimal`.
    pub fn derive(transaction: &TransactionRecord) -> Option<Self> {
        let sales = transaction
            .price
            .checked_mul(Decimal::from(transaction.quantity))?;
        Some(Self {
            date: transaction.date,
            region: transaction.region.clone(),
            quantity: transaction.quantity,
            price: transaction.price,
            sales: round_cents(sales),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::{SalesRecord, TransactionRecord};

    fn transaction(quantity: i64, price: Decimal) -> TransactionRecord {
        TransactionRecord {
            source_file: "daily_sales_data_0.csv".to_string(),
            source_row: 1,
            product: "pink morsel".to_string(),
            date: NaiveDate::from_ymd_opt(2018, 2, 6).unwrap_or_default(),
            region: "north".to_string(),
            quantity,
            price,
        }
    }

    #[test]
    fn derived_sales_is_price_times_quantity_in_cents() {
        let record = SalesRecord::derive(&transaction(3, dec!(0.333)));
        assert!(record.is_some());
        if let Some(record) = record {
            assert_eq!(record.sales, dec!(1.00));
            assert_eq!(record.quantity, 3);
            assert_eq!(record.price, dec!(0.333));
            assert_eq!(record.region, "north");
        }
    }

    #[test]
    fn product_too_large_for_decimal_is_none() {
        assert!(SalesRecord::derive(&transaction(2, Decimal::MAX)).is_none());
        assert!(SalesRecord::derive(&transaction(2, Decimal::MAX / Decimal::from(4))).is_some());
    }
}
