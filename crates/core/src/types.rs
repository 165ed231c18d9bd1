use rust_decimal::{Decimal, RoundingStrategy};

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Monetary amounts and prices (`NUMERIC(10, 2)` columns).
pub type Money = Decimal;

/// Exclusive upper bound of a `NUMERIC(10, 2)` column.
pub const MONEY_CEILING: i64 = 100_000_000;

/// Whether `value` still fits a money column once Postgres rounds it to
/// cents.
pub fn fits_money_column(value: Money) -> bool {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        < Decimal::from(MONEY_CEILING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_ceiling_counts_rounding() {
        assert!(fits_money_column(Decimal::new(9_999_999_999, 2)));
        assert!(!fits_money_column(Decimal::from(MONEY_CEILING)));
        assert!(!fits_money_column(Decimal::new(99_999_999_995, 3)));
    }
}
