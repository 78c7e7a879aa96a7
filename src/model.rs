use rust_decimal::Decimal;

/// One dated publication of rates from a single sender.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    pub sender_name: String,
    /// `YYYY-MM-DD`; unique across the store.
    pub observation_date: String,
    pub rates: Vec<RateEntry>,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct RateEntry {
    pub currency: String,
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CurrencyAggregate {
    pub currency: String,
    pub min: Decimal,
    pub max: Decimal,
    pub avg: Decimal,
}

/// Min/max/avg per currency over every stored entry.
///
/// `base` is the sender of an arbitrary stored snapshot and is not tied to
/// the rows that were aggregated.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    pub base: String,
    pub per_currency: Vec<CurrencyAggregate>,
}
