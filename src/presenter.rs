//! Client-facing JSON for stored rates.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::model::{AggregateReport, RateSnapshot};

#[derive(Debug, Serialize, PartialEq)]
pub struct CurrencyStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AnalyzedRates {
    pub base: String,
    pub rates_analyze: BTreeMap<String, CurrencyStats>,
}

/// Renders `{"base": "<sender>", "rates": {"<currency>": "<rate>", ...}}`
/// with rates ascending by value.
///
/// The text is assembled by hand because clients read the `rates` members in
/// order and a JSON object carries no ordering guarantee.
pub fn render_snapshot(snapshot: &RateSnapshot) -> String {
    let mut entries: Vec<_> = snapshot.rates.iter().collect();
    entries.sort_by(|a, b| a.rate.cmp(&b.rate));

    let rates = entries
        .iter()
        .map(|entry| {
            format!(
                "{}: \"{}\"",
                json_string(&entry.currency),
                entry.rate.normalize()
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{{\"base\": {}, \"rates\": {{{}}}}}",
        json_string(&snapshot.sender_name),
        rates
    )
}

pub fn render_aggregate(report: &AggregateReport) -> AnalyzedRates {
    AnalyzedRates {
        base: report.base.clone(),
        rates_analyze: report
            .per_currency
            .iter()
            .map(|c| {
                (
                    c.currency.clone(),
                    CurrencyStats {
                        min: to_float(c.min),
                        max: to_float(c.max),
                        avg: to_float(c.avg),
                    },
                )
            })
            .collect(),
    }
}

// Goes through the decimal text so the float is the one nearest to it.
fn to_float(d: Decimal) -> f64 {
    d.normalize()
        .to_string()
        .parse()
        .unwrap_or_else(|_| d.to_f64().unwrap_or_default())
}

fn json_string(s: &str) -> String {
    // Serializing a str cannot fail.
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CurrencyAggregate, RateEntry};
    use rust_decimal::dec;

    fn entry(currency: &str, rate: Decimal) -> RateEntry {
        RateEntry {
            currency: currency.to_string(),
            rate,
        }
    }

    #[test]
    fn renders_exact_snapshot_text() {
        let snapshot = RateSnapshot {
            sender_name: "Mock Sender".to_string(),
            observation_date: "2020-06-01".to_string(),
            rates: vec![entry("PHP", dec!(50.999)), entry("HPH", dec!(999.50))],
        };

        assert_eq!(
            render_snapshot(&snapshot),
            r#"{"base": "Mock Sender", "rates": {"PHP": "50.999", "HPH": "999.5"}}"#
        );
    }

    #[test]
    fn sorts_by_rate_not_currency() {
        let snapshot = RateSnapshot {
            sender_name: "ECB".to_string(),
            observation_date: "2020-06-01".to_string(),
            rates: vec![
                entry("AAA", dec!(120.68)),
                entry("ZZZ", dec!(0.89)),
                entry("MMM", dec!(1.1174)),
                entry("BBB", dec!(0.890)),
            ],
        };

        let rendered = render_snapshot(&snapshot);

        assert_eq!(
            rendered,
            r#"{"base": "ECB", "rates": {"ZZZ": "0.89", "BBB": "0.89", "MMM": "1.1174", "AAA": "120.68"}}"#
        );
    }

    #[test]
    fn stored_precision_is_trimmed() {
        let snapshot = RateSnapshot {
            sender_name: "ECB".to_string(),
            observation_date: "2020-06-01".to_string(),
            rates: vec![entry("USD", dec!(1.11740000)), entry("JPY", dec!(120.00000000))],
        };

        assert_eq!(
            render_snapshot(&snapshot),
            r#"{"base": "ECB", "rates": {"USD": "1.1174", "JPY": "120"}}"#
        );
    }

    #[test]
    fn snapshot_without_rates_renders_empty_object() {
        let snapshot = RateSnapshot {
            sender_name: "ECB".to_string(),
            observation_date: "2020-06-01".to_string(),
            rates: vec![],
        };

        let rendered = render_snapshot(&snapshot);

        assert_eq!(rendered, r#"{"base": "ECB", "rates": {}}"#);
        assert!(serde_json::from_str::<serde_json::Value>(&rendered).is_ok());
    }

    #[test]
    fn sender_name_is_escaped() {
        let snapshot = RateSnapshot {
            sender_name: "Bank \"Central\"".to_string(),
            observation_date: "2020-06-01".to_string(),
            rates: vec![entry("USD", dec!(1))],
        };

        let value: serde_json::Value = serde_json::from_str(&render_snapshot(&snapshot)).unwrap();

        assert_eq!(value["base"], "Bank \"Central\"");
        assert_eq!(value["rates"]["USD"], "1");
    }

    #[test]
    fn aggregate_is_keyed_by_currency() {
        let report = AggregateReport {
            base: "Mock Sender".to_string(),
            per_currency: vec![CurrencyAggregate {
                currency: "PHP".to_string(),
                min: dec!(50.555),
                max: dec!(60.555),
                avg: dec!(55.5550000000000000),
            }],
        };

        let json = serde_json::to_value(render_aggregate(&report)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "base": "Mock Sender",
                "rates_analyze": {
                    "PHP": {"min": 50.555, "max": 60.555, "avg": 55.555}
                }
            })
        );
    }
}
