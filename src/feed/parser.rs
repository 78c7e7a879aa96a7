use std::str::FromStr;

use rust_decimal::Decimal;

use super::FeedError;
use super::envelope::Envelope;

/// Structural view of one feed publication.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFeed {
    pub sender_name: String,
    pub groups: Vec<TimeGroup>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeGroup {
    pub time: String,
    pub rates: Vec<ParsedRate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRate {
    pub currency: String,
    pub rate: Decimal,
}

/// Parses a raw `eurofxref` document. Currency codes and rate ranges are not
/// validated; only the document shape and the numeric syntax of each rate are.
pub fn parse(raw: &str) -> Result<ParsedFeed, FeedError> {
    let envelope: Envelope = quick_xml::de::from_str(raw)?;

    let mut groups = Vec::with_capacity(envelope.cube.cubes.len());
    for time_cube in envelope.cube.cubes {
        let mut rates = Vec::with_capacity(time_cube.cubes.len());
        for cube in time_cube.cubes {
            let rate = parse_rate(&cube.rate).map_err(|source| FeedError::Rate {
                currency: cube.currency.clone(),
                value: cube.rate.clone(),
                source,
            })?;
            rates.push(ParsedRate {
                currency: cube.currency,
                rate,
            });
        }
        groups.push(TimeGroup {
            time: time_cube.time,
            rates,
        });
    }

    Ok(ParsedFeed {
        sender_name: envelope.sender.name,
        groups,
    })
}

fn parse_rate(s: &str) -> Result<Decimal, rust_decimal::Error> {
    let trimmed = s.trim();
    Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed))
}
