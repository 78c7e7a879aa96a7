use crate::model::{RateEntry, RateSnapshot};

use super::ParsedFeed;

/// Flattens a parsed feed into one snapshot per time group, keeping the
/// document order of groups and of rates inside each group.
pub fn normalize(feed: ParsedFeed) -> Vec<RateSnapshot> {
    let ParsedFeed {
        sender_name,
        groups,
    } = feed;

    groups
        .into_iter()
        .map(|group| RateSnapshot {
            sender_name: sender_name.clone(),
            observation_date: group.time,
            rates: group
                .rates
                .into_iter()
                .map(|r| RateEntry {
                    currency: r.currency,
                    rate: r.rate,
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::parse;
    use rust_decimal::dec;

    #[test]
    fn one_snapshot_per_time_group_with_matching_entry_counts() {
        let raw = r#"<Envelope><Sender><name>Bank</name></Sender><Cube>
            <Cube time="2020-06-03"><Cube currency="USD" rate="1.12"/><Cube currency="JPY" rate="121.5"/><Cube currency="GBP" rate="0.89"/></Cube>
            <Cube time="2020-06-02"><Cube currency="USD" rate="1.11"/></Cube>
            <Cube time="2020-06-01"></Cube>
        </Cube></Envelope>"#;

        let snapshots = normalize(parse(raw).unwrap());

        assert_eq!(snapshots.len(), 3);
        let counts: Vec<usize> = snapshots.iter().map(|s| s.rates.len()).collect();
        assert_eq!(counts, vec![3, 1, 0]);
        assert!(snapshots.iter().all(|s| s.sender_name == "Bank"));
    }

    #[test]
    fn keeps_rates_in_encounter_order() {
        let raw = r#"<Envelope><Sender><name>Bank</name></Sender><Cube>
            <Cube time="2020-06-03"><Cube currency="ZAR" rate="19.2"/><Cube currency="AUD" rate="1.6"/></Cube>
        </Cube></Envelope>"#;

        let snapshots = normalize(parse(raw).unwrap());

        assert_eq!(
            snapshots[0],
            RateSnapshot {
                sender_name: "Bank".to_string(),
                observation_date: "2020-06-03".to_string(),
                rates: vec![
                    RateEntry {
                        currency: "ZAR".to_string(),
                        rate: dec!(19.2),
                    },
                    RateEntry {
                        currency: "AUD".to_string(),
                        rate: dec!(1.6),
                    },
                ],
            }
        );
    }

    #[test]
    fn empty_feed_yields_no_snapshots() {
        let feed = ParsedFeed {
            sender_name: "Bank".to_string(),
            groups: vec![],
        };

        assert!(normalize(feed).is_empty());
    }
}
