use fxrates::feed::{normalize, parse};
use fxrates::presenter::render_snapshot;
use fxrates::store::{MemoryRateStore, RateStore};

const BUNDLED: &str = include_str!("../data/eurofxref-hist-90d.xml");

#[test]
fn bundled_document_parses() {
    let feed = parse(BUNDLED).expect("bundled feed must parse");

    assert_eq!(feed.sender_name, "European Central Bank");
    assert_eq!(feed.groups.len(), 5);
    assert!(feed.groups.iter().all(|g| g.rates.len() == 24));
}

#[test_log::test(tokio::test)]
async fn bundled_document_serves_latest_in_rate_order() {
    let store = MemoryRateStore::new();
    store
        .upsert_all(&normalize(parse(BUNDLED).unwrap()))
        .await
        .unwrap();

    let latest = store.get_latest().await.unwrap();
    assert_eq!(latest.observation_date, "2020-06-05");

    let value: serde_json::Value = serde_json::from_str(&render_snapshot(&latest)).unwrap();
    assert_eq!(value["base"], "European Central Bank");
    assert_eq!(value["rates"]["USD"], "1.133");

    let rendered = render_snapshot(&latest);
    let gbp = rendered.find("\"GBP\"").unwrap();
    let usd = rendered.find("\"USD\"").unwrap();
    let krw = rendered.find("\"KRW\"").unwrap();
    assert!(gbp < usd && usd < krw);
}
