//! Exchange-rate feed: download, XML parsing and flattening into storable snapshots.

mod envelope;
pub mod normalize;
pub mod parser;
pub mod source;

pub use normalize::normalize;
pub use parser::{ParsedFeed, ParsedRate, TimeGroup, parse};
pub use source::FeedSource;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Unable to download xml data: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Invalid response status: {0}")]
    Status(StatusCode),
    #[error("Empty response body")]
    EmptyBody,
    #[error("Unable to read xml file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to parse xml data: {0}")]
    Xml(#[from] quick_xml::DeError),
    #[error("Invalid rate {value:?} for currency {currency}: {source}")]
    Rate {
        currency: String,
        value: String,
        #[source]
        source: rust_decimal::Error,
    },
}
