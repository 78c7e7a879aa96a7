//! Exchange-rate service: ingests the ECB reference-rate feed into Postgres
//! and serves latest, per-date and aggregate rates over HTTP.

pub mod auth;
pub mod error;
pub mod feed;
pub mod ingest;
pub mod model;
pub mod presenter;
pub mod routes;
pub mod settings;
pub mod store;
pub mod tls;
