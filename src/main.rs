use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use anyhow::{Context, Result};
use log::{info, warn};

use fxrates::auth::AuthManager;
use fxrates::feed::FeedSource;
use fxrates::ingest::IngestionPipeline;
use fxrates::routes::{self, AppState};
use fxrates::settings::{Settings, StoreBackend};
use fxrates::store::{MemoryRateStore, PgRateStore, RateStore};
use fxrates::tls;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    env_logger::Builder::new()
        .parse_filters(&settings.log_level)
        .init();
    info!("Initializing Currency API");

    let store = connect_store(&settings).await?;

    let source = FeedSource::new(settings.xml_url.clone(), settings.xml_file_path.clone());
    IngestionPipeline::new(&source, store.as_ref())
        .run()
        .await
        .context("Initial ingestion failed")?;

    let state = web::Data::new(AppState {
        store,
        auth: Arc::new(AuthManager::with_hmac_secret(&settings.token_secret)),
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
    });

    let addr = settings.bind_address();
    let server = if settings.server_tls {
        let tls_config =
            tls::load_server_config(&settings.server_public_key, &settings.server_private_key)?;
        info!("Listening on https://{}:{}", addr.0, addr.1);
        server.bind_rustls_0_23(addr, tls_config)?
    } else {
        warn!("TLS disabled, serving plain HTTP");
        info!("Listening on http://{}:{}", addr.0, addr.1);
        server.bind(addr)?
    };

    server.run().await?;

    Ok(())
}

async fn connect_store(settings: &Settings) -> Result<Arc<dyn RateStore>> {
    match settings.store_backend {
        StoreBackend::Postgres => {
            let store = PgRateStore::connect(&settings.database_url())
                .await
                .context("Unable to connect to DB")?;
            store.migrate().await.context("Unable to migrate tables")?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            warn!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryRateStore::new()))
        }
    }
}
