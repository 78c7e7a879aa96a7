use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use rustls::ServerConfig;

/// Server TLS config from PEM certificate chain and private key files.
pub fn load_server_config(cert_path: &Path, key_path: &Path) -> Result<ServerConfig> {
    let mut cert_reader = BufReader::new(
        File::open(cert_path)
            .with_context(|| format!("Unable to open certificate {}", cert_path.display()))?,
    );
    let certs = rustls_pemfile::certs(&mut cert_reader)
        .collect::<Result<Vec<_>, _>>()
        .context("Unable to read certificate chain")?;
    if certs.is_empty() {
        anyhow::bail!("No certificate found in {}", cert_path.display());
    }

    let mut key_reader = BufReader::new(
        File::open(key_path)
            .with_context(|| format!("Unable to open private key {}", key_path.display()))?,
    );
    let key = rustls_pemfile::private_key(&mut key_reader)
        .context("Unable to read private key")?
        .ok_or_else(|| anyhow::anyhow!("No private key found in {}", key_path.display()))?;

    let config = ServerConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_safe_default_protocol_versions()?
    .with_no_client_auth()
    .with_single_cert(certs, key)?;

    Ok(config)
}
