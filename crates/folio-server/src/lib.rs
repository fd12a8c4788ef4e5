//! HTTP API for the Folio book site.
//!
//! This crate provides an axum server exposing the chapter repository:
//! - `GET /api/chapters`: ordered chapter listing of the request locale
//! - `GET /api/chapters/{slug}`: raw chapter with previous/next links
//! - `GET /api/pages/{slug}`: rendered chapter page with `ETag` support
//! - `GET /api/slugs`: slugs across all configured locales
//! - `GET /api/config`: configured locales
//!
//! The request locale comes from the `locale` query parameter, then the
//! `language` cookie, then the configured default.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use folio_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         content_dir: PathBuf::from("content"),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use folio_site::{DEFAULT_LOCALE, Library};
use folio_storage::Storage;
use folio_storage_fs::{DEFAULT_EXTENSION, FsStorage};
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Content directory with one subdirectory per locale.
    pub content_dir: PathBuf,
    /// Chapter file extension, without the dot.
    pub extension: String,
    /// Configured locales.
    pub locales: Vec<String>,
    /// Locale used when a request names none.
    pub default_locale: String,
    /// Application version (mixed into `ETag`s).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
            content_dir: PathBuf::from("content"),
            extension: DEFAULT_EXTENSION.to_owned(),
            locales: vec![DEFAULT_LOCALE.to_owned()],
            default_locale: DEFAULT_LOCALE.to_owned(),
            version: String::new(),
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the address is invalid or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage: Arc<dyn Storage> = Arc::new(FsStorage::with_extension(
        config.content_dir.clone(),
        &config.extension,
    ));
    let library = Library::new(storage).with_locales(config.locales, config.default_locale);

    let state = Arc::new(AppState {
        library,
        version: config.version,
    });
    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(
        address = %addr,
        content_dir = %config.content_dir.display(),
        "Starting server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Folio config.
///
/// # Arguments
///
/// * `config` - Folio configuration
/// * `version` - Application version
#[must_use]
pub fn server_config_from_config(config: &folio_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        content_dir: config.content_resolved.dir.clone(),
        extension: config.content_resolved.extension.clone(),
        locales: config.i18n.locales.clone(),
        default_locale: config.i18n.default_locale.clone(),
        version,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.port, 3000);
        assert_eq!(config.extension, "mdx");
        assert_eq!(config.locales, vec!["en".to_owned()]);
        assert_eq!(config.default_locale, "en");
    }

    #[test]
    fn test_server_config_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(
            &path,
            "[server]\nport = 8080\n\n[content]\ndir = \"book\"\nextension = \".md\"\n\n\
             [i18n]\nlocales = [\"lo\", \"en\"]\ndefault_locale = \"lo\"\n",
        )
        .unwrap();
        let config = folio_config::Config::load(Some(&path), None).unwrap();

        let server = server_config_from_config(&config, "1.2.3".to_owned());

        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 8080);
        assert_eq!(server.content_dir, dir.path().join("book"));
        assert_eq!(server.extension, "md");
        assert_eq!(server.locales, vec!["lo".to_owned(), "en".to_owned()]);
        assert_eq!(server.default_locale, "lo");
        assert_eq!(server.version, "1.2.3");
    }
}
