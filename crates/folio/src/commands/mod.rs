//! CLI command implementations.

pub(crate) mod chapters;
pub(crate) mod serve;
pub(crate) mod slugs;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_site::Library;
use folio_storage::Storage;
use folio_storage_fs::FsStorage;

use crate::error::CliError;

pub(crate) use chapters::ChaptersArgs;
pub(crate) use serve::ServeArgs;
pub(crate) use slugs::SlugsArgs;

/// Arguments shared by commands that read content.
#[derive(Args)]
pub(crate) struct ContentArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content directory (overrides config).
    #[arg(short = 'd', long, env = "FOLIO_CONTENT_DIR")]
    content_dir: Option<PathBuf>,
}

impl ContentArgs {
    /// Load configuration, applying the content directory override.
    fn load(&self, settings: CliSettings) -> Result<Config, CliError> {
        let settings = CliSettings {
            content_dir: self.content_dir.clone(),
            ..settings
        };
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }
}

/// Open the content store and chapter library described by `config`.
fn open_library(config: &Config) -> (Arc<dyn Storage>, Library) {
    let storage: Arc<dyn Storage> = Arc::new(FsStorage::with_extension(
        config.content_resolved.dir.clone(),
        &config.content_resolved.extension,
    ));
    let library = Library::new(Arc::clone(&storage)).with_locales(
        config.i18n.locales.clone(),
        config.i18n.default_locale.clone(),
    );
    (storage, library)
}
