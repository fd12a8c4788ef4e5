//! `folio serve` command implementation.

use clap::Args;
use folio_config::CliSettings;
use folio_server::{run_server, server_config_from_config};

use super::ContentArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    #[command(flatten)]
    content: ContentArgs,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.content.load(CliSettings {
            host: self.host,
            port: self.port,
            content_dir: None,
        })?;

        output.highlight(&format!(
            "Starting server on http://{}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Content directory: {}",
            config.content_resolved.dir.display()
        ));
        output.info(&format!(
            "Locales: {} (default: {})",
            config.i18n.locales.join(", "),
            config.i18n.default_locale
        ));
        if !config.content_resolved.dir.is_dir() {
            output.warning("Content directory does not exist; every listing will be empty");
        }

        let server_config = server_config_from_config(&config, version.to_owned());
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
