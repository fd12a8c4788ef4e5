//! `folio slugs` command implementation.

use clap::Args;
use folio_config::CliSettings;

use super::{ContentArgs, open_library};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the slugs command.
#[derive(Args)]
pub(crate) struct SlugsArgs {
    #[command(flatten)]
    content: ContentArgs,

    /// Print a JSON array instead of one slug per line.
    #[arg(long)]
    json: bool,
}

impl SlugsArgs {
    /// Execute the slugs command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or content cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.content.load(CliSettings::default())?;
        let (_, library) = open_library(&config);

        let slugs = library.all_slugs()?;
        tracing::info!(count = slugs.len(), "Collected slugs");

        if self.json {
            output.data(&serde_json::to_string(&slugs)?);
        } else {
            for slug in &slugs {
                output.data(slug);
            }
        }

        Ok(())
    }
}
