//! `folio chapters` command implementation.

use clap::Args;
use folio_config::CliSettings;
use folio_site::ChapterMeta;
use serde_json::json;

use super::{ContentArgs, open_library};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the chapters command.
#[derive(Args)]
pub(crate) struct ChaptersArgs {
    #[command(flatten)]
    content: ContentArgs,

    /// Locale to list (default: every configured locale).
    #[arg(short, long)]
    locale: Option<String>,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

impl ChaptersArgs {
    /// Execute the chapters command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or content cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.content.load(CliSettings::default())?;
        let (storage, library) = open_library(&config);

        let locales = match &self.locale {
            Some(locale) => vec![locale.clone()],
            None => library.locales().to_vec(),
        };

        // Locale directories nobody will query
        for present in storage.locales()? {
            if !library.locales().contains(&present) {
                output.warning(&format!(
                    "Locale directory '{present}' is not listed in i18n.locales"
                ));
            }
        }

        let mut listings = Vec::with_capacity(locales.len());
        for locale in locales {
            let chapters = library.list_chapters(&locale)?;
            listings.push((locale, chapters));
        }

        if self.json {
            let value: Vec<_> = listings
                .iter()
                .map(|(locale, chapters)| json!({"locale": locale, "chapters": chapters}))
                .collect();
            output.data(&serde_json::to_string_pretty(&value)?);
            return Ok(());
        }

        for (locale, chapters) in &listings {
            output.highlight(&format!("{locale} ({} chapters)", chapters.len()));
            for chapter in chapters {
                output.data(&format_row(chapter));
                if !chapter.description.is_empty() {
                    output.data_dim(&format!("{:>6}  {}", "", chapter.description));
                }
            }
        }

        Ok(())
    }
}

/// Format a chapter as a table row: order, slug and title.
fn format_row(chapter: &ChapterMeta) -> String {
    format!("{:>6}  {:<24} {}", chapter.order, chapter.slug, chapter.title)
}
