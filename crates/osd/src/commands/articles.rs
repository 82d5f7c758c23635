//! `osd articles` command implementation.

use clap::Args;
use osd_config::Config;
use osd_site::{ContentRecord, flatten, flatten_nested};
use serde_json::Value;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Record attribute holding the "edit this page" URL.
const EDIT_LINK_KEY: &str = "editLink";

/// Arguments for the articles command.
#[derive(Args)]
pub(crate) struct ArticlesArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Also list entries nested below group entries.
    #[arg(long)]
    nested: bool,

    /// Leave out heading entries that have no page.
    #[arg(long)]
    pages_only: bool,

    /// Add an `editLink` URL to every page record (requires [edit_link]).
    #[arg(long)]
    edit_links: bool,
}

impl ArticlesArgs {
    /// Execute the articles command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or a sidebar group has no items.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load()?;

        let records = self.records(&config)?;

        output.json(&records)?;
        output.success(&format!(
            "{} articles from {} sidebar groups",
            records.len(),
            config.navigation().len()
        ));
        Ok(())
    }

    /// Flatten the configured sidebar according to the flags.
    fn records(&self, config: &Config) -> Result<Vec<ContentRecord>, CliError> {
        let navigation = config.navigation();

        let records = if self.nested {
            flatten_nested(&navigation)?
        } else {
            flatten(&navigation)?
        };
        let mut records = select(records, self.pages_only);

        if self.edit_links {
            let edit_link = config.edit_link.as_ref().ok_or_else(|| {
                CliError::Validation("--edit-links requires an [edit_link] section".to_owned())
            })?;
            for record in &mut records {
                if let Some(url) = record
                    .link
                    .as_deref()
                    .and_then(|link| edit_link.url_for_route(link))
                {
                    record.extra.insert(EDIT_LINK_KEY.to_owned(), Value::String(url));
                }
            }
        }

        tracing::info!(
            groups = navigation.len(),
            records = records.len(),
            nested = self.nested,
            "Flattened sidebar"
        );

        Ok(records)
    }
}

/// Drop heading records when only pages are wanted.
fn select(records: Vec<ContentRecord>, pages_only: bool) -> Vec<ContentRecord> {
    if pages_only {
        records.into_iter().filter(|r| !r.is_heading()).collect()
    } else {
        records
    }
}
