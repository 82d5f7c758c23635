//! `osd tags` command implementation.

use clap::Args;
use osd_site::{ArticleIndex, flatten};
use serde_json::Value;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tags command.
#[derive(Args)]
pub(crate) struct TagsArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// List the articles carrying this tag instead of the tag summary.
    #[arg(short, long)]
    tag: Option<String>,
}

impl TagsArgs {
    /// Execute the tags command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or a sidebar group has no items.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let index = self.index()?;

        let report = self.report(&index)?;
        if let Some(message) = self.empty_message(&report) {
            output.warning(&message);
        }

        output.json(&report)?;
        Ok(())
    }

    fn index(&self) -> Result<ArticleIndex, CliError> {
        let config = self.config.load()?;
        Ok(ArticleIndex::new(flatten(&config.navigation())?))
    }

    /// Tag summary, or the articles carrying the requested tag.
    fn report(&self, index: &ArticleIndex) -> Result<Value, CliError> {
        let report = match self.tag.as_deref() {
            Some(tag) => serde_json::to_value(index.with_tag(tag).collect::<Vec<_>>())?,
            None => serde_json::to_value(index.tags())?,
        };
        Ok(report)
    }

    /// Warning to show when the report is empty.
    fn empty_message(&self, report: &Value) -> Option<String> {
        if !report.as_array().is_some_and(Vec::is_empty) {
            return None;
        }
        Some(match self.tag.as_deref() {
            Some(tag) => format!("No articles tagged '{tag}'"),
            None => "No tags declared in sidebar".to_owned(),
        })
    }
}
