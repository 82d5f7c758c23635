//! `osd site` command implementation.

use clap::Args;
use osd_config::{Config, NavLink, SiteConfig};
use serde::Serialize;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the site command.
#[derive(Args)]
pub(crate) struct SiteArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

/// Resolved site metadata as consumed by the theme.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SiteSummary<'a> {
    #[serde(flatten)]
    site: &'a SiteConfig,
    nav: &'a [NavLink],
    #[serde(skip_serializing_if = "Option::is_none")]
    edit_link: Option<&'a str>,
    groups: usize,
    articles: usize,
}

impl<'a> SiteSummary<'a> {
    fn new(config: &'a Config) -> Self {
        let navigation = config.navigation();
        Self {
            site: &config.site,
            nav: &config.nav,
            edit_link: config.edit_link.as_ref().map(|e| e.pattern.as_str()),
            groups: navigation.len(),
            articles: navigation.entry_count(),
        }
    }
}

impl SiteArgs {
    /// Execute the site command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load()?;

        output.json(&SiteSummary::new(&config))?;
        Ok(())
    }
}
