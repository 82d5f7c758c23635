//! CLI command implementations.

pub(crate) mod articles;
pub(crate) mod params;
pub(crate) mod site;
pub(crate) mod tags;

use std::path::PathBuf;

use clap::Args;
use osd_config::{CliSettings, Config};

use crate::error::CliError;

pub(crate) use articles::ArticlesArgs;
pub(crate) use params::ParamsArgs;
pub(crate) use site::SiteArgs;
pub(crate) use tags::TagsArgs;

/// Configuration arguments shared by commands that read `osd.toml`.
#[derive(Args, Default)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover osd.toml).
    #[arg(short, long, env = "OSD_CONFIG")]
    config: Option<PathBuf>,

    /// Site title (overrides config).
    #[arg(long)]
    title: Option<String>,

    /// Public site URL (overrides config).
    #[arg(long)]
    url: Option<String>,
}

impl ConfigArgs {
    /// Load configuration with CLI overrides applied.
    pub(crate) fn load(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            title: self.title.clone(),
            url: self.url.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        Ok(config)
    }
}
