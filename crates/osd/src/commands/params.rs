//! `osd params` command implementation.

use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the params command.
#[derive(Args)]
pub(crate) struct ParamsArgs {
    /// URL whose query component to decode.
    url: String,
}

impl ParamsArgs {
    /// Execute the params command.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL has no query component.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let params = osd_query::decode(&self.url)?;
        output.json(&params)?;
        Ok(())
    }
}
