// `tagline init` — initialize the workspace tag database.

use clap::Args;
use serde::Serialize;

use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
pub struct InitResult {
    pub confirmation: String,
}

pub fn run(args: InitArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let result = super::block_on(async {
        let client = super::workspace_client()?;
        let confirmation = client.init_workspace().await?;
        anyhow::Ok(InitResult { confirmation })
    });

    match result {
        Ok(value) => {
            output::print_output(format, &value, format_human)?;
            Ok(())
        }
        Err(e) => {
            output::print_anyhow_error(format, &e);
            Err(e)
        }
    }
}

fn format_human(result: &InitResult) -> String {
    // The backend's confirmation is shown verbatim.
    result.confirmation.trim_end().to_string()
}
