// `tagline create` — create a tag in the backend registry.

use clap::Args;
use serde::Serialize;

use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Name of the tag (whitespace-free).
    pub name: String,

    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
pub struct CreateResult {
    pub name: String,
    pub confirmation: String,
}

pub fn run(args: CreateArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let result = super::block_on(async {
        let client = super::workspace_client()?;
        let confirmation = client.create_tag(&args.name).await?;
        anyhow::Ok(CreateResult { name: args.name, confirmation })
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

fn format_human(result: &CreateResult) -> String {
    result.confirmation.trim_end().to_string()
}
