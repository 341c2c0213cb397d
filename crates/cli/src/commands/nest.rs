// `tagline nest` — link a tag under a parent in the backend hierarchy.

use clap::Args;
use serde::Serialize;

use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct NestArgs {
    /// Tag to move under the parent.
    pub child: String,

    /// Parent tag.
    pub parent: String,

    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
pub struct NestResult {
    pub child: String,
    pub parent: String,
    pub confirmation: String,
}

pub fn run(args: NestArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let result = super::block_on(async {
        let client = super::workspace_client()?;
        let confirmation = client.nest_tag(&args.child, &args.parent).await?;
        anyhow::Ok(NestResult { child: args.child, parent: args.parent, confirmation })
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

fn format_human(result: &NestResult) -> String {
    let confirmation = result.confirmation.trim_end();
    if confirmation.is_empty() {
        return format!("Nested {} under {}.", result.child, result.parent);
    }
    confirmation.to_string()
}
