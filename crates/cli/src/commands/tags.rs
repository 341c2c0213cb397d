// `tagline tags` — list every tag in the workspace registry.

use clap::Args;
use serde::Serialize;

use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct TagsArgs {
    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
pub struct TagsResult {
    pub tags: Vec<String>,
}

pub fn run(args: TagsArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let result = super::block_on(async {
        let client = super::workspace_client()?;
        let tags = client.all_tags().await?;
        anyhow::Ok(TagsResult { tags })
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

fn format_human(result: &TagsResult) -> String {
    if result.tags.is_empty() {
        return "No tags defined.".to_string();
    }
    result.tags.join("\n")
}
