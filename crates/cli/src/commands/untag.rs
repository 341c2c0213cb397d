// `tagline untag` — remove a tag association from a file.

use clap::Args;
use serde::Serialize;

use tagline_common::path::FileId;

use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct UntagArgs {
    /// Workspace-relative path of the file.
    pub file: String,

    /// Tag to remove.
    pub tag: String,

    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
pub struct UntagResult {
    pub file: FileId,
    pub tag: String,
}

pub fn run(args: UntagArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let result = super::block_on(async {
        let file = FileId::parse(&args.file)?;
        let client = super::workspace_client()?;
        client.untag_file(&file, &args.tag).await?;
        anyhow::Ok(UntagResult { file, tag: args.tag })
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

fn format_human(result: &UntagResult) -> String {
    format!("Removed {} from {}.", result.tag, result.file)
}
