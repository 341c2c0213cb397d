// `tagline tag` — attach a tag to a file, registering it if needed.

use clap::Args;
use serde::Serialize;

use tagline_common::path::FileId;

use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct TagArgs {
    /// Workspace-relative path of the file.
    pub file: String,

    /// Tag to attach.
    pub tag: String,

    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
pub struct TagResult {
    pub file: FileId,
    pub tag: String,
}

pub fn run(args: TagArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let result = super::block_on(async {
        let file = FileId::parse(&args.file)?;
        let client = super::workspace_client()?;
        client.tag_file(&file, &args.tag).await?;
        anyhow::Ok(TagResult { file, tag: args.tag })
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

fn format_human(result: &TagResult) -> String {
    format!("Tagged {} with {}.", result.file, result.tag)
}
