// `tagline show` — the tags attached to a single file.

use clap::Args;
use serde::Serialize;

use tagline_common::path::FileId;

use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Workspace-relative path of the file.
    pub file: String,

    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
pub struct ShowResult {
    pub file: FileId,
    pub tags: Vec<String>,
}

pub fn run(args: ShowArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let result = super::block_on(async {
        let file = FileId::parse(&args.file)?;
        let client = super::workspace_client()?;
        let tags = client.file_tags(&file).await?;
        anyhow::Ok(ShowResult { file, tags })
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

fn format_human(result: &ShowResult) -> String {
    if result.tags.is_empty() {
        return format!("{} has no tags.", result.file);
    }
    let mut lines = vec![format!("{}:", result.file)];
    for tag in &result.tags {
        lines.push(format!("  {tag}"));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_format_indents_tags_under_the_file() {
        let result = ShowResult {
            file: FileId::parse("docs/plan.md").unwrap(),
            tags: vec!["draft".into(), "urgent".into()],
        };
        assert_eq!(format_human(&result), "./docs/plan.md:\n  draft\n  urgent");
    }

    #[test]
    fn human_format_untagged_file() {
        let result = ShowResult { file: FileId::parse("a.md").unwrap(), tags: vec![] };
        assert_eq!(format_human(&result), "./a.md has no tags.");
    }
}
