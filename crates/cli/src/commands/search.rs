// `tagline search` — files matching a backend tag expression.
//
// The expression syntax is the backend's own (e.g. `urgent and not done`);
// the client passes it through verbatim.

use clap::Args;
use serde::Serialize;

use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Tag expression, passed to the backend unchanged.
    pub expression: String,

    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub expression: String,
    pub files: Vec<String>,
}

pub fn run(args: SearchArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let result = super::block_on(async {
        let client = super::workspace_client()?;
        let files = client.search(&args.expression).await?;
        anyhow::Ok(SearchResult { expression: args.expression, files })
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

fn format_human(result: &SearchResult) -> String {
    if result.files.is_empty() {
        return format!("No files match \"{}\".", result.expression);
    }
    result.files.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_format_lists_files() {
        let result = SearchResult {
            expression: "urgent".into(),
            files: vec!["./a.md".into(), "./b.md".into()],
        };
        assert_eq!(format_human(&result), "./a.md\n./b.md");
    }

    #[test]
    fn human_format_no_matches() {
        let result = SearchResult { expression: "urgent and done".into(), files: vec![] };
        assert_eq!(format_human(&result), "No files match \"urgent and done\".");
    }
}
