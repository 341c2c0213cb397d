// `tagline annotate` — tag occurrences in a file's text.
//
// Same scan the editor decorations use, surfaced for scripted checks. This
// is an explicit command, so backend failures are reported instead of
// degrading to an empty result.

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use tagline_common::types::TagOccurrence;
use tagline_engine::annotate::occurrences;

use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct AnnotateArgs {
    /// Workspace-relative path of the file to scan.
    pub file: String,

    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
pub struct AnnotateResult {
    pub file: String,
    pub occurrences: Vec<Located>,
}

/// An occurrence with its 1-based line and column, for display.
#[derive(Debug, Serialize)]
pub struct Located {
    pub tag: String,
    pub line: usize,
    pub column: usize,
    pub start: usize,
    pub end: usize,
}

pub fn run(args: AnnotateArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let result = super::block_on(async {
        let text = std::fs::read_to_string(&args.file)
            .with_context(|| format!("could not read {}", args.file))?;
        let client = super::workspace_client()?;
        let tags = client.all_tags().await?;
        let located =
            occurrences(&text, &tags).into_iter().map(|o| locate(&text, o)).collect();
        anyhow::Ok(AnnotateResult { file: args.file, occurrences: located })
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

fn locate(text: &str, occurrence: TagOccurrence) -> Located {
    let (line, column) = line_col(text, occurrence.start);
    Located { tag: occurrence.tag, line, column, start: occurrence.start, end: occurrence.end }
}

/// 1-based line and column of a byte offset. Columns count characters.
fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

fn format_human(result: &AnnotateResult) -> String {
    if result.occurrences.is_empty() {
        return format!("No tag occurrences in {}.", result.file);
    }
    let mut lines = Vec::new();
    for o in &result.occurrences {
        lines.push(format!("{}:{}:{}  {}", result.file, o.line, o.column, o.tag));
    }
    lines.join("\n")
}
