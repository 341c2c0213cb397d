// CLI subcommand dispatch.

use std::future::Future;

use anyhow::Context;
use clap::Subcommand;

use tagline_engine::client::WorkspaceClient;
use tagline_engine::config::GlobalConfig;

pub mod annotate;
pub mod create;
pub mod init;
pub mod nest;
pub mod search;
pub mod show;
pub mod tag;
pub mod tags;
pub mod untag;

#[derive(Subcommand)]
pub enum Command {
    /// Initialize the workspace tag database
    Init(init::InitArgs),
    /// List all tags in the workspace
    Tags(tags::TagsArgs),
    /// Show the tags attached to a file
    Show(show::ShowArgs),
    /// Create a tag in the registry
    Create(create::CreateArgs),
    /// Link a tag under a parent tag
    Nest(nest::NestArgs),
    /// Attach a tag to a file
    Tag(tag::TagArgs),
    /// Remove a tag from a file
    Untag(untag::UntagArgs),
    /// List files matching a tag expression
    Search(search::SearchArgs),
    /// Print tag occurrences found in a file
    Annotate(annotate::AnnotateArgs),
}

pub fn run(cmd: Command) -> anyhow::Result<()> {
    match cmd {
        Command::Init(args) => init::run(args),
        Command::Tags(args) => tags::run(args),
        Command::Show(args) => show::run(args),
        Command::Create(args) => create::run(args),
        Command::Nest(args) => nest::run(args),
        Command::Tag(args) => tag::run(args),
        Command::Untag(args) => untag::run(args),
        Command::Search(args) => search::run(args),
        Command::Annotate(args) => annotate::run(args),
    }
}

/// Run a future to completion on the ambient runtime, or a fresh
/// current-thread one when the CLI is invoked synchronously (the usual case).
pub(crate) fn block_on<F, T>(future: F) -> T
where
    F: Future<Output = T>,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => handle.block_on(future),
        Err(_) => tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime should build")
            .block_on(future),
    }
}

/// Client rooted at the current working directory, configured from
/// `~/.tagline/config.toml`. Must be called inside `block_on`.
pub(crate) fn workspace_client() -> anyhow::Result<WorkspaceClient> {
    let root = std::env::current_dir().context("could not determine working directory")?;
    Ok(WorkspaceClient::new(root, &GlobalConfig::load()))
}
