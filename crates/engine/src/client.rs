// Workspace client: the editor-facing surface over gateway and caches.
//
// Foreground operations (create, tag, untag, search) propagate `ToolError`
// for the UI to display and leave caches in their last-known state.
// Passive operations (annotation refresh) swallow backend errors and degrade
// to an empty result instead of interrupting the user.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::warn;

use tagline_common::path::FileId;
use tagline_common::types::{validate_tag_name, Suggestion, TagOccurrence};

use crate::annotate::scanner;
use crate::cache::{FileTagCache, TagCache};
use crate::complete;
use crate::config::GlobalConfig;
use crate::gateway::{CommandExecutor, CommandGateway, ToolError, ToolSettings};
use crate::invoke::{parse_lines, ToolInvocation};

/// Client for one workspace root. Process-wide state: created once at editor
/// start, lives for the process lifetime.
pub struct WorkspaceClient {
    workspace_root: PathBuf,
    gateway: CommandGateway,
    tags: TagCache,
    file_tags: FileTagCache,
}

impl WorkspaceClient {
    /// Client backed by real subprocesses, configured from the global
    /// config. Must be created inside a tokio runtime.
    pub fn new(workspace_root: PathBuf, config: &GlobalConfig) -> Self {
        Self {
            workspace_root,
            gateway: CommandGateway::new(config.tool_settings()),
            tags: TagCache::new(),
            file_tags: FileTagCache::new(),
        }
    }

    /// Client with an injected executor (tests).
    pub fn with_executor<E>(workspace_root: PathBuf, settings: ToolSettings, executor: E) -> Self
    where
        E: CommandExecutor + 'static,
    {
        Self {
            workspace_root,
            gateway: CommandGateway::with_executor(settings, executor),
            tags: TagCache::new(),
            file_tags: FileTagCache::new(),
        }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Point the gateway at a different tool directory; applies on the next
    /// call.
    pub fn set_tool_dir(&self, tool_dir: Option<PathBuf>) {
        self.gateway.set_tool_dir(tool_dir);
    }

    /// Identity of `path` under this client's workspace root.
    pub fn file_id(&self, path: &Path) -> Result<FileId, ToolError> {
        if path.is_absolute() {
            FileId::from_workspace(&self.workspace_root, path)
        } else {
            path.to_str().ok_or(tagline_common::path::FileIdError::NonUtf8).and_then(FileId::parse)
        }
        .map_err(|error| ToolError::new(error.to_string()))
    }

    // ── Workspace operations ───────────────────────────────────────

    /// Initialize the backend's workspace database. Confirmation text is
    /// returned verbatim for display.
    pub async fn init_workspace(&self) -> Result<String, ToolError> {
        self.gateway.run(ToolInvocation::init(), &self.workspace_root).await
    }

    /// All tags in the workspace, in backend output order. Cached.
    pub async fn all_tags(&self) -> Result<Vec<String>, ToolError> {
        self.tags.all(&self.gateway, &self.workspace_root).await
    }

    /// Create a tag. Validates the name locally, then defers to the backend;
    /// the tag snapshot is invalidated on success.
    pub async fn create_tag(&self, name: &str) -> Result<String, ToolError> {
        validate_tag_name(name)?;
        self.tags.create(&self.gateway, &self.workspace_root, name).await
    }

    /// Link `child` under `parent` in the backend hierarchy.
    pub async fn nest_tag(&self, child: &str, parent: &str) -> Result<String, ToolError> {
        validate_tag_name(child)?;
        validate_tag_name(parent)?;
        self.tags.nest(&self.gateway, &self.workspace_root, child, parent).await
    }

    /// Files matching a backend tag expression. The expression is opaque to
    /// the client and passed through verbatim; results are not cached.
    pub async fn search(&self, expression: &str) -> Result<Vec<String>, ToolError> {
        let output =
            self.gateway.run(ToolInvocation::files_matching(expression), &self.workspace_root).await?;
        Ok(parse_lines(&output))
    }

    // ── File operations ────────────────────────────────────────────

    /// The file's tags, in backend output order. Cached per file.
    pub async fn file_tags(&self, file: &FileId) -> Result<Vec<String>, ToolError> {
        self.file_tags.get(&self.gateway, &self.workspace_root, file).await
    }

    /// Attach a tag to a file (registering it as a resource first).
    pub async fn tag_file(&self, file: &FileId, tag: &str) -> Result<(), ToolError> {
        validate_tag_name(tag)?;
        self.file_tags.tag_file(&self.gateway, &self.workspace_root, file, tag).await
    }

    /// Fire-and-forget `tag_file`, used when a completion is accepted: the
    /// text insertion finishes immediately and the association happens
    /// behind it. Failure is reported on the standard error surface.
    pub fn tag_file_detached(self: &Arc<Self>, file: FileId, tag: String) {
        let client = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(error) = client.tag_file(&file, &tag).await {
                warn!(%file, tag, %error, "deferred tag association failed");
            }
        });
    }

    /// Remove a tag association from a file.
    pub async fn untag_file(&self, file: &FileId, tag: &str) -> Result<(), ToolError> {
        self.file_tags.untag_file(&self.gateway, &self.workspace_root, file, tag).await
    }

    // ── Editor lifecycle events ────────────────────────────────────

    pub async fn on_file_closed(&self, file: &FileId) {
        self.file_tags.on_file_closed(file).await;
    }

    pub async fn on_file_deleted(&self, file: &FileId) -> Result<(), ToolError> {
        self.file_tags.on_file_deleted(&self.gateway, &self.workspace_root, file).await
    }

    pub async fn on_file_renamed(&self, old: &FileId, new: &FileId) -> Result<(), ToolError> {
        self.file_tags.on_file_renamed(&self.gateway, &self.workspace_root, old, new).await
    }

    // ── Annotations and completions ────────────────────────────────

    /// Occurrences of workspace tags in `text`. Passive refresh path: on any
    /// backend error this reports zero occurrences, so decorations degrade
    /// to "no annotations" instead of raising during background rescans.
    pub async fn annotations(&self, text: &str) -> Vec<TagOccurrence> {
        match self.all_tags().await {
            Ok(tags) => scanner::occurrences(text, &tags),
            Err(error) => {
                warn!(%error, "annotation rescan skipped, backend unavailable");
                Vec::new()
            }
        }
    }

    /// Completion suggestions at `cursor` in `text`. `None` when the trigger
    /// is absent; an unavailable tag set behaves like an empty one, so the
    /// placeholder still opens the menu.
    pub async fn suggestions(&self, text: &str, cursor: usize) -> Option<Vec<Suggestion>> {
        if !complete::at_trigger(text, cursor) {
            return None;
        }
        let tags = self.all_tags().await.unwrap_or_default();
        complete::suggest(text, cursor, &tags)
    }
}
