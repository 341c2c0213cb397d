// Per-file tag cache: one entry per open file, evicted on mutation or close.

use std::collections::HashMap;
use std::path::Path;

use tokio::sync::Mutex;
use tracing::debug;

use tagline_common::path::FileId;

use crate::gateway::{CommandGateway, ToolError};
use crate::invoke::{parse_lines, ToolInvocation};

/// Cache of tag snapshots keyed by file identity.
///
/// An entry must never be served after its file was the target of a
/// successful tag/untag/rename/delete mutation: every mutation path here
/// evicts the identity before reporting success.
#[derive(Default)]
pub struct FileTagCache {
    // One map lock held across fills. A concurrent miss for the same file
    // waits and reads the populated entry (single-flight); misses for
    // unrelated files queue behind it too, which costs nothing extra since
    // the gateway serializes the fetches anyway.
    entries: Mutex<HashMap<FileId, Vec<String>>>,
}

impl FileTagCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The file's tag snapshot, filled on miss via the backend listing.
    pub async fn get(
        &self,
        gateway: &CommandGateway,
        workspace_root: &Path,
        file: &FileId,
    ) -> Result<Vec<String>, ToolError> {
        let mut entries = self.entries.lock().await;
        if let Some(tags) = entries.get(file) {
            return Ok(tags.clone());
        }

        let output = gateway.run(ToolInvocation::resource_tags(file), workspace_root).await?;
        let tags = parse_lines(&output);
        entries.insert(file.clone(), tags.clone());
        Ok(tags)
    }

    /// Drop the entry for `file`. A miss is a no-op, not an error.
    pub async fn invalidate(&self, file: &FileId) {
        if self.entries.lock().await.remove(file).is_some() {
            debug!(%file, "file tag cache entry evicted");
        }
    }

    /// Attach `tag` to `file`: register the file as a resource (idempotent
    /// on the backend), then link the tag. Both calls must succeed; on
    /// failure of either the operation fails as a whole and the cache entry
    /// is left untouched. The entry may then be stale, which is acceptable:
    /// the failure is surfaced to the user immediately and the next explicit
    /// read reconciles.
    pub async fn tag_file(
        &self,
        gateway: &CommandGateway,
        workspace_root: &Path,
        file: &FileId,
        tag: &str,
    ) -> Result<(), ToolError> {
        gateway.run(ToolInvocation::add_resource(file), workspace_root).await?;
        gateway.run(ToolInvocation::link(file, tag), workspace_root).await?;
        self.invalidate(file).await;
        Ok(())
    }

    /// Remove the `tag` association from `file`.
    pub async fn untag_file(
        &self,
        gateway: &CommandGateway,
        workspace_root: &Path,
        file: &FileId,
        tag: &str,
    ) -> Result<(), ToolError> {
        gateway.run(ToolInvocation::unlink(file, tag), workspace_root).await?;
        self.invalidate(file).await;
        Ok(())
    }

    /// The file was closed in the editor. Pure eviction: the entry is still
    /// correct, just no longer worth holding.
    pub async fn on_file_closed(&self, file: &FileId) {
        self.invalidate(file).await;
    }

    /// The file was deleted. Tells the backend to drop the resource, then
    /// evicts the identity regardless of the call's outcome: the file is
    /// gone either way, and the backend error (e.g. the file was never
    /// registered) is the caller's to surface or swallow.
    pub async fn on_file_deleted(
        &self,
        gateway: &CommandGateway,
        workspace_root: &Path,
        file: &FileId,
    ) -> Result<(), ToolError> {
        let outcome = gateway.run(ToolInvocation::remove_resource(file), workspace_root).await;
        self.invalidate(file).await;
        outcome.map(|_| ())
    }

    /// The file was renamed. Issues the backend move so associations follow
    /// the new path, then evicts the old identity; the new identity stays
    /// unpopulated and fills lazily. The old entry is evicted even when the
    /// move fails, since the identity no longer names a file on disk.
    pub async fn on_file_renamed(
        &self,
        gateway: &CommandGateway,
        workspace_root: &Path,
        old: &FileId,
        new: &FileId,
    ) -> Result<(), ToolError> {
        let outcome = gateway.run(ToolInvocation::move_resource(old, new), workspace_root).await;
        self.invalidate(old).await;
        outcome.map(|_| ())
    }
}
