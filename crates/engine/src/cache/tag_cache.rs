// Workspace-wide tag snapshot: a single cache entry, filled on miss.

use std::path::Path;

use tokio::sync::Mutex;
use tracing::debug;

use crate::gateway::{CommandGateway, ToolError};
use crate::invoke::{parse_lines, ToolInvocation};

/// Cache of the full tag set for the workspace.
///
/// The snapshot reflects the registry as of the last successful listing call.
/// Any tag-creating mutation invalidates it outright; the client never
/// patches the snapshot, since the backend may reject, normalize, or
/// deduplicate names.
#[derive(Default)]
pub struct TagCache {
    // Held across the fill, so concurrent misses are single-flight: the
    // second caller waits on the lock and then reads the populated entry
    // instead of issuing a duplicate listing call.
    snapshot: Mutex<Option<Vec<String>>>,
}

impl TagCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tag snapshot, in backend output order. Issues a listing call only
    /// when the cache is absent or invalidated.
    pub async fn all(
        &self,
        gateway: &CommandGateway,
        workspace_root: &Path,
    ) -> Result<Vec<String>, ToolError> {
        let mut snapshot = self.snapshot.lock().await;
        if let Some(tags) = snapshot.as_ref() {
            return Ok(tags.clone());
        }

        let output = gateway.run(ToolInvocation::list_tags(), workspace_root).await?;
        let tags = parse_lines(&output);
        *snapshot = Some(tags.clone());
        Ok(tags)
    }

    /// Clear the snapshot unconditionally. The next read re-fetches.
    pub async fn invalidate(&self) {
        self.snapshot.lock().await.take();
        debug!("tag cache invalidated");
    }

    /// Create a tag in the registry. On success the snapshot is invalidated
    /// and the backend's confirmation text is returned verbatim; on failure
    /// the cache is left untouched.
    pub async fn create(
        &self,
        gateway: &CommandGateway,
        workspace_root: &Path,
        name: &str,
    ) -> Result<String, ToolError> {
        let confirmation = gateway.run(ToolInvocation::create_tag(name), workspace_root).await?;
        self.invalidate().await;
        Ok(confirmation)
    }

    /// Link `child` under `parent` in the backend hierarchy. The hierarchy is
    /// never cached client-side, but the listing may change shape, so the
    /// snapshot is invalidated on success.
    pub async fn nest(
        &self,
        gateway: &CommandGateway,
        workspace_root: &Path,
        child: &str,
        parent: &str,
    ) -> Result<String, ToolError> {
        let confirmation =
            gateway.run(ToolInvocation::nest_tag(child, parent), workspace_root).await?;
        self.invalidate().await;
        Ok(confirmation)
    }
}
