// File identity: workspace-relative paths in the form `./dir/file.ext`.
//
// The backend keys every resource by the path string it was given, so the
// client must hand it the exact same spelling every time. All file-scoped
// operations and cache lookups go through `FileId`.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FileIdError {
    #[error("path is empty")]
    Empty,

    #[error("path escapes the workspace root: {0}")]
    Traversal(String),

    #[error("path contains null byte")]
    NullByte,

    #[error("path is not valid UTF-8")]
    NonUtf8,

    #[error("path is not inside the workspace root")]
    OutsideWorkspace,
}

/// Normalized identity of a file inside the active workspace.
///
/// Two identities are equal iff their normalized strings are equal:
/// forward slashes only, consecutive separators collapsed, `.` segments
/// dropped, and a `./` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    /// Normalize a workspace-relative path into a file identity.
    ///
    /// Rules:
    /// - Convert all separators to `/`
    /// - Collapse consecutive `/` into one
    /// - Drop `.` segments (so `./a/b` and `a/b` are the same identity)
    /// - Reject `..` segments, null bytes, and empty paths
    /// - Prefix the result with `./`
    pub fn parse(input: &str) -> Result<Self, FileIdError> {
        if input.is_empty() {
            return Err(FileIdError::Empty);
        }

        if input.contains('\0') {
            return Err(FileIdError::NullByte);
        }

        let unified = input.replace('\\', "/");
        let components: Vec<&str> =
            unified.split('/').filter(|s| !s.is_empty() && *s != ".").collect();

        if components.is_empty() {
            return Err(FileIdError::Empty);
        }

        for component in &components {
            if *component == ".." {
                return Err(FileIdError::Traversal(input.to_string()));
            }
        }

        Ok(Self(format!("./{}", components.join("/"))))
    }

    /// Identity of `file` relative to `workspace_root`. Both are expected to
    /// be absolute; `file` must live under the root.
    pub fn from_workspace(workspace_root: &Path, file: &Path) -> Result<Self, FileIdError> {
        let relative =
            file.strip_prefix(workspace_root).map_err(|_| FileIdError::OutsideWorkspace)?;
        let relative = relative.to_str().ok_or(FileIdError::NonUtf8)?;
        Self::parse(relative)
    }

    /// The normalized string, exactly as passed to the backend.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn simple_path_gets_dot_slash_prefix() {
        assert_eq!(FileId::parse("docs/readme.md").unwrap().as_str(), "./docs/readme.md");
    }

    #[test]
    fn backslashes_become_forward_slashes() {
        assert_eq!(FileId::parse("docs\\notes\\file.md").unwrap().as_str(), "./docs/notes/file.md");
    }

    #[test]
    fn consecutive_slashes_collapse() {
        assert_eq!(FileId::parse("docs///nested//file.md").unwrap().as_str(), "./docs/nested/file.md");
    }

    #[test]
    fn existing_dot_slash_prefix_is_idempotent() {
        assert_eq!(FileId::parse("./docs/file.md").unwrap(), FileId::parse("docs/file.md").unwrap());
    }

    #[test]
    fn dot_segments_are_dropped() {
        assert_eq!(FileId::parse("docs/./file.md").unwrap().as_str(), "./docs/file.md");
    }

    #[test]
    fn single_filename() {
        assert_eq!(FileId::parse("readme.md").unwrap().as_str(), "./readme.md");
    }

    #[test]
    fn equality_is_by_normalized_string() {
        let a = FileId::parse("a\\b//c.md").unwrap();
        let b = FileId::parse("./a/b/c.md").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(FileId::parse(""), Err(FileIdError::Empty));
        assert_eq!(FileId::parse("././."), Err(FileIdError::Empty));
    }

    #[test]
    fn rejects_traversal() {
        assert!(matches!(FileId::parse("docs/../etc/passwd"), Err(FileIdError::Traversal(_))));
    }

    #[test]
    fn rejects_null_byte() {
        assert_eq!(FileId::parse("docs/file\0.md"), Err(FileIdError::NullByte));
    }

    #[test]
    fn dotfiles_are_allowed() {
        assert_eq!(FileId::parse(".gitignore").unwrap().as_str(), "./.gitignore");
    }

    #[test]
    fn from_workspace_strips_the_root() {
        let root = PathBuf::from("/home/user/project");
        let file = PathBuf::from("/home/user/project/src/lib.rs");
        assert_eq!(FileId::from_workspace(&root, &file).unwrap().as_str(), "./src/lib.rs");
    }

    #[test]
    fn from_workspace_rejects_outside_file() {
        let root = PathBuf::from("/home/user/project");
        let file = PathBuf::from("/home/user/other/file.rs");
        assert_eq!(FileId::from_workspace(&root, &file), Err(FileIdError::OutsideWorkspace));
    }
}
