// Command surface of the external `taghive` tool.
//
// One invocation per gateway call, line-oriented text I/O. Listings come
// back as newline-delimited records; init/create confirmations are shown
// to the user verbatim.

use std::fmt;

use tagline_common::path::FileId;

/// Name of the external tool binary, resolved on the search path.
pub const TOOL_BINARY: &str = "taghive";

/// A single external-tool invocation: the argument vector passed to
/// `taghive`, with the working directory supplied at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    args: Vec<String>,
}

impl ToolInvocation {
    fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { args: args.into_iter().map(Into::into).collect() }
    }

    /// Initialize the workspace tag database.
    pub fn init() -> Self {
        Self::new(["init"])
    }

    /// List every tag in the workspace registry.
    pub fn list_tags() -> Self {
        Self::new(["tags"])
    }

    /// Create a tag in the registry.
    pub fn create_tag(name: &str) -> Self {
        Self::new(["create", name])
    }

    /// Link `child` under `parent` in the backend-owned hierarchy.
    pub fn nest_tag(child: &str, parent: &str) -> Self {
        Self::new(["nest", child, parent])
    }

    /// Register a file as a trackable resource (idempotent on the backend).
    pub fn add_resource(file: &FileId) -> Self {
        Self::new(["add", file.as_str()])
    }

    /// Associate a tag with a registered resource.
    pub fn link(file: &FileId, tag: &str) -> Self {
        Self::new(["link", file.as_str(), tag])
    }

    /// Remove a tag association from a resource.
    pub fn unlink(file: &FileId, tag: &str) -> Self {
        Self::new(["unlink", file.as_str(), tag])
    }

    /// List the tags attached to a single resource.
    pub fn resource_tags(file: &FileId) -> Self {
        Self::new(["tags", file.as_str()])
    }

    /// List files matching a backend tag expression (opaque to the client).
    pub fn files_matching(expression: &str) -> Self {
        Self::new(["files", expression])
    }

    /// Tell the backend a resource moved so its associations follow.
    pub fn move_resource(old: &FileId, new: &FileId) -> Self {
        Self::new(["mv", old.as_str(), new.as_str()])
    }

    /// Drop a resource and its associations from the backend.
    pub fn remove_resource(file: &FileId) -> Self {
        Self::new(["rm", file.as_str()])
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", TOOL_BINARY, self.args.join(" "))
    }
}

/// Parse a listing response into records: non-empty trimmed lines, in the
/// backend's output order. Never fails; malformed output degrades to an
/// empty result set.
pub fn parse_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> FileId {
        FileId::parse(path).expect("test path should normalize")
    }

    #[test]
    fn file_scoped_invocations_use_the_normalized_identity() {
        let id = file("src/lib.rs");
        assert_eq!(ToolInvocation::add_resource(&id).args(), ["add", "./src/lib.rs"]);
        assert_eq!(ToolInvocation::link(&id, "rust").args(), ["link", "./src/lib.rs", "rust"]);
        assert_eq!(ToolInvocation::resource_tags(&id).args(), ["tags", "./src/lib.rs"]);
    }

    #[test]
    fn listing_all_tags_takes_no_file_argument() {
        assert_eq!(ToolInvocation::list_tags().args(), ["tags"]);
    }

    #[test]
    fn move_carries_both_identities() {
        let invocation = ToolInvocation::move_resource(&file("a.md"), &file("b.md"));
        assert_eq!(invocation.args(), ["mv", "./a.md", "./b.md"]);
    }

    #[test]
    fn display_renders_a_full_command_line() {
        assert_eq!(ToolInvocation::create_tag("urgent").to_string(), "taghive create urgent");
    }

    #[test]
    fn parse_lines_trims_and_drops_blanks() {
        let output = "alpha\n  beta  \n\n\t\ngamma\n";
        assert_eq!(parse_lines(output), ["alpha", "beta", "gamma"]);
    }

    #[test]
    fn parse_lines_preserves_backend_order() {
        assert_eq!(parse_lines("zeta\nalpha\n"), ["zeta", "alpha"]);
    }

    #[test]
    fn parse_lines_of_whitespace_only_output_is_empty() {
        assert!(parse_lines("   \n\t\n").is_empty());
        assert!(parse_lines("").is_empty());
    }
}
