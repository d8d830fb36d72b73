//! Core types shared across the tree, action log, and scoring modules.

/// NodeId: stable identifier of a virtual node, never reused within a tree
pub type NodeId = String;

/// Path: ordered name segments from the root (the root's own name first)
pub type NodePath = Vec<String>;

/// Name of the root folder every path starts with
pub const ROOT_NAME: &str = "This PC";

/// Name of the fixed folder holding soft-deleted nodes
pub const RECYCLE_BIN_NAME: &str = "Recycle Bin";

/// Build a path from string slices.
pub fn path_of(segments: &[&str]) -> NodePath {
    segments.iter().map(|s| s.to_string()).collect()
}

/// Parse a `/`-separated path as typed on the command line.
///
/// Empty segments are dropped, so `"This PC//Documents/"` and
/// `"This PC/Documents"` address the same folder.
pub fn parse_path(raw: &str) -> NodePath {
    raw.split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render a path the way `parse_path` reads it.
pub fn display_path(path: &[String]) -> String {
    path.join("/")
}
