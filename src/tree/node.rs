//! Virtual node types: files, folders, and drives

use crate::types::{NodeId, NodePath};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Known file kinds in the simulated explorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Pdf,
    Spreadsheet,
    Word,
    Png,
    Jpg,
    Text,
}

impl FileKind {
    pub const ALL: [FileKind; 6] = [
        FileKind::Pdf,
        FileKind::Spreadsheet,
        FileKind::Word,
        FileKind::Png,
        FileKind::Jpg,
        FileKind::Text,
    ];

    /// File name extension used for generated names
    pub fn extension(self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Spreadsheet => "xlsx",
            FileKind::Word => "docx",
            FileKind::Png => "png",
            FileKind::Jpg => "jpg",
            FileKind::Text => "txt",
        }
    }

    pub fn is_image(self) -> bool {
        matches!(self, FileKind::Png | FileKind::Jpg)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for FileKind {
    type Err = String;

    /// Accepts either the kind name or its extension (`spreadsheet` or `xlsx`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(FileKind::Pdf),
            "spreadsheet" | "xlsx" | "excel" => Ok(FileKind::Spreadsheet),
            "word" | "docx" => Ok(FileKind::Word),
            "png" => Ok(FileKind::Png),
            "jpg" | "jpeg" => Ok(FileKind::Jpg),
            "text" | "txt" => Ok(FileKind::Text),
            other => Err(format!(
                "Invalid file kind: {} (must be pdf, xlsx, docx, png, jpg or txt)",
                other
            )),
        }
    }
}

/// File leaf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    pub id: NodeId,
    pub name: String,
    pub kind: FileKind,
    pub size_kb: u64,
    pub modified_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_path: Option<NodePath>,
}

/// Folder or drive contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderNode {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_path: Option<NodePath>,
}

/// Node in the virtual hierarchy
///
/// Folders and drives behave identically; the tag only changes how the
/// node is presented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    File(FileNode),
    Folder(FolderNode),
    Drive(FolderNode),
}

impl Node {
    pub fn file(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        kind: FileKind,
        size_kb: u64,
        modified_at: DateTime<Utc>,
    ) -> Self {
        Node::File(FileNode {
            id: id.into(),
            name: name.into(),
            kind,
            size_kb,
            modified_at,
            original_path: None,
        })
    }

    pub fn folder(id: impl Into<NodeId>, name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Folder(FolderNode {
            id: id.into(),
            name: name.into(),
            children,
            original_path: None,
        })
    }

    pub fn drive(id: impl Into<NodeId>, name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Drive(FolderNode {
            id: id.into(),
            name: name.into(),
            children,
            original_path: None,
        })
    }

    pub fn id(&self) -> &str {
        match self {
            Node::File(f) => &f.id,
            Node::Folder(d) | Node::Drive(d) => &d.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::File(f) => &f.name,
            Node::Folder(d) | Node::Drive(d) => &d.name,
        }
    }

    pub(crate) fn set_name(&mut self, name: String) {
        match self {
            Node::File(f) => f.name = name,
            Node::Folder(d) | Node::Drive(d) => d.name = name,
        }
    }

    /// Pre-delete location, present only while the node sits in the Recycle Bin
    pub fn original_path(&self) -> Option<&NodePath> {
        match self {
            Node::File(f) => f.original_path.as_ref(),
            Node::Folder(d) | Node::Drive(d) => d.original_path.as_ref(),
        }
    }

    pub(crate) fn set_original_path(&mut self, path: Option<NodePath>) {
        match self {
            Node::File(f) => f.original_path = path,
            Node::Folder(d) | Node::Drive(d) => d.original_path = path,
        }
    }

    pub fn is_container(&self) -> bool {
        !matches!(self, Node::File(_))
    }

    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            Node::File(f) => Some(f),
            _ => None,
        }
    }

    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::File(_) => None,
            Node::Folder(d) | Node::Drive(d) => Some(&d.children),
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::File(_) => None,
            Node::Folder(d) | Node::Drive(d) => Some(&mut d.children),
        }
    }

    /// Direct child by name
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children()?.iter().find(|c| c.name() == name)
    }

    pub fn has_child_named(&self, name: &str) -> bool {
        self.child(name).is_some()
    }

    /// Short label for listings: the file extension, `folder`, or `drive`.
    pub fn type_label(&self) -> &'static str {
        match self {
            Node::File(f) => f.kind.extension(),
            Node::Folder(_) => "folder",
            Node::Drive(_) => "drive",
        }
    }

    /// Total number of nodes in this subtree, including itself
    pub fn count(&self) -> usize {
        1 + self
            .children()
            .map(|cs| cs.iter().map(Node::count).sum())
            .unwrap_or(0)
    }

    /// Structural equality that ignores sibling order.
    ///
    /// Child order is display order only, so two trees holding the same nodes
    /// under the same parents are considered the same tree.
    pub fn same_structure(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::File(a), Node::File(b)) => a == b,
            (Node::Folder(a), Node::Folder(b)) | (Node::Drive(a), Node::Drive(b)) => {
                a.id == b.id
                    && a.name == b.name
                    && a.original_path == b.original_path
                    && a.children.len() == b.children.len()
                    && a.children.iter().all(|child| {
                        b.children
                            .iter()
                            .find(|c| c.id() == child.id())
                            .is_some_and(|c| child.same_structure(c))
                    })
            }
            _ => false,
        }
    }
}
