//! Copy-on-write tree mutation
//!
//! Every operation takes the current tree by reference and returns a new
//! tree; the input is never modified. The `*_node` variants report why a
//! gesture was a no-op, the plain variants return the unchanged tree in that
//! case.

use crate::error::NoOpReason;
use crate::tree::node::Node;
use crate::tree::path::{is_in_recycle_bin, parent_of, recycle_bin_path, resolve, resolve_mut};
use crate::types::{NodeId, NodePath};
use tracing::debug;

/// Result of an edit: the new tree, or the reason the tree stays as it was
pub type Edit = Result<Node, NoOpReason>;

fn or_unchanged(tree: &Node, op: &str, edit: Edit) -> Node {
    edit.unwrap_or_else(|reason| {
        debug!(op, %reason, "Tree edit was a no-op");
        tree.clone()
    })
}

/// Append `node` under `parent_path` unless a sibling already has its name.
pub fn add_node(tree: &Node, parent_path: &[String], node: Node) -> Edit {
    let parent = resolve(tree, parent_path).ok_or(NoOpReason::NotFound)?;
    if !parent.is_container() {
        return Err(NoOpReason::NotFound);
    }
    if parent.has_child_named(node.name()) {
        return Err(NoOpReason::DuplicateName);
    }

    let mut next = tree.clone();
    resolve_mut(&mut next, parent_path)
        .and_then(Node::children_mut)
        .ok_or(NoOpReason::NotFound)?
        .push(node);
    Ok(next)
}

pub fn add(tree: &Node, parent_path: &[String], node: Node) -> Node {
    or_unchanged(tree, "add", add_node(tree, parent_path, node))
}

/// "New folder" gesture: an empty folder added through `add_node`.
pub fn create_folder(tree: &Node, parent_path: &[String], name: &str, id: NodeId) -> Edit {
    add_node(tree, parent_path, Node::folder(id, name, Vec::new()))
}

/// Rename the node at `path`.
///
/// Sibling uniqueness is not re-checked here, unlike `add_node`.
pub fn rename_node(tree: &Node, path: &[String], new_name: &str) -> Edit {
    let mut next = tree.clone();
    resolve_mut(&mut next, path)
        .ok_or(NoOpReason::NotFound)?
        .set_name(new_name.to_string());
    Ok(next)
}

pub fn rename(tree: &Node, path: &[String], new_name: &str) -> Node {
    or_unchanged(tree, "rename", rename_node(tree, path, new_name))
}

/// Move the node at `path` into the Recycle Bin, remembering where it was.
///
/// The Recycle Bin itself and nodes already inside it cannot be soft-deleted,
/// and a node whose name is already taken in the bin stays where it is.
pub fn soft_delete_node(tree: &Node, path: &[String]) -> Edit {
    if is_in_recycle_bin(path) {
        return Err(NoOpReason::Reserved);
    }
    let parent_path = parent_of(path).ok_or(NoOpReason::NotFound)?;
    let node = resolve(tree, path).ok_or(NoOpReason::NotFound)?;
    let bin_path = recycle_bin_path();
    let bin = resolve(tree, &bin_path).ok_or(NoOpReason::NotFound)?;
    if bin.has_child_named(node.name()) {
        return Err(NoOpReason::DuplicateName);
    }

    let mut next = tree.clone();
    let siblings = resolve_mut(&mut next, parent_path)
        .and_then(Node::children_mut)
        .ok_or(NoOpReason::NotFound)?;
    let index = siblings
        .iter()
        .position(|c| c.name() == node.name())
        .ok_or(NoOpReason::NotFound)?;
    let mut detached = siblings.remove(index);
    detached.set_original_path(Some(path.to_vec()));

    resolve_mut(&mut next, &bin_path)
        .and_then(Node::children_mut)
        .ok_or(NoOpReason::NotFound)?
        .push(detached);
    Ok(next)
}

pub fn soft_delete(tree: &Node, path: &[String]) -> Node {
    or_unchanged(tree, "soft_delete", soft_delete_node(tree, path))
}

/// Move a Recycle Bin resident back under the parent of its original path.
///
/// `bin_path` addresses the node inside the bin. If the original parent no
/// longer exists (or now holds a sibling with the same name) the node stays
/// in the bin.
pub fn restore_node(tree: &Node, bin_path: &[String]) -> Edit {
    let container = parent_of(bin_path).ok_or(NoOpReason::NotFound)?;
    if container != recycle_bin_path().as_slice() {
        return Err(NoOpReason::NotFound);
    }
    let node = resolve(tree, bin_path).ok_or(NoOpReason::NotFound)?;
    let original: NodePath = node
        .original_path()
        .cloned()
        .ok_or(NoOpReason::RestoreTargetMissing)?;
    let destination = parent_of(&original).ok_or(NoOpReason::RestoreTargetMissing)?;
    let target = resolve(tree, destination)
        .filter(|n| n.is_container())
        .ok_or(NoOpReason::RestoreTargetMissing)?;
    if target.has_child_named(node.name()) {
        return Err(NoOpReason::DuplicateName);
    }

    let mut next = tree.clone();
    let bin = resolve_mut(&mut next, container)
        .and_then(Node::children_mut)
        .ok_or(NoOpReason::NotFound)?;
    let index = bin
        .iter()
        .position(|c| c.name() == node.name())
        .ok_or(NoOpReason::NotFound)?;
    let mut restored = bin.remove(index);
    restored.set_original_path(None);

    resolve_mut(&mut next, destination)
        .and_then(Node::children_mut)
        .ok_or(NoOpReason::RestoreTargetMissing)?
        .push(restored);
    Ok(next)
}

pub fn restore(tree: &Node, bin_path: &[String]) -> Node {
    or_unchanged(tree, "restore", restore_node(tree, bin_path))
}

/// "Delete permanently": acknowledged, never removes data.
pub fn delete_permanently_node(_tree: &Node, _path: &[String]) -> Edit {
    Err(NoOpReason::Reserved)
}

pub fn delete_permanently(tree: &Node, path: &[String]) -> Node {
    or_unchanged(tree, "delete_permanently", delete_permanently_node(tree, path))
}
