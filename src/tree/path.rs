//! Path resolution: walk a tree by name segments from the root

use crate::tree::node::Node;
use crate::types::{NodePath, RECYCLE_BIN_NAME, ROOT_NAME};

/// Resolve a full path (root name first) to a node.
///
/// Returns `None` when the path is empty, when its first segment is not the
/// root's name, or when any later segment has no matching child.
pub fn resolve<'a>(root: &'a Node, path: &[String]) -> Option<&'a Node> {
    let (first, rest) = path.split_first()?;
    if first != root.name() {
        return None;
    }
    let mut current = root;
    for segment in rest {
        current = current.child(segment)?;
    }
    Some(current)
}

pub(crate) fn resolve_mut<'a>(root: &'a mut Node, path: &[String]) -> Option<&'a mut Node> {
    let (first, rest) = path.split_first()?;
    if first != root.name() {
        return None;
    }
    let mut current = root;
    for segment in rest {
        current = current
            .children_mut()?
            .iter_mut()
            .find(|c| c.name() == segment.as_str())?;
    }
    Some(current)
}

/// Parent path, or `None` for the root path (and the empty path)
pub fn parent_of(path: &[String]) -> Option<&[String]> {
    match path.len() {
        0 | 1 => None,
        n => Some(&path[..n - 1]),
    }
}

/// Segment-wise prefix test: `["a", "b"]` is a prefix of `["a", "b", "c"]`
/// but `["a", "b"]` is not a prefix of `["a", "bc"]`.
pub fn is_prefix(prefix: &[String], path: &[String]) -> bool {
    prefix.len() <= path.len() && prefix.iter().zip(path).all(|(a, b)| a == b)
}

/// Fixed location of the Recycle Bin
pub fn recycle_bin_path() -> NodePath {
    vec![ROOT_NAME.to_string(), RECYCLE_BIN_NAME.to_string()]
}

/// True if the path is the Recycle Bin or passes through it
pub fn is_in_recycle_bin(path: &[String]) -> bool {
    is_prefix(&recycle_bin_path(), path)
}

/// Every path reachable from `root`, in pre-order
pub fn all_paths(root: &Node) -> Vec<NodePath> {
    fn walk(node: &Node, current: &mut NodePath, out: &mut Vec<NodePath>) {
        current.push(node.name().to_string());
        out.push(current.clone());
        if let Some(children) = node.children() {
            for child in children {
                walk(child, current, out);
            }
        }
        current.pop();
    }

    let mut out = Vec::new();
    walk(root, &mut Vec::new(), &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::path_of;

    fn tree() -> Node {
        Node::folder(
            "this-pc",
            "This PC",
            vec![
                Node::folder(
                    "documents",
                    "Documents",
                    vec![Node::folder("work", "Work", vec![])],
                ),
                Node::folder("recycle-bin", "Recycle Bin", vec![]),
            ],
        )
    }

    #[test]
    fn test_resolve_walks_segments() {
        let t = tree();
        let node = resolve(&t, &path_of(&["This PC", "Documents", "Work"])).unwrap();
        assert_eq!(node.id(), "work");
        assert_eq!(resolve(&t, &path_of(&["This PC"])).unwrap().id(), "this-pc");
    }

    #[test]
    fn test_resolve_not_found_cases() {
        let t = tree();
        assert!(resolve(&t, &[]).is_none());
        assert!(resolve(&t, &path_of(&["Other PC"])).is_none());
        assert!(resolve(&t, &path_of(&["This PC", "Missing"])).is_none());
        assert!(resolve(&t, &path_of(&["This PC", "Documents", "Work", "deeper"])).is_none());
    }

    #[test]
    fn test_prefix_is_segment_wise() {
        let ab = path_of(&["a", "b"]);
        assert!(is_prefix(&ab, &path_of(&["a", "b", "c"])));
        assert!(is_prefix(&ab, &ab));
        assert!(!is_prefix(&ab, &path_of(&["a", "bc"])));
        assert!(!is_prefix(&ab, &path_of(&["a"])));
    }

    #[test]
    fn test_parent_of() {
        assert_eq!(parent_of(&path_of(&["a", "b"])), Some(&path_of(&["a"])[..]));
        assert_eq!(parent_of(&path_of(&["a"])), None);
    }

    #[test]
    fn test_all_paths_resolve_round_trip() {
        let t = tree();
        let paths = all_paths(&t);
        assert_eq!(paths.len(), t.count());
        for p in paths {
            let node = resolve(&t, &p).unwrap();
            assert_eq!(node.name(), p.last().unwrap());
        }
    }
}
