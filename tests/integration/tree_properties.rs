use chrono::{TimeZone, Utc};
use filehunt::error::NoOpReason;
use filehunt::tree::path::all_paths;
use filehunt::tree::{
    add_node, is_in_recycle_bin, recycle_bin_path, resolve, restore_node, search, seed_tree,
    soft_delete_node, Node,
};
use filehunt::types::{NodePath, ROOT_NAME};
use proptest::prelude::*;
use proptest::sample::Index;
use std::collections::HashSet;

fn tree(seed: u64) -> Node {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    seed_tree(now, seed)
}

fn movable_paths(tree: &Node) -> Vec<NodePath> {
    all_paths(tree)
        .into_iter()
        .filter(|p| p.len() > 1 && !is_in_recycle_bin(p))
        .collect()
}

fn assert_unique_siblings(node: &Node) {
    if let Some(children) = node.children() {
        let mut names = HashSet::new();
        for child in children {
            assert!(names.insert(child.name()), "duplicate name {}", child.name());
            assert_unique_siblings(child);
        }
    }
}

proptest! {
    #[test]
    fn seeded_tree_has_unique_siblings(seed in any::<u64>()) {
        assert_unique_siblings(&tree(seed));
    }

    #[test]
    fn every_path_resolves_to_its_last_segment(seed in any::<u64>()) {
        let tree = tree(seed);
        for path in all_paths(&tree) {
            let node = resolve(&tree, &path);
            prop_assert!(node.is_some());
            prop_assert_eq!(node.unwrap().name(), path.last().unwrap().as_str());
        }
    }

    #[test]
    fn adding_an_existing_name_is_a_no_op(seed in any::<u64>(), pick in any::<Index>()) {
        let tree = tree(seed);
        let paths = movable_paths(&tree);
        let path = pick.get(&paths);
        let parent = &path[..path.len() - 1];
        let clash = Node::folder("clash", path.last().unwrap().as_str(), Vec::new());
        prop_assert_eq!(add_node(&tree, parent, clash), Err(NoOpReason::DuplicateName));
    }

    #[test]
    fn delete_then_restore_round_trips(seed in any::<u64>(), pick in any::<Index>()) {
        let original = tree(seed);
        let paths = movable_paths(&original);
        let path = pick.get(&paths).clone();

        let deleted = soft_delete_node(&original, &path).unwrap();
        prop_assert!(resolve(&deleted, &path).is_none());
        let mut in_bin = recycle_bin_path();
        in_bin.push(path.last().unwrap().clone());
        prop_assert_eq!(
            resolve(&deleted, &in_bin).unwrap().original_path(),
            Some(&path)
        );

        let restored = restore_node(&deleted, &in_bin).unwrap();
        prop_assert!(restored.same_structure(&original));
        prop_assert!(resolve(&original, &path).is_some());
    }

    #[test]
    fn search_never_returns_root_or_bin_residents(seed in any::<u64>(), pick in any::<Index>()) {
        let original = tree(seed);
        let paths = movable_paths(&original);
        let path = pick.get(&paths).clone();
        let deleted = soft_delete_node(&original, &path).unwrap();

        let name = path.last().unwrap().clone();
        for hit in search(&deleted, &name) {
            prop_assert!(hit.path.len() > 1);
            prop_assert!(!is_in_recycle_bin(&hit.path));
        }
        prop_assert!(search(&deleted, ROOT_NAME).iter().all(|h| h.path.len() > 1));
    }
}
