//! Virtual file tree
//!
//! A single-rooted hierarchy of files, folders, and drives, addressed by
//! name paths. All mutation is copy-on-write: operations return a new tree
//! and leave their input valid for anyone still holding it.

pub mod listing;
pub mod node;
pub mod ops;
pub mod path;
pub mod search;
pub mod seed;

pub use listing::{
    list_folder, DateFilter, SearchFilters, SizeComparison, SizeFilter, SortKey, SortOrder,
};
pub use node::{FileKind, FileNode, FolderNode, Node};
pub use ops::{
    add, add_node, create_folder, delete_permanently, delete_permanently_node, rename,
    rename_node, restore, restore_node, soft_delete, soft_delete_node, Edit,
};
pub use path::{is_in_recycle_bin, is_prefix, parent_of, recycle_bin_path, resolve};
pub use search::{search, SearchHit};
pub use seed::{seed_tree, DEFAULT_SEED};
