//! Filehunt: File-Finding Drill Engine
//!
//! A virtual file explorer (copy-on-write tree, path resolution, search)
//! plus an action log that is scored live and evaluated once when the drill
//! ends.

pub mod action;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod report;
pub mod scoring;
pub mod session;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;
