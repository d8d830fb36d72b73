//! Tooling & Integration Layer
//!
//! Command-line front end over the drill session.

pub mod cli;

pub use cli::{Cli, CliContext, Commands, FilterArgs};
