//! Integration tests for the filehunt drill engine

mod cli_parsing;
mod session_end_to_end;
mod snapshot_store;
mod tree_properties;
