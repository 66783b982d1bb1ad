//! File-backed persistence for the boardlink device target.
//!
//! Implements the core `SelectionStorePort` over a single JSON file at a
//! well-known per-user path. The format is a private detail of this
//! crate; the contract is only that one record round-trips.

pub mod file_store;
pub mod paths;

pub use file_store::FileSelectionStore;
pub use paths::{data_root, settings_path};
