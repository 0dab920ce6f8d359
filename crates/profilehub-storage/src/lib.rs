//! # profilehub-storage
//!
//! Snapshot persistence for ProfileHub. The only backend is a single JSON
//! document on the local filesystem, replaced atomically on every save.

pub mod snapshot_file;

pub use snapshot_file::JsonFileStore;
