//! Storage abstraction and implementations for Learnpath.
//!
//! This crate provides a trait-based persistence interface for the progress
//! state, with a JSON file implementation and an in-memory one.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;

pub use trait_::{ProgressStorage, StorageError, Result, DEFAULT_STORAGE_KEY};
pub use json_storage::JsonStorage;
pub use memory::MemoryStorage;
