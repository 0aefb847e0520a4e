//! Progress Store
//!
//! The single owner of learner progress: mutators, change events, and
//! background persistence.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod event;
mod persister;
pub mod store;

pub use config::{StoreConfig, UnknownModulePolicy};
pub use error::{ProgressError, Result};
pub use event::ProgressEvent;
pub use store::{ProgressStore, StoreBuilder};
