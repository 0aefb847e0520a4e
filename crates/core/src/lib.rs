//! Learnpath core data models.
//!
//! This crate defines the learner progress records, the module catalog they
//! are keyed against, and the aggregate statistics derived from them.

#![warn(missing_docs)]

// Core identities
mod id;

// Catalog of known modules
mod catalog;

// Progress records
mod progress;
mod stats;

mod clock;
mod error;

// Re-exports
pub use id::ModuleId;
pub use catalog::{Catalog, CatalogEntry, Level};
pub use progress::{ModuleProgress, ProgressState};
pub use stats::ProgressStats;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, Result};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
