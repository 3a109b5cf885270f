//! External service interactions
//!
//! - Filter file persistence (load/save backends)
//! - Background I/O workers
//! - Persisted settings with change subscriptions
//! - System clipboard access

pub mod backend;
pub mod clipboard;
pub mod jobs;
pub mod settings;

pub use backend::{FileBackend, FilterBackend};
pub use jobs::IoJobs;
pub use settings::{Config, SettingsStore, Subscription, ADVANCED_MODE};
