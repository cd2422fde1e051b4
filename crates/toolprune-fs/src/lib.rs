//! Filesystem helpers for toolprune
//!
//! Provides normalized paths, whole-file text I/O with atomic replacement,
//! durable backup copies, and allow-list config loading.

pub mod backup;
pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use backup::{BACKUP_SUFFIX, backup_path, create_backup};
pub use config::{AllowListConfig, ConfigStore};
pub use error::{Error, Result};
pub use path::NormalizedPath;
