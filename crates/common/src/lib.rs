//! `rc-common` -- Shared types, errors, and configuration for the recut edit engine.
//!
//! This crate is the foundation the other engine crates depend on:
//!
//! - **Types**: `TimeCode`, `TimeRange`, `format_time`, `merge_ranges`
//! - **Errors**: `EditError` (recoverable user conditions), `ConfigError`
//! - **Config**: `EditorConfig`, `DeadSpaceConfig`, `PlaybackConfig`

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{DeadSpaceConfig, EditorConfig, OverlapPolicy, PlaybackConfig};
pub use error::{ConfigError, EditError};
pub use types::{format_time, merge_ranges, TimeCode, TimeRange};
