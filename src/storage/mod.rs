//! # Storage Layer
//!
//! Persistence for the RWI builder.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Components | JSON array (snapshot) | `.rwi/components.sns` |
//! | Workspace config | TOML | `.rwi/config.toml` |
//! | Theme preference | TOML | `<config dir>/config.toml` |
//!
//! Snapshot writes are atomic (temp file + rename) and locked with `fs2`.
//!
//! ## Workspace Structure
//!
//! ```text
//! .rwi/
//! ├── components.sns        # Working snapshot
//! ├── config.toml           # Workspace configuration
//! └── .gitignore            # Ignores interrupted-save temp files
//! ```
//!
//! ## Key Types
//!
//! - [`Workspace`] - Entry point for accessing a workspace
//! - [`SnapshotStore`] - Read/write `.sns` snapshot files
//! - [`Config`] - Workspace and global configuration

mod config;
mod snapshot;
mod workspace;

pub use config::{
    AssembleConfig, Config, ConfigError, GlobalConfig, OutputFormat, WorkspaceConfig,
    CONFIG_DIR_ENV,
};
pub use snapshot::{default_export_name, SnapshotStore, SNAPSHOT_EXTENSION, WORKING_SNAPSHOT};
pub use workspace::{Workspace, WorkspaceError};
