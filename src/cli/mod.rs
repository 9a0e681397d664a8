//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Workspace setup | `init` |
//! | Component | Editing the list | `add`, `update`, `delete`, `pin`, `move` |
//! | Document | Derived outputs | `index`, `assemble` |
//! | Snapshot | Save/load `.sns` files | `snapshot save`, `snapshot load` |
//! | Preference | Theme | `theme toggle` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output, including every registry
//! change:
//! ```bash
//! rwi --verbose move intro up
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod component;
mod document;
mod snapshot_cmd;
mod theme_cmd;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
