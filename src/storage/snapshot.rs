//! Snapshot files
//!
//! A snapshot is the full component list as a pretty-printed JSON array,
//! conventionally saved with the `.sns` extension. The workspace keeps its
//! working copy in `.rwi/components.sns`; exports and imports use the same
//! format anywhere on disk.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use fs2::FileExt;

use crate::domain::Registry;

/// File extension for snapshot files
pub const SNAPSHOT_EXTENSION: &str = "sns";

/// File name of the workspace's working snapshot
pub const WORKING_SNAPSHOT: &str = "components.sns";

/// Returns a timestamped file name for exporting a snapshot
pub fn default_export_name<Tz: TimeZone>(now: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "rwi-components-{}.{}",
        now.format("%Y%m%d-%H%M%S"),
        SNAPSHOT_EXTENSION
    )
}

/// Reads and writes snapshot files
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Creates a store for the snapshot at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the working snapshot store for a workspace
    pub fn for_workspace(workspace_root: &Path) -> Self {
        Self::new(workspace_root.join(".rwi").join(WORKING_SNAPSHOT))
    }

    /// Returns the path to the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Reads the raw snapshot text
    pub fn read_blob(&self) -> Result<String> {
        let mut file = File::open(&self.path)
            .with_context(|| format!("Failed to open snapshot: {}", self.path.display()))?;

        file.lock_shared()
            .context("Failed to acquire read lock on snapshot")?;

        let mut blob = String::new();
        file.read_to_string(&mut blob)
            .with_context(|| format!("Failed to read snapshot: {}", self.path.display()))?;

        Ok(blob)
    }

    /// Replaces the registry's contents with this snapshot
    ///
    /// The registry is untouched if reading or parsing fails.
    pub fn load_into(&self, registry: &mut Registry) -> Result<()> {
        let blob = self.read_blob()?;
        registry
            .deserialize(&blob)
            .with_context(|| format!("Failed to load snapshot: {}", self.path.display()))
    }

    /// Writes the registry as a snapshot (atomic replace)
    pub fn save(&self, registry: &Registry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }

        let blob = registry
            .serialize()
            .context("Failed to serialize components")?;

        let temp_path = self.path.with_extension(format!("{}.tmp", SNAPSHOT_EXTENSION));

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on snapshot")?;

            let mut writer = BufWriter::new(&file);
            writeln!(writer, "{}", blob).context("Failed to write snapshot")?;
            writer.flush().context("Failed to flush snapshot")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}
