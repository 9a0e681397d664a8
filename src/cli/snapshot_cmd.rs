//! Snapshot CLI commands

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Subcommand;

use super::component::open_registry;
use super::output::Output;
use crate::storage::{default_export_name, SnapshotStore, SNAPSHOT_EXTENSION};

#[derive(Subcommand)]
pub enum SnapshotCommands {
    /// Save all components to a snapshot file
    Save {
        /// Destination (defaults to a timestamped .sns file)
        path: Option<PathBuf>,
    },

    /// Replace all components with a snapshot file
    Load {
        /// Snapshot file to load
        path: PathBuf,
    },
}

pub fn run(cmd: SnapshotCommands, output: &Output) -> Result<()> {
    match cmd {
        SnapshotCommands::Save { path } => save(output, path),
        SnapshotCommands::Load { path } => load(output, path),
    }
}

fn save(output: &Output, path: Option<PathBuf>) -> Result<()> {
    let (_, registry) = open_registry(output)?;

    let mut path = path.unwrap_or_else(|| PathBuf::from(default_export_name(Local::now())));
    if path.extension().is_none() {
        path.set_extension(SNAPSHOT_EXTENSION);
    }

    SnapshotStore::new(&path).save(&registry)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "path": path.display().to_string(),
            "components": registry.len(),
        }));
    } else {
        output.success(&format!(
            "Saved {} components to {}",
            registry.len(),
            path.display()
        ));
    }

    Ok(())
}

fn load(output: &Output, path: PathBuf) -> Result<()> {
    let (mut workspace, mut registry) = open_registry(output)?;

    SnapshotStore::new(&path).load_into(&mut registry)?;
    workspace.save_registry(&registry)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "path": path.display().to_string(),
            "components": registry.len(),
            "index": registry.index_name(),
        }));
    } else {
        output.success(&format!(
            "Loaded {} components from {}",
            registry.len(),
            path.display()
        ));
    }

    Ok(())
}
