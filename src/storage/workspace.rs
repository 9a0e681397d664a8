//! Workspace management
//!
//! Handles workspace initialization and provides access to the working
//! snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::{Config, SnapshotStore};
use crate::domain::Registry;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Not in an rwi workspace. Run 'rwi init' first.")]
    NotInWorkspace,
}

/// An RWI workspace
pub struct Workspace {
    root: PathBuf,
    config: Config,
}

impl Workspace {
    /// Opens an existing workspace at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(".rwi").is_dir() {
            return Err(WorkspaceError::NotInWorkspace.into());
        }

        let config = Config::for_workspace(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the workspace at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_workspace_root().ok_or(WorkspaceError::NotInWorkspace)?;

        Self::open(root)
    }

    /// Initializes a new workspace at the given path
    ///
    /// Existing files are left alone, so running this twice is harmless.
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let rwi_dir = root.join(".rwi");

        fs::create_dir_all(&rwi_dir).with_context(|| {
            format!("Failed to create .rwi directory: {}", rwi_dir.display())
        })?;

        let config_path = rwi_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r#"# RWI builder configuration

# Name of the generated index component
index_name = "rwi"

[assemble]
# Refuse to assemble when a component's content contains a delimiter
strict = false
"#;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let gitignore_path = rwi_dir.join(".gitignore");
        if !gitignore_path.exists() {
            let gitignore = r#"# Leftovers from interrupted saves
*.tmp
"#;
            fs::write(&gitignore_path, gitignore).with_context(|| {
                format!("Failed to write .gitignore: {}", gitignore_path.display())
            })?;
        }

        let workspace = Self::open(root)?;

        let store = workspace.snapshot_store();
        if !store.exists() {
            store.save(&workspace.new_registry())?;
        }

        Ok(workspace)
    }

    /// Returns the workspace root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .rwi directory path
    pub fn rwi_dir(&self) -> PathBuf {
        self.root.join(".rwi")
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the working snapshot store
    pub fn snapshot_store(&self) -> SnapshotStore {
        SnapshotStore::for_workspace(&self.root)
    }

    /// Creates an empty registry with this workspace's index name
    pub fn new_registry(&self) -> Registry {
        Registry::with_index(self.config.workspace.index_name.clone())
    }

    /// Loads the working snapshot into a registry
    pub fn load_into(&self, registry: &mut Registry) -> Result<()> {
        let store = self.snapshot_store();
        if store.exists() {
            store.load_into(registry)?;
        }
        Ok(())
    }

    /// Loads the working snapshot into a fresh registry
    pub fn load_registry(&self) -> Result<Registry> {
        let mut registry = self.new_registry();
        self.load_into(&mut registry)?;
        Ok(registry)
    }

    /// Writes the registry to the working snapshot
    ///
    /// A registry whose index was renamed by a loaded snapshot also updates
    /// `index_name` in the workspace config, so the next load finds it again.
    pub fn save_registry(&mut self, registry: &Registry) -> Result<()> {
        if registry.index_name() != self.config.workspace.index_name {
            self.config.workspace.index_name = registry.index_name().to_string();
            self.config.save_workspace()?;
        }
        self.snapshot_store().save(registry)
    }
}
