//! Document commands (index, assemble)

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use super::component::open_registry;
use super::output::Output;

/// Prints the generated index
pub fn index(output: &Output) -> Result<()> {
    let (_, registry) = open_registry(output)?;
    let index = registry
        .index()
        .ok_or_else(|| anyhow::anyhow!("Workspace has no index component"))?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "name": index.name,
            "content": index.content,
        }));
    } else {
        println!("{}", index.content);
    }

    Ok(())
}

/// Assembles the active components into one document
pub fn assemble(output: &Output, target: Option<PathBuf>, strict: bool) -> Result<()> {
    let (workspace, registry) = open_registry(output)?;
    let settings = &workspace.config().workspace.assemble;
    let strict = strict || settings.strict;

    // Configured output paths are relative to the workspace root
    let target = target.or_else(|| {
        settings
            .output
            .as_ref()
            .map(|path| workspace.root().join(path))
    });

    let collisions = registry.collisions();
    for collision in &collisions {
        output.warning(&format!(
            "content of '{}' contains delimiter '{}' of '{}'",
            collision.component, collision.delimiter, collision.owner
        ));
    }
    if strict && !collisions.is_empty() {
        anyhow::bail!(
            "Refusing to assemble: {} delimiter collision(s) found",
            collisions.len()
        );
    }

    let document = registry.assemble();
    let active = registry.active_count();
    output.verbose_ctx(
        "assemble",
        &format!("{} active components, {} bytes", active, document.len()),
    );

    match target {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&path, &document)
                .with_context(|| format!("Failed to write document: {}", path.display()))?;

            if output.is_json() {
                output.data(&serde_json::json!({
                    "path": path.display().to_string(),
                    "active": active,
                    "bytes": document.len(),
                    "collisions": collisions.len(),
                }));
            } else {
                output.success(&format!(
                    "Assembled {} components into {}",
                    active,
                    path.display()
                ));
            }
        }
        None => {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "document": document,
                    "active": active,
                    "collisions": collisions.len(),
                }));
            } else {
                print!("{}", document);
            }
        }
    }

    Ok(())
}
