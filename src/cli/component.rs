//! Component CLI commands

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use super::output::Output;
use crate::domain::{Component, ComponentUpdate, Direction, NewComponent, Registry, RegistryError};
use crate::storage::Workspace;

/// Content taken from the command line or a file
#[derive(Args, Debug, Default)]
pub struct ContentArgs {
    /// Component content
    #[arg(long, short = 'c', conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Read component content from a file ('-' for stdin)
    #[arg(long)]
    pub content_file: Option<PathBuf>,
}

impl ContentArgs {
    fn read(&self) -> Result<Option<String>> {
        if let Some(content) = &self.content {
            return Ok(Some(content.clone()));
        }

        match &self.content_file {
            None => Ok(None),
            Some(path) if path == Path::new("-") => {
                let mut content = String::new();
                std::io::stdin()
                    .read_to_string(&mut content)
                    .context("Failed to read content from stdin")?;
                Ok(Some(content))
            }
            Some(path) => fs::read_to_string(path)
                .map(Some)
                .with_context(|| format!("Failed to read content file: {}", path.display())),
        }
    }
}

/// Opens the current workspace and loads its components
///
/// Registry changes are reported through `output` in verbose mode.
pub(super) fn open_registry(output: &Output) -> Result<(Workspace, Registry)> {
    let workspace = Workspace::open_current()?;
    output.verbose_ctx(
        "workspace",
        &format!("Opened workspace at: {}", workspace.root().display()),
    );

    let mut registry = workspace.new_registry();
    let log = *output;
    registry.subscribe(move |event| log.verbose_ctx("registry", &event.to_string()));

    workspace.load_into(&mut registry)?;
    Ok((workspace, registry))
}

pub fn add(
    output: &Output,
    name: &str,
    begin: &str,
    end: &str,
    description: &str,
    content: &ContentArgs,
) -> Result<()> {
    let (mut workspace, mut registry) = open_registry(output)?;

    let input = NewComponent::new(name)
        .brackets(begin, end)
        .description(description)
        .content(content.read()?.unwrap_or_default());

    let component = registry.add(input)?;
    workspace.save_registry(&registry)?;

    if output.is_json() {
        output.data(&component);
    } else {
        output.success(&format!("Added component: {}", component.name));
    }

    Ok(())
}

pub fn update(
    output: &Output,
    name: &str,
    begin: Option<String>,
    end: Option<String>,
    description: Option<String>,
    content: &ContentArgs,
) -> Result<()> {
    let update = ComponentUpdate {
        begin_bracket: begin,
        end_bracket: end,
        rwi_text: description,
        content: content.read()?,
    };

    if update.is_empty() {
        anyhow::bail!("Nothing to update. Pass --begin, --end, --description or --content.");
    }

    let (mut workspace, mut registry) = open_registry(output)?;
    if !registry.update(name, &update)? {
        output.success(&format!("No changes to component: {}", name));
        return Ok(());
    }
    workspace.save_registry(&registry)?;

    output.success(&format!("Updated component: {}", name));
    Ok(())
}

pub fn delete(output: &Output, name: &str) -> Result<()> {
    let (mut workspace, mut registry) = open_registry(output)?;
    registry.delete(name)?;
    workspace.save_registry(&registry)?;

    output.success(&format!("Deleted component: {}", name));
    Ok(())
}

pub fn set_active(output: &Output, name: &str, active: bool) -> Result<()> {
    let (mut workspace, mut registry) = open_registry(output)?;
    registry.set_active(name, active)?;
    workspace.save_registry(&registry)?;

    let verb = if active { "Enabled" } else { "Disabled" };
    output.success(&format!("{} component: {}", verb, name));
    Ok(())
}

pub fn set_pinned(output: &Output, name: &str, pinned: bool) -> Result<()> {
    let (mut workspace, mut registry) = open_registry(output)?;
    registry.set_pinned(name, pinned)?;
    workspace.save_registry(&registry)?;

    let verb = if pinned { "Pinned" } else { "Unpinned" };
    output.success(&format!("{} component: {}", verb, name));
    Ok(())
}

/// Moves a component; refused moves are warnings, not failures
pub fn move_component(output: &Output, name: &str, direction: &str) -> Result<()> {
    let direction: Direction = direction.parse().map_err(anyhow::Error::msg)?;
    let (mut workspace, mut registry) = open_registry(output)?;

    match registry.move_component(name, direction) {
        Ok(()) => {
            workspace.save_registry(&registry)?;
            output.success(&format!("Moved {} {}", name, direction));
        }
        Err(e) if e.is_notice() => output.warning(&e.to_string()),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

pub fn list(output: &Output) -> Result<()> {
    let (_, registry) = open_registry(output)?;
    let components = registry.components();

    if output.is_json() {
        output.data(&components);
        return Ok(());
    }

    println!(
        "{:<4} {:<20} {:<4} {:<7} {:<30} DESCRIPTION",
        "#", "NAME", "PIN", "ACTIVE", "DELIMITERS"
    );
    println!("{}", "-".repeat(90));
    for component in components {
        println!(
            "{:<4} {:<20} {:<4} {:<7} {:<30} {}",
            component.order,
            component.name,
            if component.pinned { "yes" } else { "" },
            if component.active { "yes" } else { "no" },
            format!(
                "{} ... {}",
                component.config.begin_bracket, component.config.end_bracket
            ),
            component.config.rwi_text
        );
    }
    println!();
    println!(
        "{} components ({} active)",
        components.len(),
        registry.active_count()
    );

    Ok(())
}

pub fn show(output: &Output, name: &str) -> Result<()> {
    let (_, registry) = open_registry(output)?;
    let component = registry
        .get(name)
        .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;

    if output.is_json() {
        output.data(component);
    } else {
        print_component(output, component, registry.index_name() == name);
    }

    Ok(())
}

fn print_component(output: &Output, component: &Component, is_index: bool) {
    output.row(&["Name:", &component.name]);
    output.row(&["Order:", &component.order.to_string()]);
    output.row(&["Pinned:", if component.pinned { "yes" } else { "no" }]);
    output.row(&["Active:", if component.active { "yes" } else { "no" }]);
    output.row(&["Begin:", &component.config.begin_bracket]);
    output.row(&["End:", &component.config.end_bracket]);
    output.row(&["Description:", &component.config.rwi_text]);
    if is_index {
        output.row(&["Index:", "yes (content is generated)"]);
    }
    output.blank();
    println!("{}", component.content);
}
