//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::component::{self, ContentArgs};
use super::output::{Output, OutputFormat};
use super::{document, snapshot_cmd, theme_cmd};
use crate::storage::{Config, Workspace};

#[derive(Parser)]
#[command(name = "rwi")]
#[command(author, version, about = "Compose documents from bracket-delimited components")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to `default_format` in the global config)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new workspace
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Add a component at the end of the list
    Add {
        /// Unique component name
        name: String,

        /// Delimiter before the content
        #[arg(long, short = 'b', default_value = "")]
        begin: String,

        /// Delimiter after the content
        #[arg(long, short = 'e', default_value = "")]
        end: String,

        /// One-line description for the index
        #[arg(long, short = 'd', default_value = "")]
        description: String,

        #[command(flatten)]
        content: ContentArgs,
    },

    /// Edit a component's delimiters, description or content
    Update {
        /// Component name
        name: String,

        /// New delimiter before the content
        #[arg(long, short = 'b')]
        begin: Option<String>,

        /// New delimiter after the content
        #[arg(long, short = 'e')]
        end: Option<String>,

        /// New description
        #[arg(long, short = 'd')]
        description: Option<String>,

        #[command(flatten)]
        content: ContentArgs,
    },

    /// Delete a component
    Delete {
        /// Component name
        name: String,
    },

    /// Include a component in the document
    Enable {
        /// Component name
        name: String,
    },

    /// Leave a component out of the document
    Disable {
        /// Component name
        name: String,
    },

    /// Pin a component to the top of the list
    Pin {
        /// Component name
        name: String,
    },

    /// Release a pinned component
    Unpin {
        /// Component name
        name: String,
    },

    /// Move a component one slot up or down
    Move {
        /// Component name
        name: String,

        /// up or down
        direction: String,
    },

    /// List components in document order
    List,

    /// Show a component
    Show {
        /// Component name
        name: String,
    },

    /// Print the generated index
    Index,

    /// Assemble the active components into one document
    Assemble {
        /// Write to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Fail if a content contains a delimiter
        #[arg(long)]
        strict: bool,
    },

    /// Save or load snapshot files
    #[command(subcommand)]
    Snapshot(snapshot_cmd::SnapshotCommands),

    /// Show or change the theme preference
    Theme {
        #[command(subcommand)]
        action: Option<theme_cmd::ThemeCommands>,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = match cli.format {
        Some(format) => format,
        None => Config::load_global()?.default_format.into(),
    };
    let output = Output::new(format, cli.verbose);

    output.verbose("RWI builder starting");

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing workspace at: {}", path));
            let workspace = Workspace::init(&path)?;
            output.verbose_ctx(
                "init",
                &format!("Created .rwi directory at: {}", workspace.rwi_dir().display()),
            );
            output.success(&format!(
                "Initialized rwi workspace at {}",
                workspace.root().display()
            ));
        }

        Commands::Add {
            name,
            begin,
            end,
            description,
            content,
        } => component::add(&output, &name, &begin, &end, &description, &content)?,

        Commands::Update {
            name,
            begin,
            end,
            description,
            content,
        } => component::update(&output, &name, begin, end, description, &content)?,

        Commands::Delete { name } => component::delete(&output, &name)?,
        Commands::Enable { name } => component::set_active(&output, &name, true)?,
        Commands::Disable { name } => component::set_active(&output, &name, false)?,
        Commands::Pin { name } => component::set_pinned(&output, &name, true)?,
        Commands::Unpin { name } => component::set_pinned(&output, &name, false)?,
        Commands::Move { name, direction } => {
            component::move_component(&output, &name, &direction)?
        }
        Commands::List => component::list(&output)?,
        Commands::Show { name } => component::show(&output, &name)?,

        Commands::Index => document::index(&output)?,
        Commands::Assemble {
            output: target,
            strict,
        } => document::assemble(&output, target, strict)?,

        Commands::Snapshot(cmd) => snapshot_cmd::run(cmd, &output)?,
        Commands::Theme { action } => theme_cmd::run(action, &output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
