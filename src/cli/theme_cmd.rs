//! Theme preference commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::domain::Theme;
use crate::storage::Config;

#[derive(Subcommand)]
pub enum ThemeCommands {
    /// Show the stored theme
    Show,

    /// Switch between dark and light
    Toggle,

    /// Store a specific theme
    Set {
        /// dark or light
        theme: String,
    },
}

pub fn run(cmd: Option<ThemeCommands>, output: &Output) -> Result<()> {
    let mut config = Config::load()?;
    let current = config.theme();

    let theme = match cmd.unwrap_or(ThemeCommands::Show) {
        ThemeCommands::Show => current,
        ThemeCommands::Toggle => {
            let next = current.toggle();
            config.set_theme(next)?;
            output.verbose_ctx("theme", &format!("{} -> {}", current, next));
            next
        }
        ThemeCommands::Set { theme } => {
            let next: Theme = theme.parse().map_err(anyhow::Error::msg)?;
            config.set_theme(next)?;
            next
        }
    };

    if output.is_json() {
        output.data(&serde_json::json!({
            "theme": theme,
            "button_label": theme.button_label(),
            "slider_checked": theme.slider_checked(),
        }));
    } else {
        println!("{}", theme);
    }

    Ok(())
}
