//! Printing helpers shared by every command
//!
//! Results go to stdout, warnings and `--verbose` traces to stderr. In JSON
//! mode each message is a single-line object so scripts can parse it.

use serde::Serialize;

use crate::storage;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl From<storage::OutputFormat> for OutputFormat {
    fn from(stored: storage::OutputFormat) -> Self {
        match stored {
            storage::OutputFormat::Text => Self::Text,
            storage::OutputFormat::Json => Self::Json,
        }
    }
}

/// Writes command results in the selected format
#[derive(Debug, Clone, Copy)]
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Reports a completed command on stdout
    pub fn success(&self, message: &str) {
        if self.is_json() {
            println!("{}", serde_json::json!({ "success": true, "message": message }));
        } else {
            println!("{}", message);
        }
    }

    /// Reports a problem that still lets the command exit 0
    pub fn warning(&self, message: &str) {
        if self.is_json() {
            eprintln!("{}", serde_json::json!({ "warning": message }));
        } else {
            eprintln!("Warning: {}", message);
        }
    }

    /// Prints a serializable value
    ///
    /// Commands with a text rendering print it themselves and only call this
    /// in JSON mode. Text mode falls back to indented JSON.
    pub fn data<T: Serialize>(&self, data: &T) {
        let rendered = if self.is_json() {
            serde_json::to_string(data)
        } else {
            serde_json::to_string_pretty(data)
        };
        if let Ok(json) = rendered {
            println!("{}", json);
        }
    }

    /// Prints tab-separated columns; JSON mode prints nothing
    pub fn row(&self, columns: &[&str]) {
        if !self.is_json() {
            println!("{}", columns.join("\t"));
        }
    }

    pub fn blank(&self) {
        if !self.is_json() {
            println!();
        }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Traces a step to stderr under `--verbose`
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Traces a step tagged with the subsystem that produced it
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_format_maps_to_cli_format() {
        assert_eq!(OutputFormat::from(storage::OutputFormat::Text), OutputFormat::Text);
        assert_eq!(OutputFormat::from(storage::OutputFormat::Json), OutputFormat::Json);
    }
}
