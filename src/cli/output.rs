//! Output formatting for CLI commands
//!
//! Results go to stdout and failures to stderr. In JSON mode every line is
//! a single JSON document.

use serde::Serialize;
use serde_json::json;

use crate::storage::OutputFormat;

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Prints a success message to stdout
    pub fn success(&self, message: &str) {
        println!("{}", self.status(true, message));
    }

    /// Prints an error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.status(false, message));
    }

    fn status(&self, ok: bool, message: &str) -> String {
        match (self.format, ok) {
            (OutputFormat::Text, true) => message.to_string(),
            (OutputFormat::Text, false) => format!("Error: {}", message),
            (OutputFormat::Json, true) => json!({ "success": true, "message": message }).to_string(),
            (OutputFormat::Json, false) => json!({ "success": false, "error": message }).to_string(),
        }
    }

    /// Prints structured data as JSON, pretty in text mode
    pub fn data<T: Serialize>(&self, data: &T) {
        let json = match self.format {
            OutputFormat::Text => serde_json::to_string_pretty(data),
            OutputFormat::Json => serde_json::to_string(data),
        };
        if let Ok(json) = json {
            println!("{}", json);
        }
    }

    /// Prints a tab-separated row; rows are a text-only view
    pub fn row<S: AsRef<str>>(&self, columns: &[S]) {
        if let Some(line) = self.render_row(columns) {
            println!("{}", line);
        }
    }

    fn render_row<S: AsRef<str>>(&self, columns: &[S]) -> Option<String> {
        if self.is_json() {
            return None;
        }
        let columns: Vec<&str> = columns.iter().map(|c| c.as_ref()).collect();
        Some(columns.join("\t"))
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}
