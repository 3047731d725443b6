//! Output formatting for CLI results

use colored::Colorize;

/// Formats command results for humans or machines
#[derive(Debug, Clone, Copy)]
pub struct OutputFormatter {
    json: bool,
}

impl OutputFormatter {
    #[must_use]
    pub fn new(json: bool, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { json }
    }

    /// Whether machine-readable output was requested
    #[must_use]
    pub const fn is_json(&self) -> bool {
        self.json
    }

    pub fn success(&self, message: &str) {
        if self.json {
            self.emit_json(&serde_json::json!({ "status": "ok", "message": message }));
        } else {
            println!("{} {message}", "✓".green());
        }
    }

    pub fn info(&self, message: &str) {
        if self.json {
            self.emit_json(&serde_json::json!({ "status": "info", "message": message }));
        } else {
            println!("{message}");
        }
    }

    pub fn error(&self, message: &str) {
        if self.json {
            self.emit_json(&serde_json::json!({ "status": "error", "message": message }));
        } else {
            eprintln!("{} {message}", "✗".red());
        }
    }

    /// Print a serializable value; pretty JSON in both modes
    pub fn value<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(rendered) => println!("{rendered}"),
            Err(err) => self.error(&format!("failed to render output: {err}")),
        }
    }

    fn emit_json(&self, value: &serde_json::Value) {
        match serde_json::to_string(value) {
            Ok(line) => println!("{line}"),
            Err(_) => println!("{value}"),
        }
    }
}
