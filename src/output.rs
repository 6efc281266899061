//! Output mode selection.
//!
//! Commands print through an [`OutputContext`] so `--json` and `--quiet`
//! are honored in one place.

use serde::Serialize;
use tracing::error;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable tables.
    Text,
    /// One JSON document per result.
    Json,
    /// Errors only.
    Quiet,
}

#[derive(Debug, Clone, Copy)]
pub struct OutputContext {
    mode: OutputMode,
}

impl OutputContext {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        let mode = if json {
            OutputMode::Json
        } else if quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Text
        };
        Self { mode }
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Print a value as pretty JSON.
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(text) => println!("{text}"),
            Err(e) => error!("Failed to serialize output: {e}"),
        }
    }

    /// Print a value as a single JSON line.
    pub fn json_line<T: Serialize>(&self, value: &T) {
        match serde_json::to_string(value) {
            Ok(text) => println!("{text}"),
            Err(e) => error!("Failed to serialize output: {e}"),
        }
    }

    /// Print human-readable text unless quiet.
    pub fn text(&self, text: &str) {
        if self.mode == OutputMode::Text {
            println!("{text}");
        }
    }
}
