//! `support_tickets` - support ticket desk front end
//!
//! This crate provides the `tix` CLI on top of [`tickets_lib`]: a
//! session-scoped, in-memory ticket table that is seeded with synthetic
//! rows, then submitted to, filtered, edited, summarized and exported.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Layered YAML/env/flag configuration
//! - [`error`] - Error types and handling
//! - [`format`] - Output formatting (text, JSON)
//! - [`logging`] - tracing subscriber setup
//! - [`output`] - Output mode selection
//! - [`validation`] - Input checks in front of the store

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod output;
pub mod validation;

pub use error::{CliError, Result};

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub fn run() -> anyhow::Result<()> {
    cli::run()
}
