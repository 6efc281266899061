//! Export command implementation.
//!
//! Writes the full table, regardless of any filter, as CSV or JSON.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tickets_lib::{Action, ExportFormat};
use tracing::info;

use crate::cli::{ExportArgs, ExportFormatArg};
use crate::config::{CliOverrides, Config, open_session};
use crate::error::{CliError, Result};
use crate::output::OutputContext;

#[derive(Serialize)]
struct ExportOutput<'a> {
    path: &'a Path,
    format: ExportFormat,
    mime_type: &'a str,
    rows: usize,
    bytes: usize,
}

/// Execute the export command.
///
/// # Errors
///
/// Returns an error if the session cannot be opened or the file cannot be
/// written.
pub fn execute(
    args: &ExportArgs,
    config: &Config,
    cli: &CliOverrides,
    ctx: &OutputContext,
) -> Result<()> {
    let format = match args.format {
        ExportFormatArg::Csv => ExportFormat::Csv,
        ExportFormatArg::Json => ExportFormat::Json,
    };

    let mut session = open_session(config, cli)?;
    let frame = session.dispatch(Action::Export { format })?;
    let export = frame
        .export
        .ok_or_else(|| CliError::Config("export produced no payload".to_string()))?;

    let target = resolve_target(args.output.as_deref(), config, &export.file_name);
    if target.as_os_str() == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(&export.bytes)?;
        stdout.flush()?;
        return Ok(());
    }

    fs::write(&target, &export.bytes)?;
    info!(path = %target.display(), rows = frame.total, "Exported tickets");

    if ctx.is_json() {
        ctx.json(&ExportOutput {
            path: &target,
            format,
            mime_type: export.mime_type,
            rows: frame.total,
            bytes: export.bytes.len(),
        });
    } else {
        ctx.text(&format!(
            "Exported {} ticket(s) to {}",
            frame.total,
            target.display()
        ));
    }
    Ok(())
}

/// `-o` wins, then the configured export path, then the default file name.
fn resolve_target(output: Option<&Path>, config: &Config, file_name: &str) -> PathBuf {
    output
        .map(Path::to_path_buf)
        .or_else(|| config.export_path.clone())
        .unwrap_or_else(|| PathBuf::from(file_name))
}
