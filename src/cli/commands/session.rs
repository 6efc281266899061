//! Session command implementation.
//!
//! Reads one JSON [`Action`] per line and dispatches each against a single
//! session, so the store persists across the whole script. Blank lines and
//! lines starting with `#` are skipped.
//!
//! ```text
//! {"action": "filter", "statuses": ["Open"]}
//! {"action": "add", "issue": "Badge reader offline", "priority": "High", "assigned_to": "Alex Brown"}
//! {"action": "edit", "edits": [{"id": "TICKET-1101", "status": "Closed", "priority": "High"}]}
//! {"action": "stats"}
//! ```

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use tickets_lib::{Action, Frame, Session};
use tracing::{debug, warn};

use crate::cli::SessionArgs;
use crate::config::{CliOverrides, Config, open_session};
use crate::error::{CliError, Result};
use crate::format::{
    SessionError, SessionFrame, format_edit_summary, format_metrics, format_ticket_line,
};
use crate::output::OutputContext;
use crate::validation::NewTicketValidator;

/// Execute the session command.
///
/// # Errors
///
/// Returns an error if the script cannot be read, the session cannot be
/// opened, or any action failed.
pub fn execute(
    args: &SessionArgs,
    config: &Config,
    cli: &CliOverrides,
    ctx: &OutputContext,
) -> Result<()> {
    let reader: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };

    let mut session = open_session(config, cli)?;
    let mut total = 0;
    let mut failed = 0;

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        total += 1;

        match run_step(&mut session, trimmed, config) {
            Ok((kind, frame)) => render_frame(ctx, total, kind, &frame),
            Err(err) => {
                failed += 1;
                warn!(step = total, error = %err, "Session action failed");
                if ctx.is_json() {
                    ctx.json_line(&SessionError {
                        step: total,
                        error: err.to_string(),
                    });
                } else {
                    eprintln!("[{total}] error: {err}");
                }
                if args.fail_fast {
                    break;
                }
            }
        }
    }

    debug!(total, failed, "Session finished");
    if failed > 0 {
        return Err(CliError::SessionFailures { failed, total });
    }
    Ok(())
}

/// Parse, validate and dispatch one script line.
fn run_step(session: &mut Session, line: &str, config: &Config) -> Result<(&'static str, Frame)> {
    let action: Action = serde_json::from_str(line)?;
    if let Action::Add { ticket, .. } = &action {
        NewTicketValidator::validate(ticket)?;
    }
    let kind = action_name(&action);
    let frame = session.dispatch(action)?;

    if let Some(export) = &frame.export {
        let target = config
            .export_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(&export.file_name));
        fs::write(&target, &export.bytes)?;
        debug!(path = %target.display(), "Session export written");
    }
    Ok((kind, frame))
}

const fn action_name(action: &Action) -> &'static str {
    match action {
        Action::Add { .. } => "add",
        Action::Edit { .. } => "edit",
        Action::Filter { .. } => "filter",
        Action::Show => "show",
        Action::Stats => "stats",
        Action::Export { .. } => "export",
    }
}

fn render_frame(ctx: &OutputContext, step: usize, kind: &str, frame: &Frame) {
    if ctx.is_json() {
        ctx.json_line(&SessionFrame { step, frame });
        return;
    }

    ctx.text(&format!("[{step}] {kind}"));
    if let Some(created) = &frame.created {
        ctx.text(&format!("Ticket submitted! ID: {}", created.id));
    }
    if let Some(edits) = &frame.edits {
        ctx.text(&format_edit_summary(edits));
    }
    if let Some(export) = &frame.export {
        ctx.text(&format!(
            "Exported {} ticket(s) as {} ({})",
            frame.total, export.file_name, export.mime_type
        ));
    }

    match kind {
        "stats" => ctx.text(&format_metrics(&frame.metrics)),
        "filter" | "show" => {
            for ticket in &frame.view {
                ctx.text(&format_ticket_line(ticket));
            }
            ctx.text(&format!("Total tickets: {}", frame.view.len()));
        }
        _ => ctx.text(&format!(
            "Total tickets: {}  Open: {}",
            frame.total, frame.metrics.open_count
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickets_lib::SeedConfig;

    fn session() -> Session {
        Session::new(SeedConfig {
            rows: 10,
            ..SeedConfig::default()
        })
    }

    #[test]
    fn add_line_is_dispatched() {
        let mut session = session();
        let (kind, frame) = run_step(
            &mut session,
            r#"{"action": "add", "issue": "Projector flickers", "priority": "Low", "assigned_to": "Chris White"}"#,
            &Config::default(),
        )
        .unwrap();
        assert_eq!(kind, "add");
        assert_eq!(frame.total, 11);
        assert_eq!(frame.created.unwrap().issue, "Projector flickers");
    }

    #[test]
    fn add_line_is_validated() {
        let mut session = session();
        let err = run_step(
            &mut session,
            r#"{"action": "add", "priority": "Low", "assigned_to": "Chris White", "response_time_hours": 40}"#,
            &Config::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("response_time_hours"));
        assert_eq!(session.store().unwrap().len(), 10);
    }

    #[test]
    fn malformed_line_is_an_error() {
        let mut session = session();
        assert!(matches!(
            run_step(&mut session, r#"{"action": "explode"}"#, &Config::default()),
            Err(CliError::Json(_))
        ));
    }

    #[test]
    fn export_line_writes_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let config = Config {
            export_path: Some(path.clone()),
            ..Default::default()
        };
        let mut session = session();
        run_step(&mut session, r#"{"action": "export"}"#, &config).unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().count(), 11);
    }
}
