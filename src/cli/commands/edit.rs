//! Edit command implementation.
//!
//! Mirrors saving edited grid cells: every named row gets the new status
//! and/or priority, other columns stay locked.

use tickets_lib::{Action, Priority, Status, TicketEdit, TicketId, TicketStore};

use crate::cli::EditArgs;
use crate::config::{CliOverrides, Config, open_session};
use crate::error::{CliError, Result};
use crate::format::{format_edit_summary, format_ticket_table};
use crate::output::OutputContext;

/// Execute the edit command.
///
/// # Errors
///
/// Returns an error if no change is requested, an id or value does not
/// parse, or the session cannot be opened.
pub fn execute(
    args: &EditArgs,
    config: &Config,
    cli: &CliOverrides,
    ctx: &OutputContext,
) -> Result<()> {
    if args.status.is_none() && args.priority.is_none() {
        return Err(CliError::validation(
            "edit",
            "nothing to change: pass --status and/or --priority",
        ));
    }
    let status: Option<Status> = args.status.as_deref().map(str::parse).transpose()?;
    let priority: Option<Priority> = args.priority.as_deref().map(str::parse).transpose()?;
    let ids = args
        .ids
        .iter()
        .map(|id| id.parse::<TicketId>())
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut session = open_session(config, cli)?;
    let edits = build_edits(session.store()?, &ids, status, priority);
    let frame = session.dispatch(Action::Edit { edits })?;
    let summary = frame.edits.unwrap_or_default();

    if ctx.is_json() {
        ctx.json(&summary);
        return Ok(());
    }

    ctx.text(&format_edit_summary(&summary));
    let changed: Vec<_> = frame
        .view
        .into_iter()
        .filter(|t| summary.changed.contains(&t.id))
        .collect();
    if !changed.is_empty() {
        ctx.text(&format_ticket_table(&changed));
    }
    Ok(())
}

/// One edit per id, starting from the row's current cells.
///
/// Unknown ids still produce an edit so the merge can report them.
fn build_edits(
    store: &TicketStore,
    ids: &[TicketId],
    status: Option<Status>,
    priority: Option<Priority>,
) -> Vec<TicketEdit> {
    ids.iter()
        .map(|&id| {
            let current = store.get(id).map_or(
                TicketEdit {
                    id,
                    status: Status::default(),
                    priority: Priority::default(),
                },
                TicketEdit::from,
            );
            TicketEdit {
                status: status.unwrap_or(current.status),
                priority: priority.unwrap_or(current.priority),
                ..current
            }
        })
        .collect()
}
