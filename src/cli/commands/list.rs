//! List command implementation.
//!
//! Builds a [`TicketFilter`] from repeated flags and prints the matching
//! rows in store order (newest first).

use tickets_lib::{Action, Assignee, Priority, TicketFilter};

use crate::cli::ListArgs;
use crate::config::{CliOverrides, Config, open_session};
use crate::error::Result;
use crate::format::{TicketList, format_ticket_table};
use crate::output::OutputContext;
use crate::validation::{parse_selection, parse_statuses};

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if a filter value does not parse or the session cannot
/// be opened.
pub fn execute(
    args: &ListArgs,
    config: &Config,
    cli: &CliOverrides,
    ctx: &OutputContext,
) -> Result<()> {
    let filter = build_filter(args)?;

    let mut session = open_session(config, cli)?;
    let frame = session.dispatch(Action::Filter { filter })?;

    let matched = frame.view.len();
    let shown = args.limit.map_or(matched, |limit| limit.min(matched));
    let tickets = &frame.view[..shown];

    if ctx.is_json() {
        ctx.json(&TicketList {
            total: frame.total,
            matched,
            filter: &frame.filter,
            tickets,
        });
        return Ok(());
    }

    if tickets.is_empty() {
        ctx.text("No tickets found.");
    } else {
        ctx.text(&format_ticket_table(tickets));
    }
    if shown < matched {
        ctx.text(&format!("... {} more", matched - shown));
    }
    ctx.text(&format!("\nTotal tickets: {matched}"));
    if !frame.filter.is_unrestricted() {
        ctx.text(&format!("(filtered from {} tickets)", frame.total));
    }
    Ok(())
}

/// Convert CLI args to a view filter. Absent flags select everything.
fn build_filter(args: &ListArgs) -> Result<TicketFilter> {
    Ok(TicketFilter {
        statuses: parse_statuses(&args.status)?,
        priorities: parse_selection("priority", &args.priority, &Priority::ALL)?,
        assignees: parse_selection("assigned_to", &args.assigned_to, &Assignee::ALL)?,
        search: args.search.clone(),
    })
}
