//! Add command implementation.

use tickets_lib::Action;
use tickets_lib::model::parse_date;
use tracing::debug;

use crate::cli::AddArgs;
use crate::config::{CliOverrides, Config, open_session};
use crate::error::Result;
use crate::format::{CreatedTicket, format_ticket_table};
use crate::output::OutputContext;
use crate::validation::TicketForm;

/// Execute the add command.
///
/// # Errors
///
/// Returns an error if the form fails validation, the date does not parse,
/// or the session cannot be opened.
pub fn execute(
    args: &AddArgs,
    config: &Config,
    cli: &CliOverrides,
    ctx: &OutputContext,
) -> Result<()> {
    let form = TicketForm {
        issue: &args.issue,
        priority: &args.priority,
        assigned_to: &args.assigned_to,
        response_time_hours: args.response_time,
        resolution_time_hours: args.resolution_time,
    };
    let ticket = form.parse()?;
    let date = args.date.as_deref().map(parse_date).transpose()?;

    let mut session = open_session(config, cli)?;
    let frame = session.dispatch(Action::Add { ticket, date })?;
    let Some(created) = frame.created.as_ref() else {
        return Ok(());
    };
    debug!(id = %created.id, total = frame.total, "Ticket submitted");

    if ctx.is_json() {
        ctx.json(&CreatedTicket {
            ticket: created,
            total: frame.total,
            open_count: frame.metrics.open_count,
        });
        return Ok(());
    }

    ctx.text(&format!("Ticket submitted! ID: {}", created.id));
    ctx.text(&format_ticket_table(std::slice::from_ref(created)));
    ctx.text(&format!(
        "\nTotal tickets: {}  Open: {}",
        frame.total, frame.metrics.open_count
    ));
    Ok(())
}
