//! Stats command implementation.

use tickets_lib::Action;

use crate::config::{CliOverrides, Config, open_session};
use crate::error::Result;
use crate::format::{StatsReport, format_metrics};
use crate::output::OutputContext;

/// Execute the stats command.
///
/// # Errors
///
/// Returns an error if the session cannot be opened.
pub fn execute(config: &Config, cli: &CliOverrides, ctx: &OutputContext) -> Result<()> {
    let mut session = open_session(config, cli)?;
    let frame = session.dispatch(Action::Stats)?;

    if ctx.is_json() {
        ctx.json(&StatsReport {
            metrics: &frame.metrics,
        });
    } else {
        ctx.text(&format!("Total tickets:              {}", frame.total));
        ctx.text(&format_metrics(&frame.metrics));
    }
    Ok(())
}
