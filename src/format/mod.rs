//! Output formatting for `tix`.
//!
//! Supports both human-readable text output and machine-parseable JSON.
//!
//! # JSON Output Types
//!
//! - [`CreatedTicket`] - New ticket with table totals (add)
//! - [`TicketList`] - Filtered view (list)
//! - [`StatsReport`] - Aggregate metrics (stats)
//! - [`SessionFrame`] / [`SessionError`] - One line per session action

mod output;
mod text;

pub use output::{CreatedTicket, SessionError, SessionFrame, StatsReport, TicketList};
pub use text::{
    format_edit_summary, format_metrics, format_priority, format_status_icon, format_ticket_line,
    format_ticket_table, truncate_to_width,
};
