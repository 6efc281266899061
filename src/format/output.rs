use serde::Serialize;
use tickets_lib::{Frame, Metrics, Ticket, TicketFilter};

/// Result of `tix add`.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedTicket<'a> {
    pub ticket: &'a Ticket,
    /// Table size after the insert.
    pub total: usize,
    pub open_count: usize,
}

/// Filtered view for `tix list`.
#[derive(Debug, Clone, Serialize)]
pub struct TicketList<'a> {
    pub total: usize,
    pub matched: usize,
    pub filter: &'a TicketFilter,
    pub tickets: &'a [Ticket],
}

/// Metrics for `tix stats`.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport<'a> {
    #[serde(flatten)]
    pub metrics: &'a Metrics,
}

/// One session frame as emitted on stdout.
#[derive(Debug, Clone, Serialize)]
pub struct SessionFrame<'a> {
    /// 1-based position of the action in the script.
    pub step: usize,
    #[serde(flatten)]
    pub frame: &'a Frame,
}

/// Failure of one session action.
#[derive(Debug, Clone, Serialize)]
pub struct SessionError {
    pub step: usize,
    pub error: String,
}

