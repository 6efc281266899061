//! Text formatting functions for `tix`.
//!
//! Provides plain text (non-ANSI) formatting for terminal output:
//! - Status icons (○ ◐ ✓)
//! - Ticket lines and aligned ticket tables
//! - Metrics summary

use std::fmt::Write as _;

use tickets_lib::{EditSummary, Metrics, Priority, Status, Ticket};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Status icon characters.
pub mod icons {
    /// Open ticket - waiting for work (hollow circle).
    pub const OPEN: &str = "○";
    /// In progress - active work (half-filled).
    pub const IN_PROGRESS: &str = "◐";
    /// Closed - resolved (checkmark).
    pub const CLOSED: &str = "✓";
}

/// Widest issue column in tables before truncation.
pub const ISSUE_COLUMN_WIDTH: usize = 40;

/// Return the icon character for a status.
#[must_use]
pub const fn format_status_icon(status: Status) -> &'static str {
    match status {
        Status::Open => icons::OPEN,
        Status::InProgress => icons::IN_PROGRESS,
        Status::Closed => icons::CLOSED,
    }
}

/// Format priority as a bracketed badge.
#[must_use]
pub fn format_priority(priority: Priority) -> String {
    format!("[{}]", priority.as_str())
}

/// Format a single-line ticket summary.
///
/// Format: `{icon} {id} [{priority}] {issue} ({assignee})`
#[must_use]
pub fn format_ticket_line(ticket: &Ticket) -> String {
    format!(
        "{} {} {} {} ({})",
        format_status_icon(ticket.status),
        ticket.id,
        format_priority(ticket.priority),
        ticket.issue,
        ticket.assigned_to,
    )
}

/// Cut `text` to at most `width` display columns, marking the cut with `…`.
#[must_use]
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

/// Render tickets as an aligned table with a header row.
#[must_use]
pub fn format_ticket_table(tickets: &[Ticket]) -> String {
    const HEADERS: [&str; 8] = [
        "ID",
        "Issue",
        "Status",
        "Priority",
        "Submitted",
        "Assigned To",
        "Resp (h)",
        "Resol (h)",
    ];

    let rows: Vec<[String; 8]> = tickets
        .iter()
        .map(|t| {
            [
                t.id.to_string(),
                truncate_to_width(&t.issue.replace(['\n', '\r'], " "), ISSUE_COLUMN_WIDTH),
                t.status.to_string(),
                t.priority.to_string(),
                t.date_submitted.to_string(),
                t.assigned_to.to_string(),
                t.response_time_hours.to_string(),
                t.resolution_time_hours.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(UnicodeWidthStr::width);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.width());
        }
    }

    let render = |cells: &[&str]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| pad(cell, w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = render(&HEADERS);
    out.push('\n');
    out.push_str(&render(&widths.map(|w| "-".repeat(w)).each_ref().map(String::as_str)));
    for row in &rows {
        out.push('\n');
        out.push_str(&render(&row.each_ref().map(String::as_str)));
    }
    out
}

fn format_hours(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}

/// Render the metrics block.
#[must_use]
pub fn format_metrics(metrics: &Metrics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Open tickets:               {}", metrics.open_count);
    let _ = writeln!(
        out,
        "Avg response time (hours):  {}",
        format_hours(metrics.avg_response_hours)
    );
    let _ = writeln!(
        out,
        "Avg resolution time (hours): {}",
        format_hours(metrics.avg_resolution_hours)
    );

    out.push_str("\nBy status:\n");
    for (status, count) in &metrics.by_status {
        let _ = writeln!(out, "  {} {:<12} {count}", format_status_icon(*status), status.as_str());
    }

    out.push_str("\nBy priority:\n");
    for (priority, count) in &metrics.by_priority {
        let _ = writeln!(out, "  {:<14} {count}", priority.as_str());
    }

    out.push_str("\nBy assignee:\n");
    for (assignee, count) in &metrics.by_assignee {
        let _ = writeln!(out, "  {:<14} {count}", assignee.as_str());
    }

    if !metrics.by_month.is_empty() {
        out.push_str("\nBy month (open / in progress / closed):\n");
        for month in &metrics.by_month {
            let counts: Vec<String> = month.counts.iter().map(|(_, n)| n.to_string()).collect();
            let _ = writeln!(out, "  {}  {}", month.month, counts.join(" / "));
        }
    }

    out.push_str("\nResolution time distribution (hours):\n");
    match &metrics.resolution_distribution {
        Some(d) => {
            let _ = write!(
                out,
                "  min {:.1}  q1 {:.1}  median {:.1}  q3 {:.1}  max {:.1}",
                d.min, d.q1, d.median, d.q3, d.max
            );
        }
        None => out.push_str("  (no tickets)"),
    }
    out
}

/// Render the result of an edit merge.
#[must_use]
pub fn format_edit_summary(summary: &EditSummary) -> String {
    let mut out = if summary.changed.is_empty() {
        "No tickets changed.".to_string()
    } else {
        let ids: Vec<String> = summary.changed.iter().map(ToString::to_string).collect();
        format!("Updated {} ticket(s): {}", ids.len(), ids.join(", "))
    };
    if !summary.unknown.is_empty() {
        let ids: Vec<String> = summary.unknown.iter().map(ToString::to_string).collect();
        let _ = write!(out, "\nSkipped unknown ticket(s): {}", ids.join(", "));
    }
    out
}
