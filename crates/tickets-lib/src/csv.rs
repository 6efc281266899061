//! CSV export and import of the ticket table.
//!
//! One header row, one record per ticket, comma-delimited UTF-8. Fields
//! containing a comma, quote or line break are wrapped in quotes with inner
//! quotes doubled.

use crate::error::{Result, TicketError};
use crate::model::{Ticket, TicketId, parse_date};

/// Suggested download file name.
pub const EXPORT_FILE_NAME: &str = "support_tickets.csv";

/// MIME type of the export.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Header row, in column order.
pub const HEADER: [&str; 8] = [
    "ID",
    "Issue",
    "Status",
    "Priority",
    "Date Submitted",
    "Assigned To",
    "Response Time (hours)",
    "Resolution Time (hours)",
];

/// Serialize tickets, in the given order, as CSV text.
#[must_use]
pub fn write_tickets<'a>(tickets: impl IntoIterator<Item = &'a Ticket>) -> String {
    let mut out = HEADER.join(",");
    out.push('\n');
    for ticket in tickets {
        let fields = [
            ticket.id.to_string(),
            escape(&ticket.issue),
            ticket.status.to_string(),
            ticket.priority.to_string(),
            ticket.date_submitted.to_string(),
            ticket.assigned_to.to_string(),
            ticket.response_time_hours.to_string(),
            ticket.resolution_time_hours.to_string(),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Parse CSV text produced by [`write_tickets`].
///
/// # Errors
///
/// Returns `CsvParse` if the header does not match, a record has the wrong
/// number of fields, or a field does not parse.
pub fn parse_tickets(text: &str) -> Result<Vec<Ticket>> {
    let mut records = split_records(text)?.into_iter();

    let Some((line, header)) = records.next() else {
        return Err(TicketError::CsvParse {
            line: 1,
            reason: "missing header row".to_string(),
        });
    };
    if header.iter().map(String::as_str).ne(HEADER) {
        return Err(TicketError::CsvParse {
            line,
            reason: format!("unexpected header: {}", header.join(",")),
        });
    }

    records
        .filter(|(_, fields)| !(fields.len() == 1 && fields[0].is_empty()))
        .map(|(line, fields)| {
            parse_record(&fields).map_err(|err| TicketError::CsvParse {
                line,
                reason: err.to_string(),
            })
        })
        .collect()
}

fn parse_record(fields: &[String]) -> Result<Ticket> {
    let [id, issue, status, priority, date, assignee, response, resolution] = fields else {
        return Err(TicketError::validation(
            "record",
            format!("expected {} fields, found {}", HEADER.len(), fields.len()),
        ));
    };

    Ok(Ticket {
        id: id.parse::<TicketId>()?,
        issue: issue.clone(),
        status: status.parse()?,
        priority: priority.parse()?,
        date_submitted: parse_date(date)?,
        assigned_to: assignee.parse()?,
        response_time_hours: parse_hours("response_time_hours", response)?,
        resolution_time_hours: parse_hours("resolution_time_hours", resolution)?,
    })
}

fn parse_hours(field: &str, value: &str) -> Result<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| TicketError::validation(field, format!("not a whole number of hours: {value}")))
}

/// Split text into records of unescaped fields, tagged with the line each
/// record starts on.
fn split_records(text: &str) -> Result<Vec<(usize, Vec<String>)>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                records.push((record_line, std::mem::take(&mut fields)));
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(TicketError::CsvParse {
            line: record_line,
            reason: "unterminated quoted field".to_string(),
        });
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push((record_line, fields));
    }

    Ok(records)
}
