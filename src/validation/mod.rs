//! Validation helpers for `tix`.
//!
//! The store accepts any well-formed ticket; these routines are the input
//! boundary in front of it. They collect every problem with a form instead
//! of stopping at the first, and never touch the store.

use std::ops::RangeInclusive;
use std::str::FromStr;

use tickets_lib::{Assignee, NewTicket, Priority, Status, TicketError, ValidationError};

/// Allowed first response estimate, in hours.
pub const RESPONSE_TIME_RANGE: RangeInclusive<u32> = 1..=12;

/// Allowed resolution estimate, in hours.
pub const RESOLUTION_TIME_RANGE: RangeInclusive<u32> = 12..=72;

/// Longest accepted issue description, in characters.
pub const MAX_ISSUE_CHARS: usize = 10_000;

/// Raw new-ticket form as typed by the user.
#[derive(Debug, Clone)]
pub struct TicketForm<'a> {
    pub issue: &'a str,
    pub priority: &'a str,
    pub assigned_to: &'a str,
    pub response_time_hours: u32,
    pub resolution_time_hours: u32,
}

impl TicketForm<'_> {
    /// Parse and check the form.
    ///
    /// # Errors
    ///
    /// Returns every validation error found.
    pub fn parse(&self) -> Result<NewTicket, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let priority = parse_field::<Priority>("priority", self.priority, &mut errors);
        let assigned_to = parse_field::<Assignee>("assigned_to", self.assigned_to, &mut errors);

        let (Some(priority), Some(assigned_to)) = (priority, assigned_to) else {
            return Err(errors);
        };

        let ticket = NewTicket {
            issue: self.issue.to_string(),
            priority,
            assigned_to,
            response_time_hours: self.response_time_hours,
            resolution_time_hours: self.resolution_time_hours,
        };
        match NewTicketValidator::validate(&ticket) {
            Ok(()) if errors.is_empty() => Ok(ticket),
            Ok(()) => Err(errors),
            Err(more) => {
                errors.extend(more);
                Err(errors)
            }
        }
    }
}

fn parse_field<T>(field: &str, value: &str, errors: &mut Vec<ValidationError>) -> Option<T>
where
    T: FromStr<Err = TicketError>,
{
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            errors.push(ValidationError::new(field, err.to_string()));
            None
        }
    }
}

/// Validates typed new-ticket input.
pub struct NewTicketValidator;

impl NewTicketValidator {
    /// Check ranges and lengths of a new ticket.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any rule is violated.
    pub fn validate(ticket: &NewTicket) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if ticket.issue.chars().count() > MAX_ISSUE_CHARS {
            errors.push(ValidationError::new(
                "issue",
                format!("exceeds {MAX_ISSUE_CHARS} characters"),
            ));
        }

        if !RESPONSE_TIME_RANGE.contains(&ticket.response_time_hours) {
            errors.push(ValidationError::new(
                "response_time_hours",
                format!(
                    "must be {}-{}, got {}",
                    RESPONSE_TIME_RANGE.start(),
                    RESPONSE_TIME_RANGE.end(),
                    ticket.response_time_hours
                ),
            ));
        }

        if !RESOLUTION_TIME_RANGE.contains(&ticket.resolution_time_hours) {
            errors.push(ValidationError::new(
                "resolution_time_hours",
                format!(
                    "must be {}-{}, got {}",
                    RESOLUTION_TIME_RANGE.start(),
                    RESOLUTION_TIME_RANGE.end(),
                    ticket.resolution_time_hours
                ),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Parse a list of enum values from repeated flags.
///
/// An empty list means "no restriction" and yields every value.
///
/// # Errors
///
/// Returns a validation error naming the first value that does not parse.
pub fn parse_selection<T>(field: &str, values: &[String], all: &[T]) -> Result<Vec<T>, ValidationError>
where
    T: FromStr<Err = TicketError> + Copy + PartialEq,
{
    if values.is_empty() {
        return Ok(all.to_vec());
    }
    let mut selected: Vec<T> = Vec::with_capacity(values.len());
    for value in values {
        let parsed: T = value
            .parse()
            .map_err(|err: TicketError| ValidationError::new(field, err.to_string()))?;
        if !selected.contains(&parsed) {
            selected.push(parsed);
        }
    }
    Ok(selected)
}

/// Parse `--status` flags.
///
/// # Errors
///
/// Returns a validation error for an unknown status.
pub fn parse_statuses(values: &[String]) -> Result<Vec<Status>, ValidationError> {
    parse_selection("status", values, &Status::ALL)
}
