//! Core data types for tickets-lib.
//!
//! Enum values serialize with their display names ("In Progress",
//! "John Doe") so JSON output and CSV export share one vocabulary.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TicketError;

/// Prefix of every ticket identifier.
pub const ID_PREFIX: &str = "TICKET-";

/// Canonical date format for `date_submitted`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Ticket identifier of the form `TICKET-<number>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TicketId(pub u64);

impl TicketId {
    /// Numeric suffix of the identifier.
    #[must_use]
    pub const fn number(self) -> u64 {
        self.0
    }

    /// The identifier that follows this one; `None` past `u64::MAX`.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ID_PREFIX}{}", self.0)
    }
}

impl FromStr for TicketId {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TicketError::InvalidId { id: s.to_string() };
        let digits = s.trim().strip_prefix(ID_PREFIX).ok_or_else(invalid)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        digits.parse::<u64>().map(Self).map_err(|_| invalid())
    }
}

impl Serialize for TicketId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TicketId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Ticket workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Closed,
}

impl Status {
    /// Every status, in display order.
    pub const ALL: [Self; 3] = [Self::Open, Self::InProgress, Self::Closed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Closed => "Closed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "open" => Ok(Self::Open),
            "inprogress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            _ => Err(TicketError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// Ticket priority.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Every priority, highest first.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(TicketError::InvalidPriority {
                priority: s.to_string(),
            }),
        }
    }
}

/// Support team member a ticket can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Assignee {
    #[default]
    #[serde(rename = "John Doe")]
    JohnDoe,
    #[serde(rename = "Jane Smith")]
    JaneSmith,
    #[serde(rename = "Alex Brown")]
    AlexBrown,
    #[serde(rename = "Chris White")]
    ChrisWhite,
}

impl Assignee {
    /// The whole team, in form order.
    pub const ALL: [Self; 4] = [
        Self::JohnDoe,
        Self::JaneSmith,
        Self::AlexBrown,
        Self::ChrisWhite,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JohnDoe => "John Doe",
            Self::JaneSmith => "Jane Smith",
            Self::AlexBrown => "Alex Brown",
            Self::ChrisWhite => "Chris White",
        }
    }
}

impl fmt::Display for Assignee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Assignee {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "johndoe" => Ok(Self::JohnDoe),
            "janesmith" => Ok(Self::JaneSmith),
            "alexbrown" => Ok(Self::AlexBrown),
            "chriswhite" => Ok(Self::ChrisWhite),
            _ => Err(TicketError::InvalidAssignee {
                assignee: s.to_string(),
            }),
        }
    }
}

/// Lowercase and drop separators so "In Progress", "in_progress" and
/// "in-progress" all compare equal.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `InvalidDate` if the value is not a valid ISO calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, TicketError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| TicketError::InvalidDate {
        value: value.to_string(),
    })
}

/// One row of the ticket table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ticket {
    /// Unique ID (e.g., "TICKET-1101").
    pub id: TicketId,

    /// Free-text issue description.
    pub issue: String,

    /// Workflow status; editable.
    pub status: Status,

    /// Priority; editable.
    pub priority: Priority,

    /// Submission date, fixed at creation.
    pub date_submitted: NaiveDate,

    pub assigned_to: Assignee,

    /// Estimated first response time in hours.
    pub response_time_hours: u32,

    /// Estimated resolution time in hours.
    pub resolution_time_hours: u32,
}

/// Form input for a new ticket.
///
/// Everything except `id`, `status` and `date_submitted`, which the store
/// assigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTicket {
    #[serde(default)]
    pub issue: String,
    pub priority: Priority,
    pub assigned_to: Assignee,
    #[serde(default = "default_response_time")]
    pub response_time_hours: u32,
    #[serde(default = "default_resolution_time")]
    pub resolution_time_hours: u32,
}

/// Form default for the first response estimate.
pub const DEFAULT_RESPONSE_TIME_HOURS: u32 = 3;

/// Form default for the resolution estimate.
pub const DEFAULT_RESOLUTION_TIME_HOURS: u32 = 24;

const fn default_response_time() -> u32 {
    DEFAULT_RESPONSE_TIME_HOURS
}

const fn default_resolution_time() -> u32 {
    DEFAULT_RESOLUTION_TIME_HOURS
}

impl Default for NewTicket {
    fn default() -> Self {
        Self {
            issue: String::new(),
            priority: Priority::High,
            assigned_to: Assignee::default(),
            response_time_hours: DEFAULT_RESPONSE_TIME_HOURS,
            resolution_time_hours: DEFAULT_RESOLUTION_TIME_HOURS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_id_roundtrips_through_display() {
        let id: TicketId = "TICKET-1100".parse().unwrap();
        assert_eq!(id, TicketId(1100));
        assert_eq!(id.to_string(), "TICKET-1100");
        assert_eq!(id.next(), Some(TicketId(1101)));
    }

    #[test]
    fn ticket_id_has_no_successor_at_max() {
        let id: TicketId = "TICKET-18446744073709551615".parse().unwrap();
        assert_eq!(id.next(), None);
    }

    #[test]
    fn ticket_id_rejects_malformed_values() {
        for bad in ["", "TICKET-", "TICKET-12a", "ticket-12", "BUG-12", "TICKET--1"] {
            assert!(bad.parse::<TicketId>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn status_parses_display_and_snake_forms() {
        assert_eq!("In Progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("in_progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("OPEN".parse::<Status>().unwrap(), Status::Open);
        assert!("resolved".parse::<Status>().is_err());
    }

    #[test]
    fn priority_and_assignee_parse_case_insensitively() {
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("jane smith".parse::<Assignee>().unwrap(), Assignee::JaneSmith);
        assert_eq!("Chris-White".parse::<Assignee>().unwrap(), Assignee::ChrisWhite);
        assert!("Urgent".parse::<Priority>().is_err());
        assert!("Bob".parse::<Assignee>().is_err());
    }

    #[test]
    fn ticket_serializes_display_names() {
        let ticket = Ticket {
            id: TicketId(7),
            issue: "VPN problems".to_string(),
            status: Status::InProgress,
            priority: Priority::Low,
            date_submitted: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            assigned_to: Assignee::AlexBrown,
            response_time_hours: 2,
            resolution_time_hours: 30,
        };
        let json = serde_json::to_string(&ticket).unwrap();
        assert!(json.contains(r#""id":"TICKET-7""#));
        assert!(json.contains(r#""status":"In Progress""#));
        assert!(json.contains(r#""assigned_to":"Alex Brown""#));
        assert!(json.contains(r#""date_submitted":"2023-06-01""#));

        let back: Ticket = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ticket);
    }

    #[test]
    fn new_ticket_fills_form_defaults() {
        let new: NewTicket =
            serde_json::from_str(r#"{"priority":"High","assigned_to":"John Doe"}"#).unwrap();
        assert_eq!(new.issue, "");
        assert_eq!(new.response_time_hours, DEFAULT_RESPONSE_TIME_HOURS);
        assert_eq!(new.resolution_time_hours, DEFAULT_RESOLUTION_TIME_HOURS);
    }

    #[test]
    fn parse_date_requires_iso_form() {
        assert_eq!(
            parse_date("2023-12-01").unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()
        );
        assert!(parse_date("12-01-2023").is_err());
    }
}
