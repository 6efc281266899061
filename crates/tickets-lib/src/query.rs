//! Filter and edit types for ticket operations.

use serde::{Deserialize, Serialize};

use crate::model::{Assignee, Priority, Status, Ticket, TicketId};

/// View criteria. All four predicates are ANDed.
///
/// The default selects every status, priority and assignee with an empty
/// search, so it matches the whole table. An empty set matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketFilter {
    pub statuses: Vec<Status>,
    pub priorities: Vec<Priority>,
    pub assignees: Vec<Assignee>,
    /// Case-insensitive substring of the issue text.
    pub search: String,
}

impl Default for TicketFilter {
    fn default() -> Self {
        Self {
            statuses: Status::ALL.to_vec(),
            priorities: Priority::ALL.to_vec(),
            assignees: Assignee::ALL.to_vec(),
            search: String::new(),
        }
    }
}

impl TicketFilter {
    /// Check one ticket against every predicate.
    #[must_use]
    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.statuses.contains(&ticket.status)
            && self.priorities.contains(&ticket.priority)
            && self.assignees.contains(&ticket.assigned_to)
            && contains_ignore_case(&ticket.issue, &self.search)
    }

    /// True when the filter selects every row.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        Status::ALL.iter().all(|s| self.statuses.contains(s))
            && Priority::ALL.iter().all(|p| self.priorities.contains(p))
            && Assignee::ALL.iter().all(|a| self.assignees.contains(a))
            && self.search.is_empty()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Edited cells of one row, keyed by id.
///
/// Only `status` and `priority` are editable; every other column is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketEdit {
    pub id: TicketId,
    pub status: Status,
    pub priority: Priority,
}

impl From<&Ticket> for TicketEdit {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id,
            status: ticket.status,
            priority: ticket.priority,
        }
    }
}

/// Outcome of merging an edited view back into the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSummary {
    /// Rows whose status or priority actually changed.
    pub changed: Vec<TicketId>,
    /// Edited rows whose id is not in the store.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub unknown: Vec<TicketId>,
}

impl EditSummary {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}
