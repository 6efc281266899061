//! In-memory ticket store.
//!
//! Holds the authoritative table for one session, newest ticket first.
//! Derived data (filtered views, metrics, exports) is computed on demand
//! from the current rows.

use std::collections::HashMap;
use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::csv;
use crate::error::{Result, TicketError};
use crate::model::{NewTicket, Priority, Status, Ticket, TicketId};
use crate::query::{EditSummary, TicketEdit, TicketFilter};
use crate::seed::{self, SeedConfig};
use crate::stats::Metrics;

/// In-memory support ticket table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketStore {
    tickets: Vec<Ticket>,
    /// Highest numeric id ever issued; never decreases.
    high_water: u64,
}

/// A filtered, borrowed subset of the store, in store order.
#[derive(Debug, Clone)]
pub struct TicketView<'a> {
    rows: Vec<&'a Ticket>,
}

impl<'a> TicketView<'a> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Ticket> + '_ {
        self.rows.iter().copied()
    }

    /// Clone the visible rows, e.g. to hand them to an editor.
    #[must_use]
    pub fn to_tickets(&self) -> Vec<Ticket> {
        self.rows.iter().map(|t| (*t).clone()).collect()
    }
}

impl TicketStore {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Create a store populated with synthetic tickets.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the seed configuration is invalid.
    pub fn seed(config: &SeedConfig) -> Result<Self> {
        let tickets = seed::generate(config)?;
        info!(rows = tickets.len(), seed = config.seed, "Seeded ticket store");
        // An empty seed still reserves the start number so ids keep counting up from it.
        Ok(Self::from_rows(tickets, config.start_number))
    }

    /// Create a store from existing rows (e.g. an earlier export).
    ///
    /// # Errors
    ///
    /// Returns `Validation` if two rows share an id.
    pub fn from_tickets(tickets: Vec<Ticket>) -> Result<Self> {
        let mut seen: HashMap<TicketId, usize> = HashMap::with_capacity(tickets.len());
        for (idx, ticket) in tickets.iter().enumerate() {
            if let Some(first) = seen.insert(ticket.id, idx) {
                return Err(TicketError::validation(
                    "id",
                    format!("{} appears in rows {} and {}", ticket.id, first + 1, idx + 1),
                ));
            }
        }
        Ok(Self::from_rows(tickets, 0))
    }

    /// Load a store from a CSV export.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `CsvParse` if it is
    /// malformed, or `Validation` on duplicate ids.
    pub fn open_csv(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let store = Self::from_tickets(csv::parse_tickets(&text)?)?;
        info!(rows = store.len(), path = %path.as_ref().display(), "Loaded tickets from CSV");
        Ok(store)
    }

    fn from_rows(tickets: Vec<Ticket>, floor: u64) -> Self {
        let high_water = tickets
            .iter()
            .map(|t| t.id.number())
            .max()
            .map_or(floor, |max| max.max(floor));
        Self {
            tickets,
            high_water,
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Add a ticket submitted today.
    ///
    /// See [`TicketStore::add_ticket_on`].
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the id space is exhausted.
    pub fn add_ticket(&mut self, new: NewTicket) -> Result<&Ticket> {
        self.add_ticket_on(new, Local::now().date_naive())
    }

    /// Add a ticket with an explicit submission date.
    ///
    /// The ticket gets the next id after the highest ever issued, starts
    /// `Open`, and is placed at the top of the table.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the highest issued id has no successor.
    pub fn add_ticket_on(&mut self, new: NewTicket, date_submitted: NaiveDate) -> Result<&Ticket> {
        let last = TicketId(self.high_water);
        let id = last.next().ok_or_else(|| {
            TicketError::validation("id", format!("no id left after {last}"))
        })?;
        self.high_water = id.number();

        let ticket = Ticket {
            id,
            issue: new.issue,
            status: Status::Open,
            priority: new.priority,
            date_submitted,
            assigned_to: new.assigned_to,
            response_time_hours: new.response_time_hours,
            resolution_time_hours: new.resolution_time_hours,
        };
        info!(id = %ticket.id, priority = %ticket.priority, assignee = %ticket.assigned_to, "Ticket submitted");

        self.tickets.insert(0, ticket);
        Ok(&self.tickets[0])
    }

    /// Merge edited rows back by id.
    ///
    /// Only `status` and `priority` are taken from an edit. Rows not named
    /// by any edit are left alone; edits for unknown ids are skipped.
    pub fn apply_edits<I>(&mut self, edits: I) -> EditSummary
    where
        I: IntoIterator<Item = TicketEdit>,
    {
        let index: HashMap<TicketId, usize> = self
            .tickets
            .iter()
            .enumerate()
            .map(|(idx, t)| (t.id, idx))
            .collect();

        let mut summary = EditSummary::default();
        // Pre-merge cells of every touched row, in first-touch order.
        let mut touched: Vec<(usize, Status, Priority)> = Vec::new();
        for edit in edits {
            let Some(&idx) = index.get(&edit.id) else {
                warn!(id = %edit.id, "Skipping edit for unknown ticket");
                summary.unknown.push(edit.id);
                continue;
            };

            let ticket = &mut self.tickets[idx];
            if ticket.status == edit.status && ticket.priority == edit.priority {
                continue;
            }
            if !touched.iter().any(|(i, _, _)| *i == idx) {
                touched.push((idx, ticket.status, ticket.priority));
            }
            debug!(
                id = %ticket.id,
                old_status = %ticket.status,
                new_status = %edit.status,
                old_priority = %ticket.priority,
                new_priority = %edit.priority,
                "Applying edit"
            );
            ticket.status = edit.status;
            ticket.priority = edit.priority;
        }

        summary.changed = touched
            .into_iter()
            .filter(|&(idx, status, priority)| {
                let ticket = &self.tickets[idx];
                ticket.status != status || ticket.priority != priority
            })
            .map(|(idx, _, _)| self.tickets[idx].id)
            .collect();

        if !summary.is_noop() {
            info!(changed = summary.changed.len(), "Merged ticket edits");
        }
        summary
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// All rows, newest first.
    #[must_use]
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Get a single ticket by id.
    ///
    /// # Errors
    ///
    /// Returns `TicketNotFound` if no row has that id.
    pub fn get(&self, id: TicketId) -> Result<&Ticket> {
        self.tickets
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| TicketError::TicketNotFound { id: id.to_string() })
    }

    /// Rows matching every predicate of `filter`.
    #[must_use]
    pub fn filter(&self, filter: &TicketFilter) -> TicketView<'_> {
        let rows: Vec<&Ticket> = self.tickets.iter().filter(|t| filter.matches(t)).collect();
        debug!(matched = rows.len(), total = self.tickets.len(), "Filtered tickets");
        TicketView { rows }
    }

    /// Aggregate metrics over the full table.
    #[must_use]
    pub fn metrics(&self) -> Metrics {
        Metrics::compute(&self.tickets)
    }

    /// Get the total number of tickets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// The full table as CSV bytes, regardless of any active filter.
    #[must_use]
    pub fn export_csv(&self) -> Vec<u8> {
        csv::write_tickets(&self.tickets).into_bytes()
    }

    /// The full table as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns `Json` if serialization fails.
    pub fn export_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.tickets)?)
    }
}
