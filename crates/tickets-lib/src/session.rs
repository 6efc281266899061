//! One user session over a ticket store.
//!
//! Every interaction is an [`Action`]. [`Session::dispatch`] runs a full
//! pass for it: seed the store if this is the first interaction, apply the
//! action, then recompute the filtered view and the metrics into a
//! [`Frame`] for the caller to render.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::model::{NewTicket, Ticket};
use crate::query::{EditSummary, TicketEdit, TicketFilter};
use crate::seed::SeedConfig;
use crate::stats::Metrics;
use crate::store::TicketStore;

/// Export encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => crate::csv::CSV_MIME_TYPE,
            Self::Json => "application/json",
        }
    }
}

/// A single user interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Submit the new-ticket form.
    Add {
        #[serde(flatten)]
        ticket: NewTicket,
        /// Submission date; today when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        date: Option<NaiveDate>,
    },
    /// Save edited cells from the grid.
    Edit { edits: Vec<TicketEdit> },
    /// Replace the active view filter.
    Filter {
        #[serde(flatten)]
        filter: TicketFilter,
    },
    /// Re-render without changing anything.
    Show,
    /// Render metrics only.
    Stats,
    /// Download the full table.
    Export {
        #[serde(default)]
        format: ExportFormat,
    },
}

/// Exported table payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Export {
    pub format: ExportFormat,
    pub file_name: String,
    pub mime_type: &'static str,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Everything derived from one interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Ticket created by this interaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<Ticket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edits: Option<EditSummary>,
    /// Size of the full table.
    pub total: usize,
    pub filter: TicketFilter,
    /// Rows of the filtered view, in store order.
    pub view: Vec<Ticket>,
    /// Metrics over the full table.
    pub metrics: Metrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<Export>,
}

/// Session state: the store (seeded lazily) and the active filter.
#[derive(Debug, Clone)]
pub struct Session {
    seed: SeedConfig,
    store: Option<TicketStore>,
    filter: TicketFilter,
}

impl Session {
    /// Create a session that seeds its store on first use.
    #[must_use]
    pub fn new(seed: SeedConfig) -> Self {
        Self {
            seed,
            store: None,
            filter: TicketFilter::default(),
        }
    }

    /// Create a session over an existing store.
    #[must_use]
    pub fn with_store(store: TicketStore) -> Self {
        Self {
            seed: SeedConfig::default(),
            store: Some(store),
            filter: TicketFilter::default(),
        }
    }

    /// The store, seeding it first if needed.
    ///
    /// # Errors
    ///
    /// Returns `Config` if seeding fails.
    pub fn store(&mut self) -> Result<&mut TicketStore> {
        let store = match self.store.take() {
            Some(store) => store,
            None => TicketStore::seed(&self.seed)?,
        };
        Ok(self.store.insert(store))
    }

    #[must_use]
    pub const fn filter(&self) -> &TicketFilter {
        &self.filter
    }

    /// Handle one interaction and recompute the derived views.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the store cannot be seeded, or `Json` if a JSON
    /// export fails.
    pub fn dispatch(&mut self, action: Action) -> Result<Frame> {
        debug!(?action, "Dispatching session action");

        let mut created = None;
        let mut edits = None;
        let mut export = None;

        match action {
            Action::Add { ticket, date } => {
                let store = self.store()?;
                let ticket = match date {
                    Some(date) => store.add_ticket_on(ticket, date)?,
                    None => store.add_ticket(ticket)?,
                };
                created = Some(ticket.clone());
            }
            Action::Edit { edits: rows } => {
                edits = Some(self.store()?.apply_edits(rows));
            }
            Action::Filter { filter } => {
                self.store()?;
                self.filter = filter;
            }
            Action::Show | Action::Stats => {
                self.store()?;
            }
            Action::Export { format } => {
                let store = self.store()?;
                let (bytes, file_name) = match format {
                    ExportFormat::Csv => (
                        store.export_csv(),
                        crate::csv::EXPORT_FILE_NAME.to_string(),
                    ),
                    ExportFormat::Json => {
                        (store.export_json()?, "support_tickets.json".to_string())
                    }
                };
                export = Some(Export {
                    format,
                    file_name,
                    mime_type: format.mime_type(),
                    bytes,
                });
            }
        }

        let filter = self.filter.clone();
        let store = self.store()?;
        let view = store.filter(&filter).to_tickets();
        Ok(Frame {
            created,
            edits,
            total: store.len(),
            filter,
            view,
            metrics: store.metrics(),
            export,
        })
    }
}
