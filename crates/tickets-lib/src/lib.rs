//! `tickets-lib` - In-process support ticket store.
//!
//! Holds a session's ticket table in memory: synthetic seeding, form
//! submission, filtered views, edit merging, aggregate metrics and CSV
//! export. Nothing is persisted between sessions.
//!
//! # Quick Start
//!
//! ```no_run
//! use tickets_lib::{Assignee, NewTicket, Priority, SeedConfig, Status, TicketFilter, TicketStore};
//!
//! // Seed the session table (100 rows, seed 42)
//! let mut store = TicketStore::seed(&SeedConfig::default()).unwrap();
//!
//! // Submit a ticket
//! let created = store.add_ticket(NewTicket {
//!     issue: "VPN drops every hour".into(),
//!     priority: Priority::High,
//!     assigned_to: Assignee::JaneSmith,
//!     ..Default::default()
//! }).unwrap();
//! assert_eq!(created.status, Status::Open);
//!
//! // Filter
//! let view = store.filter(&TicketFilter { search: "vpn".into(), ..Default::default() });
//! println!("{} matching tickets", view.len());
//!
//! // Metrics and export
//! let open = store.metrics().open_count;
//! let csv = store.export_csv();
//! # let _ = (open, csv);
//! ```

pub mod csv;
pub mod error;
pub mod model;
pub mod query;
pub mod seed;
pub mod session;
pub mod stats;
pub mod store;

pub use error::{Result, TicketError, ValidationError};
pub use model::{Assignee, NewTicket, Priority, Status, Ticket, TicketId};
pub use query::{EditSummary, TicketEdit, TicketFilter};
pub use seed::SeedConfig;
pub use session::{Action, ExportFormat, Frame, Session};
pub use stats::{FiveNumberSummary, Metrics};
pub use store::{TicketStore, TicketView};
