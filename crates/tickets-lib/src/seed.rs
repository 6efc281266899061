//! Synthetic ticket generation.
//!
//! A session starts from a reproducible table: every column is sampled
//! independently from small fixed sets with a seeded PRNG, so the same
//! seed and row count always yield the same rows.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TicketError};
use crate::model::{Assignee, Priority, Status, Ticket, TicketId};

/// Issue texts the generator samples from.
pub const ISSUE_DESCRIPTIONS: [&str; 20] = [
    "Network connectivity issues",
    "Application crashing",
    "Printer malfunction",
    "Email server downtime",
    "Backup failure",
    "Login problems",
    "Website slowdown",
    "Security vulnerability",
    "Hardware malfunction",
    "Access issue with shared files",
    "Database connection issue",
    "App data not syncing",
    "VoIP phone issues",
    "VPN problems for remote workers",
    "System update issues",
    "File server storage low",
    "Intrusion detection alerts",
    "Inventory system errors",
    "Customer data missing",
    "Collaboration tool issue",
];

/// Response times are drawn from `1..=11` hours.
pub const RESPONSE_HOURS: std::ops::RangeInclusive<u32> = 1..=11;

/// Resolution times are drawn from `10..=71` hours.
pub const RESOLUTION_HOURS: std::ops::RangeInclusive<u32> = 10..=71;

/// Parameters of the synthetic table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Number of rows to generate.
    pub rows: usize,
    /// PRNG seed.
    pub seed: u64,
    /// Numeric id of the first generated row; later rows count down.
    pub start_number: u64,
    /// First possible submission date.
    pub window_start: NaiveDate,
    /// Length of the submission window in days (inclusive).
    pub window_days: u32,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            rows: 100,
            seed: 42,
            start_number: 1100,
            window_start: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap_or_default(),
            window_days: 182,
        }
    }
}

impl SeedConfig {
    /// Check that the configuration yields positive, unique ids.
    ///
    /// # Errors
    ///
    /// Returns `Config` if `rows` exceeds `start_number`, or if the
    /// submission window ends past the last representable date.
    pub fn validate(&self) -> Result<()> {
        let rows = u64::try_from(self.rows).unwrap_or(u64::MAX);
        if rows > self.start_number {
            return Err(TicketError::Config(format!(
                "cannot seed {} rows counting down from {}",
                self.rows, self.start_number
            )));
        }
        if self.window_end().is_none() {
            return Err(TicketError::Config(format!(
                "submission window of {} days from {} is out of range",
                self.window_days, self.window_start
            )));
        }
        Ok(())
    }

    /// Last possible submission date, if representable.
    #[must_use]
    pub fn window_end(&self) -> Option<NaiveDate> {
        self.window_start
            .checked_add_signed(Duration::days(i64::from(self.window_days)))
    }
}

/// Generate the synthetic rows, highest id first.
///
/// # Errors
///
/// Returns `Config` if the configuration is invalid.
pub fn generate(config: &SeedConfig) -> Result<Vec<Ticket>> {
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let tickets: Vec<Ticket> = (0..config.start_number)
        .take(config.rows)
        .map(|offset| {
            let days = rng.random_range(0..=config.window_days);
            Ticket {
                id: TicketId(config.start_number - offset),
                issue: pick(&mut rng, &ISSUE_DESCRIPTIONS).to_string(),
                status: pick(&mut rng, &Status::ALL),
                priority: pick(&mut rng, &Priority::ALL),
                date_submitted: config.window_start + Duration::days(i64::from(days)),
                assigned_to: pick(&mut rng, &Assignee::ALL),
                response_time_hours: rng.random_range(RESPONSE_HOURS),
                resolution_time_hours: rng.random_range(RESOLUTION_HOURS),
            }
        })
        .collect();

    debug!(rows = tickets.len(), seed = config.seed, "Generated synthetic tickets");
    Ok(tickets)
}

fn pick<T: Copy>(rng: &mut StdRng, items: &[T]) -> T {
    items[rng.random_range(0..items.len())]
}
