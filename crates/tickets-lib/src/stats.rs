//! Aggregate metrics over the ticket table.
//!
//! Everything here is recomputed from the full table on demand; nothing is
//! maintained incrementally.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::model::{Assignee, Priority, Status, Ticket};

/// Summary statistics for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total: usize,
    pub open_count: usize,
    /// Mean first response time; `None` for an empty table.
    pub avg_response_hours: Option<f64>,
    /// Mean resolution time; `None` for an empty table.
    pub avg_resolution_hours: Option<f64>,
    pub by_status: Vec<(Status, usize)>,
    pub by_priority: Vec<(Priority, usize)>,
    pub by_assignee: Vec<(Assignee, usize)>,
    /// Status counts per submission month, oldest month first.
    pub by_month: Vec<MonthlyStatus>,
    pub resolution_distribution: Option<FiveNumberSummary>,
}

/// Status counts for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyStatus {
    /// `YYYY-MM`.
    pub month: String,
    pub counts: Vec<(Status, usize)>,
}

/// Min, quartiles and max of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl FiveNumberSummary {
    /// Summarize a sample; `None` when it is empty.
    ///
    /// Quartiles interpolate linearly between order statistics.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops
)]
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

impl Metrics {
    /// Compute every aggregate from `tickets`.
    #[must_use]
    pub fn compute(tickets: &[Ticket]) -> Self {
        let total = tickets.len();

        let resolution: Vec<f64> = tickets
            .iter()
            .map(|t| f64::from(t.resolution_time_hours))
            .collect();

        let mut metrics = Self {
            total,
            open_count: 0,
            avg_response_hours: mean(tickets.iter().map(|t| t.response_time_hours)),
            avg_resolution_hours: mean(tickets.iter().map(|t| t.resolution_time_hours)),
            by_status: count_by(tickets, &Status::ALL, |t| t.status),
            by_priority: count_by(tickets, &Priority::ALL, |t| t.priority),
            by_assignee: count_by(tickets, &Assignee::ALL, |t| t.assigned_to),
            by_month: monthly_status(tickets),
            resolution_distribution: FiveNumberSummary::from_values(&resolution),
        };
        metrics.open_count = metrics.status_count(Status::Open);
        metrics
    }

    /// Count for one status.
    #[must_use]
    pub fn status_count(&self, status: Status) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, n)| *n)
    }
}

fn count_by<K, F>(tickets: &[Ticket], keys: &[K], key_of: F) -> Vec<(K, usize)>
where
    K: Copy + PartialEq,
    F: Fn(&Ticket) -> K,
{
    keys.iter()
        .map(|k| (*k, tickets.iter().filter(|t| key_of(t) == *k).count()))
        .collect()
}

fn mean(values: impl Iterator<Item = u32>) -> Option<f64> {
    let (sum, n) = values.fold((0_u64, 0_usize), |(sum, n), v| (sum + u64::from(v), n + 1));
    (n > 0).then(|| sum as f64 / n as f64)
}

fn monthly_status(tickets: &[Ticket]) -> Vec<MonthlyStatus> {
    let mut months: BTreeMap<(i32, u32), [usize; 3]> = BTreeMap::new();
    for ticket in tickets {
        let date = ticket.date_submitted;
        let slot = Status::ALL
            .iter()
            .position(|s| *s == ticket.status)
            .unwrap_or_default();
        months.entry((date.year(), date.month())).or_default()[slot] += 1;
    }

    months
        .into_iter()
        .map(|((year, month), counts)| MonthlyStatus {
            month: format!("{year:04}-{month:02}"),
            counts: Status::ALL.iter().copied().zip(counts).collect(),
        })
        .collect()
}
