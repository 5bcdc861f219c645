//! Dashboard statistics

use serde::{Deserialize, Serialize};

/// Aggregate counters shown on the dashboard.
///
/// `Default` is the all-zero snapshot reported when the backend is
/// unreachable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub total_clients: u64,
    pub total_establishments: u64,
    pub total_sales_reps: u64,
    pub active_clients: u64,
    pub active_establishments: u64,
    pub active_sales_reps: u64,
    /// Inactive sales reps plus inactive establishments
    pub pending_validation: u64,
    pub monthly_revenue: f64,
    pub total_bookings: u64,
}

impl Stats {
    /// Derive counters from the sales rep and establishment active flags.
    ///
    /// Clients, revenue and bookings have no backing source and stay zero.
    pub fn from_activity(
        sales_reps: impl IntoIterator<Item = bool>,
        establishments: impl IntoIterator<Item = bool>,
    ) -> Self {
        let (total_sales_reps, active_sales_reps) = count_active(sales_reps);
        let (total_establishments, active_establishments) = count_active(establishments);

        Self {
            total_sales_reps,
            active_sales_reps,
            total_establishments,
            active_establishments,
            pending_validation: (total_sales_reps - active_sales_reps)
                + (total_establishments - active_establishments),
            ..Self::default()
        }
    }
}

fn count_active(flags: impl IntoIterator<Item = bool>) -> (u64, u64) {
    flags
        .into_iter()
        .fold((0, 0), |(total, active), is_active| {
            (total + 1, active + u64::from(is_active))
        })
}
