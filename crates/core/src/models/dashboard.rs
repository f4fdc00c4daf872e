use serde::{Deserialize, Serialize};

use super::calendar::CalendarEvent;

/// One bar of the revenue chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    /// 3-letter month abbreviation (e.g., "Mär")
    pub label: String,
    pub month: u32,
    pub year: i32,
    pub total_amount: f64,
    /// True only for the newest point (the reference month)
    pub is_current_month: bool,
}

/// Trailing months, oldest first.
pub type RevenueSeries = Vec<RevenuePoint>;

/// Invoice total of one billing period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: u32,
    pub year: i32,
    pub total_amount: f64,
    pub invoice_count: usize,
}

/// Appointment counts per status for the ring chart legend.
///
/// Appointments with an unknown status are not counted anywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub completed: usize,
    pub scheduled: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.completed + self.scheduled + self.cancelled
    }
}

/// Invoice amounts split by who pays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipientBreakdown {
    pub client: f64,
    pub commissioning_party: f64,
}

/// Everything the dashboard page shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub as_of: chrono::NaiveDate,

    /// Sum of all invoices
    pub total_amount: f64,

    /// Sum of invoices billed for the current month
    pub current_month_amount: f64,

    pub invoice_count: usize,

    pub revenue: RevenueSeries,

    /// Appointment statuses in the current month
    pub status_counts: StatusCounts,

    /// Next scheduled appointments, soonest first
    pub upcoming: Vec<CalendarEvent>,
}
