use chrono::{Datelike, NaiveDateTime};
use tracing::debug;

use crate::datetime;
use crate::models::appointment::{Appointment, AppointmentStatus};
use crate::models::calendar::CalendarEvent;
use crate::models::dashboard::{DashboardSummary, StatusCounts};
use crate::models::invoice::Invoice;
use crate::models::settings::Settings;
use crate::services::calendar_service::CalendarService;
use crate::services::invoice_service::InvoiceService;

/// Computes the dashboard figures: appointment status ring, upcoming
/// sessions and the revenue chart.
#[derive(Debug, Clone)]
pub struct DashboardService {
    calendar_service: CalendarService,
    invoice_service: InvoiceService,
    revenue_months: u32,
    upcoming_limit: usize,
}

impl DashboardService {
    pub fn new(calendar_service: CalendarService, settings: &Settings) -> Self {
        Self {
            calendar_service,
            invoice_service: InvoiceService::new(),
            revenue_months: settings.revenue_months,
            upcoming_limit: settings.upcoming_limit,
        }
    }

    /// Appointments starting in `month`/`year`, counted by status.
    ///
    /// Appointments with an unknown status or an unparsable start are left
    /// out of every bucket, so `total()` equals the number of in-period
    /// appointments with a recognised status.
    pub fn status_counts(&self, appointments: &[Appointment], month: u32, year: i32) -> StatusCounts {
        let tz = self.calendar_service.timezone();
        let mut counts = StatusCounts::default();

        for appointment in appointments {
            let Some(start) = datetime::parse_local_datetime(&appointment.start, &tz) else {
                debug!(id = %appointment.id, "status count skips appointment without a valid start");
                continue;
            };
            if start.month() != month || start.year() != year {
                continue;
            }
            match appointment.status {
                AppointmentStatus::Completed => counts.completed += 1,
                AppointmentStatus::Scheduled => counts.scheduled += 1,
                AppointmentStatus::Cancelled => counts.cancelled += 1,
                AppointmentStatus::Unknown => {}
            }
        }

        counts
    }

    /// Scheduled appointments starting at or after `now`, soonest first,
    /// at most `limit`.
    pub fn upcoming(
        &self,
        appointments: &[Appointment],
        now: NaiveDateTime,
        limit: usize,
    ) -> Vec<CalendarEvent> {
        let mut events: Vec<CalendarEvent> = self
            .calendar_service
            .to_events(appointments)
            .into_iter()
            .filter(|e| e.status == AppointmentStatus::Scheduled && e.start >= now)
            .collect();
        events.sort_by_key(|e| e.start);
        events.truncate(limit);
        events
    }

    /// Full dashboard snapshot as of `now`.
    pub fn summary(
        &self,
        appointments: &[Appointment],
        invoices: &[Invoice],
        now: NaiveDateTime,
    ) -> DashboardSummary {
        let today = now.date();
        let (month, year) = (today.month(), today.year());

        DashboardSummary {
            as_of: today,
            total_amount: self.invoice_service.total_amount(invoices),
            current_month_amount: self.invoice_service.amount_for_period(invoices, month, year),
            invoice_count: invoices.len(),
            revenue: self
                .invoice_service
                .revenue_series(invoices, today, self.revenue_months),
            status_counts: self.status_counts(appointments, month, year),
            upcoming: self.upcoming(appointments, now, self.upcoming_limit),
        }
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new(CalendarService::default(), &Settings::default())
    }
}
