pub mod datetime;
pub mod errors;
pub mod locale;
pub mod models;
pub mod services;

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use models::{
    appointment::{Appointment, AppointmentDraft, NewAppointment},
    calendar::{CalendarEvent, CalendarView, DayGrid, Direction, MonthGridCell, ViewMode, WeekGrid},
    client::Client,
    commissioning_party::CommissioningParty,
    dashboard::{DashboardSummary, MonthlyTotal, RecipientBreakdown, RevenueSeries, StatusCounts},
    invoice::Invoice,
    list::{ListRecord, SortConfig},
    settings::Settings,
    therapist::Therapist,
};
use services::{
    appointment_service::AppointmentService,
    calendar_service::CalendarService,
    dashboard_service::DashboardService,
    invoice_service::InvoiceService,
    list_service::{
        ListService, CLIENT_SEARCH_FIELDS, COMMISSIONING_PARTY_SEARCH_FIELDS,
        INVOICE_SEARCH_FIELDS, THERAPIST_SEARCH_FIELDS,
    },
};

use errors::CoreError;

/// Main entry point for the praxis-core library.
///
/// Holds the practice settings and the services built from them. It keeps
/// no record state: every method takes the current API snapshot and, where
/// "today" matters, an explicit `now` in practice-local time.
#[must_use]
#[derive(Debug, Clone)]
pub struct PracticeCore {
    settings: Settings,
    calendar_service: CalendarService,
    invoice_service: InvoiceService,
    dashboard_service: DashboardService,
    list_service: ListService,
    appointment_service: AppointmentService,
}

impl PracticeCore {
    /// Build the core from validated settings.
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        let calendar_service = CalendarService::new(&settings)?;
        let dashboard_service = DashboardService::new(calendar_service.clone(), &settings);
        let appointment_service = AppointmentService::new(&settings)?;

        Ok(Self {
            settings,
            calendar_service,
            invoice_service: InvoiceService::new(),
            dashboard_service,
            list_service: ListService::new(),
            appointment_service,
        })
    }

    /// Core with default settings (Europe/Berlin, 07:00-19:00).
    pub fn with_defaults() -> Self {
        Self {
            settings: Settings::default(),
            calendar_service: CalendarService::default(),
            invoice_service: InvoiceService::new(),
            dashboard_service: DashboardService::default(),
            list_service: ListService::new(),
            appointment_service: AppointmentService::default(),
        }
    }

    /// Build the core from a JSON settings document.
    pub fn from_settings_json(json: &str) -> Result<Self, CoreError> {
        Self::new(Settings::from_json(json)?)
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── API payloads ────────────────────────────────────────────────

    /// Deserialize the appointments endpoint's JSON array.
    ///
    /// Only a document that is not a JSON array is an error; single
    /// records that do not fit the schema are skipped with a warning.
    pub fn parse_appointments(json: &str) -> Result<Vec<Appointment>, CoreError> {
        parse_records(json, "appointment")
    }

    /// Deserialize the invoices endpoint's JSON array, skipping records
    /// that do not fit the schema.
    pub fn parse_invoices(json: &str) -> Result<Vec<Invoice>, CoreError> {
        parse_records(json, "invoice")
    }

    // ── Calendar ────────────────────────────────────────────────────

    #[must_use]
    pub fn month_grid(
        &self,
        reference: NaiveDate,
        now: NaiveDateTime,
        appointments: &[Appointment],
    ) -> Vec<MonthGridCell> {
        self.calendar_service.build_month_grid(reference, now, appointments)
    }

    #[must_use]
    pub fn week_grid(
        &self,
        reference: NaiveDate,
        now: NaiveDateTime,
        appointments: &[Appointment],
    ) -> WeekGrid {
        self.calendar_service.build_week_grid(reference, now, appointments)
    }

    #[must_use]
    pub fn day_grid(
        &self,
        reference: NaiveDate,
        now: NaiveDateTime,
        appointments: &[Appointment],
    ) -> DayGrid {
        self.calendar_service.build_day_grid(reference, now, appointments)
    }

    /// Grid for the given view mode.
    #[must_use]
    pub fn calendar_view(
        &self,
        mode: ViewMode,
        reference: NaiveDate,
        now: NaiveDateTime,
        appointments: &[Appointment],
    ) -> CalendarView {
        self.calendar_service.build_view(mode, reference, now, appointments)
    }

    /// All events of one day for the detail panel.
    #[must_use]
    pub fn events_for_day(&self, date: NaiveDate, appointments: &[Appointment]) -> Vec<CalendarEvent> {
        self.calendar_service.events_for_day(date, appointments)
    }

    #[must_use]
    pub fn navigate(&self, current: NaiveDate, mode: ViewMode, direction: Direction) -> NaiveDate {
        self.calendar_service.navigate(current, mode, direction)
    }

    #[must_use]
    pub fn header_label(&self, date: NaiveDate, mode: ViewMode) -> String {
        self.calendar_service.header_label(date, mode)
    }

    // ── New appointments ────────────────────────────────────────────

    /// Start a "new appointment" draft from a clicked hour slot.
    pub fn draft_from_slot(&self, date: NaiveDate, hour: u32) -> Result<AppointmentDraft, CoreError> {
        self.appointment_service.draft_from_slot(date, hour)
    }

    /// Validate a draft and build the create request body.
    pub fn build_appointment_payload(
        &self,
        draft: &AppointmentDraft,
    ) -> Result<NewAppointment, CoreError> {
        self.appointment_service.build_payload(draft)
    }

    /// The create request body as JSON.
    pub fn appointment_payload_json(&self, draft: &AppointmentDraft) -> Result<String, CoreError> {
        self.appointment_service.payload_json(draft)
    }

    // ── Invoices ────────────────────────────────────────────────────

    #[must_use]
    pub fn total_amount(&self, invoices: &[Invoice]) -> f64 {
        self.invoice_service.total_amount(invoices)
    }

    #[must_use]
    pub fn amount_for_period(&self, invoices: &[Invoice], month: u32, year: i32) -> f64 {
        self.invoice_service.amount_for_period(invoices, month, year)
    }

    #[must_use]
    pub fn total_hours(&self, invoices: &[Invoice]) -> f64 {
        self.invoice_service.total_hours(invoices)
    }

    #[must_use]
    pub fn revenue_series(
        &self,
        invoices: &[Invoice],
        reference: NaiveDate,
        months_back: u32,
    ) -> RevenueSeries {
        self.invoice_service.revenue_series(invoices, reference, months_back)
    }

    #[must_use]
    pub fn totals_by_month(&self, invoices: &[Invoice]) -> Vec<MonthlyTotal> {
        self.invoice_service.totals_by_month(invoices)
    }

    #[must_use]
    pub fn recipient_breakdown(&self, invoices: &[Invoice]) -> RecipientBreakdown {
        self.invoice_service.recipient_breakdown(invoices)
    }

    // ── Dashboard ───────────────────────────────────────────────────

    #[must_use]
    pub fn status_counts(&self, appointments: &[Appointment], month: u32, year: i32) -> StatusCounts {
        self.dashboard_service.status_counts(appointments, month, year)
    }

    #[must_use]
    pub fn dashboard_summary(
        &self,
        appointments: &[Appointment],
        invoices: &[Invoice],
        now: NaiveDateTime,
    ) -> DashboardSummary {
        self.dashboard_service.summary(appointments, invoices, now)
    }

    // ── Lists ───────────────────────────────────────────────────────

    /// Search any record list over the named fields, optionally sorted.
    #[must_use]
    pub fn sort_and_filter<'a, T: ListRecord>(
        &self,
        collection: &'a [T],
        search_term: &str,
        fields: &[&str],
        sort: Option<&SortConfig>,
    ) -> Vec<&'a T> {
        self.list_service.sort_and_filter(collection, search_term, fields, sort)
    }

    /// Invoice list: number, client, measure and commissioning party.
    #[must_use]
    pub fn search_invoices<'a>(
        &self,
        invoices: &'a [Invoice],
        search_term: &str,
        sort: Option<&SortConfig>,
    ) -> Vec<&'a Invoice> {
        self.sort_and_filter(invoices, search_term, &INVOICE_SEARCH_FIELDS, sort)
    }

    #[must_use]
    pub fn search_clients<'a>(
        &self,
        clients: &'a [Client],
        search_term: &str,
        sort: Option<&SortConfig>,
    ) -> Vec<&'a Client> {
        self.sort_and_filter(clients, search_term, &CLIENT_SEARCH_FIELDS, sort)
    }

    #[must_use]
    pub fn search_commissioning_parties<'a>(
        &self,
        parties: &'a [CommissioningParty],
        search_term: &str,
        sort: Option<&SortConfig>,
    ) -> Vec<&'a CommissioningParty> {
        self.sort_and_filter(parties, search_term, &COMMISSIONING_PARTY_SEARCH_FIELDS, sort)
    }

    #[must_use]
    pub fn search_therapists<'a>(
        &self,
        therapists: &'a [Therapist],
        search_term: &str,
        sort: Option<&SortConfig>,
    ) -> Vec<&'a Therapist> {
        self.sort_and_filter(therapists, search_term, &THERAPIST_SEARCH_FIELDS, sort)
    }
}

fn parse_records<T: DeserializeOwned>(json: &str, kind: &str) -> Result<Vec<T>, CoreError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let total = values.len();
    let records: Vec<T> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(kind, index, error = %e, "skipping record that does not fit the schema");
                None
            }
        })
        .collect();
    debug!(kind, total, parsed = records.len(), "parsed API records");
    Ok(records)
}

impl Default for PracticeCore {
    fn default() -> Self {
        Self::with_defaults()
    }
}
