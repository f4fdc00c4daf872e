use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::datetime;
use crate::errors::CoreError;
use crate::locale;
use crate::models::appointment::Appointment;
use crate::models::calendar::{
    CalendarEvent, CalendarView, DayColumn, DayGrid, Direction, HourSlot, MonthGridCell,
    SlotEvent, ViewMode, WeekGrid,
};
use crate::models::settings::Settings;

/// Days emitted before the trailing-week trim (six full weeks).
const MONTH_GRID_DAYS: usize = 42;

/// Builds month/week/day calendar grids from appointment snapshots.
///
/// Pure: every call parses its input afresh and returns a new structure.
/// Appointments that cannot be placed (unparsable start, non-positive
/// duration) are skipped with a warning instead of failing the build.
#[derive(Debug, Clone)]
pub struct CalendarService {
    tz: Tz,
    first_hour: u32,
    last_hour: u32,
    month_cell_event_cap: usize,
    slot_height_px: u32,
    min_event_height_px: u32,
}

impl CalendarService {
    pub fn new(settings: &Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self::with_timezone(settings.tz()?, settings))
    }

    fn with_timezone(tz: Tz, settings: &Settings) -> Self {
        Self {
            tz,
            first_hour: settings.first_hour,
            last_hour: settings.last_hour,
            month_cell_event_cap: settings.month_cell_event_cap,
            slot_height_px: settings.slot_height_px,
            min_event_height_px: settings.min_event_height_px,
        }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    // ── Events ──────────────────────────────────────────────────────

    /// Convert one appointment into a calendar event, or `None` when it
    /// cannot be placed on the calendar.
    pub fn to_event(&self, appointment: &Appointment) -> Option<CalendarEvent> {
        let Some(start) = datetime::parse_local_datetime(&appointment.start, &self.tz) else {
            warn!(
                id = %appointment.id,
                raw = %appointment.start,
                "skipping appointment with unparsable start"
            );
            return None;
        };

        if appointment.duration_minutes <= 0 {
            warn!(
                id = %appointment.id,
                duration = appointment.duration_minutes,
                "skipping appointment with non-positive duration"
            );
            return None;
        }

        let Some(end) = TimeDelta::try_minutes(appointment.duration_minutes)
            .and_then(|d| start.checked_add_signed(d))
        else {
            warn!(
                id = %appointment.id,
                duration = appointment.duration_minutes,
                "skipping appointment whose end is out of range"
            );
            return None;
        };

        Some(CalendarEvent {
            id: appointment.id.clone(),
            start,
            end,
            status: appointment.status,
            client_name: appointment.client_name.clone(),
            note: appointment.note.clone(),
        })
    }

    /// All placeable appointments as events, in input order.
    pub fn to_events(&self, appointments: &[Appointment]) -> Vec<CalendarEvent> {
        appointments.iter().filter_map(|a| self.to_event(a)).collect()
    }

    /// Every event starting on `date`, ascending by start. Used by the
    /// selected-day panel, so no cap applies.
    pub fn events_for_day(&self, date: NaiveDate, appointments: &[Appointment]) -> Vec<CalendarEvent> {
        let mut events: Vec<CalendarEvent> = self
            .to_events(appointments)
            .into_iter()
            .filter(|e| e.start.date() == date)
            .collect();
        // stable: equal starts keep input order
        events.sort_by_key(|e| e.start);
        events
    }

    /// Events grouped by their start date, each day sorted by start.
    fn events_by_day(&self, appointments: &[Appointment]) -> BTreeMap<NaiveDate, Vec<CalendarEvent>> {
        let mut by_day: BTreeMap<NaiveDate, Vec<CalendarEvent>> = BTreeMap::new();
        for event in self.to_events(appointments) {
            by_day.entry(event.start.date()).or_default().push(event);
        }
        for events in by_day.values_mut() {
            events.sort_by_key(|e| e.start);
        }
        by_day
    }

    // ── Grids ───────────────────────────────────────────────────────

    /// Month view: complete Monday-first weeks covering the month of
    /// `reference`.
    ///
    /// Starts at the Monday on or before the first of the month, emits six
    /// weeks, then drops the sixth week if it lies entirely in the
    /// following month. The result is always 35 or 42 cells.
    pub fn build_month_grid(
        &self,
        reference: NaiveDate,
        now: NaiveDateTime,
        appointments: &[Appointment],
    ) -> Vec<MonthGridCell> {
        let first = datetime::first_of_month(reference);
        let grid_start = datetime::monday_of(first);
        let today = now.date();
        let by_day = self.events_by_day(appointments);

        let mut days: Vec<NaiveDate> = grid_start.iter_days().take(MONTH_GRID_DAYS).collect();
        // Only short at the very end of chrono's range; keep whole weeks.
        days.truncate(days.len() - days.len() % 7);

        let in_month = |d: &NaiveDate| d.year() == first.year() && d.month() == first.month();
        if days.len() == MONTH_GRID_DAYS
            && days[MONTH_GRID_DAYS - 7..].iter().all(|d| *d > first && !in_month(d))
        {
            days.truncate(MONTH_GRID_DAYS - 7);
        }

        let cells: Vec<MonthGridCell> = days
            .into_iter()
            .map(|date| {
                let mut events = by_day.get(&date).cloned().unwrap_or_default();
                let overflow = if events.len() > self.month_cell_event_cap {
                    let hidden = events.len() - self.month_cell_event_cap;
                    events.truncate(self.month_cell_event_cap);
                    Some(hidden)
                } else {
                    None
                };
                MonthGridCell {
                    date,
                    is_in_current_month: in_month(&date),
                    is_today: date == today,
                    events,
                    overflow,
                }
            })
            .collect();

        debug!(
            month = %first.format("%Y-%m"),
            cells = cells.len(),
            days_with_events = by_day.len(),
            "built month grid"
        );
        cells
    }

    /// Week view: Monday to Sunday of the week containing `reference`,
    /// each day split into hour slots.
    pub fn build_week_grid(
        &self,
        reference: NaiveDate,
        now: NaiveDateTime,
        appointments: &[Appointment],
    ) -> WeekGrid {
        let monday = datetime::monday_of(reference);
        let by_day = self.events_by_day(appointments);
        let today = now.date();

        let days: Vec<DayColumn> = monday
            .iter_days()
            .take(7)
            .map(|date| self.day_column(date, today, by_day.get(&date).map(Vec::as_slice)))
            .collect();

        debug!(week_of = %monday, "built week grid");
        WeekGrid { days }
    }

    /// Day view: hour slots of `reference` only.
    pub fn build_day_grid(
        &self,
        reference: NaiveDate,
        now: NaiveDateTime,
        appointments: &[Appointment],
    ) -> DayGrid {
        let events = self.events_for_day(reference, appointments);
        DayGrid {
            day: self.day_column(reference, now.date(), Some(&events)),
        }
    }

    /// Build whichever grid `mode` renders.
    pub fn build_view(
        &self,
        mode: ViewMode,
        reference: NaiveDate,
        now: NaiveDateTime,
        appointments: &[Appointment],
    ) -> CalendarView {
        match mode {
            ViewMode::Month => CalendarView::Month(self.build_month_grid(reference, now, appointments)),
            ViewMode::Week => CalendarView::Week(self.build_week_grid(reference, now, appointments)),
            ViewMode::Day => CalendarView::Day(self.build_day_grid(reference, now, appointments)),
        }
    }

    fn day_column(
        &self,
        date: NaiveDate,
        today: NaiveDate,
        events: Option<&[CalendarEvent]>,
    ) -> DayColumn {
        let events = events.unwrap_or_default();
        let slots = (self.first_hour..self.last_hour)
            .map(|hour| HourSlot {
                hour,
                events: events
                    .iter()
                    .filter(|e| e.start.hour() == hour)
                    .map(|e| self.slot_event(e))
                    .collect(),
            })
            .collect();
        let unslotted = events
            .iter()
            .filter(|e| !(self.first_hour..self.last_hour).contains(&e.start.hour()))
            .cloned()
            .collect();

        DayColumn {
            date,
            is_today: date == today,
            slots,
            unslotted,
        }
    }

    fn slot_event(&self, event: &CalendarEvent) -> SlotEvent {
        let slot = u64::from(self.slot_height_px);
        let minutes = u64::try_from(event.duration_minutes()).unwrap_or(0);
        let height = (minutes * slot / 60).max(u64::from(self.min_event_height_px));
        let top = u64::from(event.start.minute()) * slot / 60;

        SlotEvent {
            event: event.clone(),
            top_offset_px: u32::try_from(top).unwrap_or(u32::MAX),
            height_px: u32::try_from(height).unwrap_or(u32::MAX),
        }
    }

    // ── Navigation & labels ─────────────────────────────────────────

    /// Step the calendar one unit back or forward.
    ///
    /// Month steps keep the day-of-month and overflow into the next month
    /// when it does not exist (Jan 31 → Mar 2 in leap years). Steps past
    /// chrono's representable range leave the date unchanged.
    pub fn navigate(&self, current: NaiveDate, mode: ViewMode, direction: Direction) -> NaiveDate {
        let step = direction.step();
        let next = match mode {
            ViewMode::Month => datetime::add_months_with_rollover(current, step),
            ViewMode::Week => current.checked_add_signed(TimeDelta::days(7 * step)),
            ViewMode::Day => current.checked_add_signed(TimeDelta::days(step)),
        };
        next.unwrap_or_else(|| {
            warn!(%current, %mode, "calendar navigation left the representable date range");
            current
        })
    }

    /// Toolbar title for the view around `date`.
    pub fn header_label(&self, date: NaiveDate, mode: ViewMode) -> String {
        match mode {
            ViewMode::Month => format!("{} {}", locale::month_name(date.month()), date.year()),
            ViewMode::Week => {
                let monday = datetime::monday_of(date);
                let sunday = monday.checked_add_signed(TimeDelta::days(6)).unwrap_or(monday);
                week_range_label(monday, sunday)
            }
            ViewMode::Day => format!(
                "{}, {}",
                locale::weekday_name(date.weekday()),
                locale::long_date(date)
            ),
        }
    }

    /// Start instant of a clicked hour slot.
    pub fn slot_start(&self, date: NaiveDate, hour: u32) -> Option<NaiveDateTime> {
        date.and_hms_opt(hour, 0, 0)
    }
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::with_timezone(chrono_tz::Europe::Berlin, &Settings::default())
    }
}

/// `"04. – 10. März 2024"`, `"26. Februar – 03. März 2024"`,
/// `"30. Dezember 2024 – 05. Januar 2025"`
fn week_range_label(from: NaiveDate, to: NaiveDate) -> String {
    if from.year() != to.year() {
        return format!("{} – {}", locale::long_date(from), locale::long_date(to));
    }
    if from.month() != to.month() {
        return format!(
            "{:02}. {} – {}",
            from.day(),
            locale::month_name(from.month()),
            locale::long_date(to)
        );
    }
    format!("{:02}. – {}", from.day(), locale::long_date(to))
}
