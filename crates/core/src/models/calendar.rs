use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::appointment::AppointmentStatus;

/// Calendar view granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Month,
    Week,
    Day,
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::Month => write!(f, "Monat"),
            ViewMode::Week => write!(f, "Woche"),
            ViewMode::Day => write!(f, "Tag"),
        }
    }
}

/// Navigation step of the calendar toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// -1 or +1
    pub fn step(&self) -> i64 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// An appointment placed on the calendar.
///
/// `end` is always `start + duration`, never taken from input, and is
/// strictly after `start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub status: AppointmentStatus,
    pub client_name: String,
    pub note: Option<String>,
}

impl CalendarEvent {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// `"Anna Muster (geplant)"`
    pub fn title(&self) -> String {
        format!("{} ({})", self.client_name, self.status.label())
    }

    /// `"09:00 - 09:45"`
    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// One day of the month view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthGridCell {
    pub date: NaiveDate,
    pub is_in_current_month: bool,
    pub is_today: bool,

    /// Visible events, ascending by start, at most the configured cap
    pub events: Vec<CalendarEvent>,

    /// Number of further events hidden behind the cap
    pub overflow: Option<usize>,
}

impl MonthGridCell {
    /// Visible plus hidden events.
    pub fn total_events(&self) -> usize {
        self.events.len() + self.overflow.unwrap_or(0)
    }

    /// `"+2 mehr"` when events are hidden.
    pub fn overflow_label(&self) -> Option<String> {
        self.overflow.map(|n| format!("+{n} mehr"))
    }
}

/// An event inside an hour slot, with its vertical placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotEvent {
    pub event: CalendarEvent,
    /// Offset from the top of the slot, from the start minute
    pub top_offset_px: u32,
    /// Proportional to duration, never below the configured minimum
    pub height_px: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourSlot {
    pub hour: u32,
    pub events: Vec<SlotEvent>,
}

impl HourSlot {
    /// `"09:00"`
    pub fn label(&self) -> String {
        format!("{:02}:00", self.hour)
    }
}

/// One day column of the week/day views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub is_today: bool,
    pub slots: Vec<HourSlot>,
    /// Events of this day starting outside the displayed hour range
    pub unslotted: Vec<CalendarEvent>,
}

impl DayColumn {
    pub fn event_count(&self) -> usize {
        self.slots.iter().map(|s| s.events.len()).sum::<usize>() + self.unslotted.len()
    }
}

/// Seven day columns, Monday to Sunday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekGrid {
    pub days: Vec<DayColumn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayGrid {
    pub day: DayColumn,
}

/// Whatever the current view mode renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CalendarView {
    Month(Vec<MonthGridCell>),
    Week(WeekGrid),
    Day(DayGrid),
}
