use serde::{Deserialize, Serialize};

use super::nullable::null_as_default;

/// Lifecycle status of an appointment as reported by the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[serde(rename = "geplant")]
    Scheduled,
    #[serde(rename = "abgeschlossen")]
    Completed,
    #[serde(rename = "abgesagt")]
    Cancelled,
    /// Any value the API sends that is not one of the three above.
    #[default]
    #[serde(other)]
    Unknown,
}

impl AppointmentStatus {
    /// Whether this is one of the three statuses the dashboard counts.
    pub fn is_known(&self) -> bool {
        !matches!(self, AppointmentStatus::Unknown)
    }

    /// Status value as used on the wire and in event titles.
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "geplant",
            AppointmentStatus::Completed => "abgeschlossen",
            AppointmentStatus::Cancelled => "abgesagt",
            AppointmentStatus::Unknown => "unbekannt",
        }
    }

    /// Background colour of calendar events with this status.
    pub fn color(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "#0d6efd",
            AppointmentStatus::Completed => "#198754",
            AppointmentStatus::Cancelled => "#dc3545",
            AppointmentStatus::Unknown => "#6c757d",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A therapy session as returned by `GET /api/termine/meine`.
///
/// `start` is kept as the raw API string: a record with an unparsable
/// timestamp is still a valid record, it just cannot be placed on the
/// calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(rename = "_id")]
    pub id: String,

    /// ISO-8601 timestamp, with or without offset
    #[serde(rename = "datum", default, deserialize_with = "null_as_default")]
    pub start: String,

    /// Duration in minutes; non-positive values make the record unplaceable
    #[serde(rename = "dauer", default, deserialize_with = "null_as_default")]
    pub duration_minutes: i64,

    /// `null` or a missing key reads as `Unknown`
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: AppointmentStatus,

    #[serde(rename = "klientName", default, deserialize_with = "null_as_default")]
    pub client_name: String,

    #[serde(rename = "beschreibung", default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(rename = "klientId", default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(rename = "therapeutName", default, skip_serializing_if = "Option::is_none")]
    pub therapist_name: Option<String>,
}

impl Appointment {
    pub fn new(
        id: impl Into<String>,
        start: impl Into<String>,
        duration_minutes: i64,
        status: AppointmentStatus,
        client_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            start: start.into(),
            duration_minutes,
            status,
            client_name: client_name.into(),
            note: None,
            client_id: None,
            therapist_name: None,
        }
    }

    /// Attach a free-text note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Form state of the "new appointment" dialog.
///
/// The date comes from the clicked calendar slot; the time is a separate
/// text input. Both are merged only when the payload is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentDraft {
    pub date: chrono::NaiveDate,
    /// `HH:MM` as typed by the user
    pub time: String,
    pub duration_minutes: u32,
    pub description: String,
    pub client_id: String,
}

/// Request body of `POST /api/termin/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAppointment {
    /// UTC instant, `YYYY-MM-DDTHH:MM:SS.sssZ`
    #[serde(rename = "datum")]
    pub start: String,

    #[serde(rename = "dauer")]
    pub duration_minutes: u32,

    #[serde(rename = "beschreibung", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "klientId")]
    pub client_id: String,
}
