use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::debug;

use crate::datetime;
use crate::errors::CoreError;
use crate::models::appointment::{AppointmentDraft, NewAppointment};
use crate::models::settings::Settings;

/// Turns a clicked calendar slot into a validated create request.
#[derive(Debug, Clone)]
pub struct AppointmentService {
    tz: Tz,
    default_duration_minutes: u32,
}

impl AppointmentService {
    pub fn new(settings: &Settings) -> Result<Self, CoreError> {
        Ok(Self {
            tz: settings.tz()?,
            default_duration_minutes: settings.default_appointment_minutes,
        })
    }

    /// Draft prefilled with the slot's date and hour.
    pub fn draft_from_slot(&self, date: NaiveDate, hour: u32) -> Result<AppointmentDraft, CoreError> {
        if hour > 23 {
            return Err(CoreError::InvalidTime(format!("slot hour {hour} is not in 0..=23")));
        }
        Ok(AppointmentDraft {
            date,
            time: format!("{hour:02}:00"),
            duration_minutes: self.default_duration_minutes,
            description: String::new(),
            client_id: String::new(),
        })
    }

    /// Validate the draft and compose its date and time into the request
    /// body, with the start converted from practice time to UTC.
    pub fn build_payload(&self, draft: &AppointmentDraft) -> Result<NewAppointment, CoreError> {
        let client_id = draft.client_id.trim();
        if client_id.is_empty() {
            return Err(CoreError::ValidationError("a client must be selected".into()));
        }
        if draft.duration_minutes == 0 {
            return Err(CoreError::ValidationError(
                "duration must be at least one minute".into(),
            ));
        }

        let time = datetime::parse_time_of_day(&draft.time)?;
        let local = draft.date.and_time(time);
        let utc = datetime::local_to_utc(local, &self.tz).ok_or_else(|| {
            CoreError::ValidationError(format!("{local} does not exist in {}", self.tz.name()))
        })?;

        let description = draft.description.trim();
        let payload = NewAppointment {
            start: utc.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            duration_minutes: draft.duration_minutes,
            description: (!description.is_empty()).then(|| description.to_string()),
            client_id: client_id.to_string(),
        };
        debug!(start = %payload.start, "built appointment payload");
        Ok(payload)
    }

    /// `build_payload` serialized as the JSON request body.
    pub fn payload_json(&self, draft: &AppointmentDraft) -> Result<String, CoreError> {
        let payload = self.build_payload(draft)?;
        serde_json::to_string(&payload)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize appointment: {e}")))
    }
}

impl Default for AppointmentService {
    fn default() -> Self {
        Self {
            tz: chrono_tz::Europe::Berlin,
            default_duration_minutes: Settings::default().default_appointment_minutes,
        }
    }
}
