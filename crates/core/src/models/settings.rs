use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Display and calendar configuration for one practice.
///
/// Every field has a default, so a partial JSON document is enough:
/// `{"timezone": "Europe/Vienna"}` keeps all other values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// IANA timezone all appointments are interpreted in (e.g., "Europe/Berlin").
    pub timezone: String,

    /// First hour slot shown in week/day views (inclusive).
    pub first_hour: u32,

    /// End of the hour range shown in week/day views (exclusive, at most 24).
    pub last_hour: u32,

    /// Maximum number of events attached to a month-grid cell.
    pub month_cell_event_cap: usize,

    /// Pixel height of one hour slot.
    pub slot_height_px: u32,

    /// Events shorter than this still render at this height.
    pub min_event_height_px: u32,

    /// Number of months in the dashboard revenue chart.
    pub revenue_months: u32,

    /// Duration prefilled when creating an appointment from a slot.
    pub default_appointment_minutes: u32,

    /// Number of upcoming appointments listed on the dashboard.
    pub upcoming_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timezone: "Europe/Berlin".to_string(),
            first_hour: 7,
            last_hour: 19,
            month_cell_event_cap: 3,
            slot_height_px: 48,
            min_event_height_px: 18,
            revenue_months: 6,
            default_appointment_minutes: 30,
            upcoming_limit: 5,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))
    }

    /// Check ranges and that the timezone name is known.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.first_hour >= self.last_hour || self.last_hour > 24 {
            return Err(CoreError::InvalidSettings(format!(
                "hour range {}..{} must satisfy first_hour < last_hour <= 24",
                self.first_hour, self.last_hour
            )));
        }
        if self.month_cell_event_cap == 0 {
            return Err(CoreError::InvalidSettings(
                "month_cell_event_cap must be at least 1".into(),
            ));
        }
        if self.slot_height_px == 0 {
            return Err(CoreError::InvalidSettings(
                "slot_height_px must be at least 1".into(),
            ));
        }
        if self.revenue_months == 0 {
            return Err(CoreError::InvalidSettings(
                "revenue_months must be at least 1".into(),
            ));
        }
        if self.default_appointment_minutes == 0 {
            return Err(CoreError::InvalidSettings(
                "default_appointment_minutes must be at least 1".into(),
            ));
        }
        self.tz()?;
        Ok(())
    }

    /// The configured timezone, parsed.
    pub fn tz(&self) -> Result<Tz, CoreError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| CoreError::InvalidTimezone(self.timezone.clone()))
    }
}
