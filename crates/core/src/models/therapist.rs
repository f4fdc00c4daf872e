use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TherapistRole {
    Admin,
    #[default]
    Therapeut,
}

/// A therapist account of the practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Therapist {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub username: String,

    #[serde(rename = "vorname", default)]
    pub first_name: String,

    #[serde(rename = "nachname", default)]
    pub last_name: String,

    #[serde(default)]
    pub email: String,

    #[serde(rename = "rolle", default)]
    pub role: TherapistRole,

    #[serde(rename = "stundensatz", default)]
    pub hourly_rate: Option<f64>,

    #[serde(rename = "wochenstunden", default)]
    pub weekly_hours: Option<f64>,
}

impl Therapist {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: String::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: String::new(),
            role: TherapistRole::Therapeut,
            hourly_rate: None,
            weekly_hours: None,
        }
    }

    /// "Vorname Nachname"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}
