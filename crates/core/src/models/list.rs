use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::appointment::Appointment;
use super::client::Client;
use super::commissioning_party::CommissioningParty;
use super::invoice::Invoice;
use super::therapist::{Therapist, TherapistRole};

/// A field value exposed to list search and sorting.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    /// Lower-cased text the search term is matched against.
    pub fn search_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.to_lowercase(),
            FieldValue::Number(n) if n.fract() == 0.0 => format!("{n:.0}"),
            FieldValue::Number(n) => n.to_string(),
        }
    }

    /// Text compares case-insensitively, numbers numerically,
    /// numbers sort before text.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (FieldValue::Number(a), FieldValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (FieldValue::Number(_), FieldValue::Text(_)) => Ordering::Less,
            (FieldValue::Text(_), FieldValue::Number(_)) => Ordering::Greater,
        }
    }
}

/// A record that can be shown in a searchable, sortable list.
///
/// Field names are the API's JSON keys (`"klientName"`, `"gesamtBetrag"`),
/// so the host can pass through whatever column it was asked to sort by.
pub trait ListRecord {
    /// Value of the named field, or `None` when the record has no such
    /// field or the field is absent.
    fn field(&self, name: &str) -> Option<FieldValue>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Active column sort of a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: String,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Column header click: the same key flips direction, a new key
    /// starts ascending.
    pub fn toggle(current: Option<&SortConfig>, key: &str) -> SortConfig {
        match current {
            Some(c) if c.key == key && c.direction == SortDirection::Asc => SortConfig::desc(key),
            _ => SortConfig::asc(key),
        }
    }
}

fn text(value: &str) -> Option<FieldValue> {
    Some(FieldValue::Text(value.to_string()))
}

fn opt_text(value: Option<&str>) -> Option<FieldValue> {
    value.map(|v| FieldValue::Text(v.to_string()))
}

fn number(value: f64) -> Option<FieldValue> {
    Some(FieldValue::Number(value))
}

// ── Record implementations ──────────────────────────────────────────

impl ListRecord for Invoice {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "rechnungsnummer" => text(&self.invoice_number),
            "klientName" => text(&self.client_name),
            "artDerMassnahme" => text(&self.measure),
            "auftraggeberName" => opt_text(self.commissioning_party_name.as_deref()),
            "rechnungsdatum" => opt_text(self.issue_date.as_deref()),
            "monat" => number(f64::from(self.month)),
            "jahr" => number(f64::from(self.year)),
            "umsatzsteuer" => number(f64::from(self.vat_rate)),
            "gesamtStunden" => self.total_hours.map(FieldValue::Number),
            "stundensatz" => self.hourly_rate.map(FieldValue::Number),
            "gesamtBetrag" => self.total_amount.map(FieldValue::Number),
            _ => None,
        }
    }
}

impl ListRecord for Appointment {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "klientName" => text(&self.client_name),
            "datum" => text(&self.start),
            "dauer" => number(self.duration_minutes as f64),
            "status" => text(self.status.label()),
            "beschreibung" => opt_text(self.note.as_deref()),
            "therapeutName" => opt_text(self.therapist_name.as_deref()),
            _ => None,
        }
    }
}

impl ListRecord for Client {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => text(&self.name),
            "geburtsdatum" => text(&self.birth_date),
            "adresse" => opt_text(self.address.as_deref()),
            "telefonnummer" => opt_text(self.phone.as_deref()),
            "email" => opt_text(self.email.as_deref()),
            "auftraggeberNamen" => Some(FieldValue::Text(self.commissioning_party_names.join(", "))),
            _ => None,
        }
    }
}

impl ListRecord for CommissioningParty {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => text(&self.name),
            "institution" => text(&self.institution),
            "funktion" => text(&self.function),
            "adresse" => text(&self.address),
            "telefonnummer" => opt_text(self.phone.as_deref()),
            "email" => text(&self.email),
            _ => None,
        }
    }
}

impl ListRecord for Therapist {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "username" => text(&self.username),
            "vorname" => text(&self.first_name),
            "nachname" => text(&self.last_name),
            "email" => text(&self.email),
            "rolle" => match self.role {
                TherapistRole::Admin => text("admin"),
                TherapistRole::Therapeut => text("therapeut"),
            },
            "stundensatz" => self.hourly_rate.map(FieldValue::Number),
            "wochenstunden" => self.weekly_hours.map(FieldValue::Number),
            _ => None,
        }
    }
}
