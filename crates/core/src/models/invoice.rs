use serde::{Deserialize, Serialize};

use crate::locale;

use super::nullable::null_as_default;

/// Who an invoice is addressed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecipientKind {
    /// The client pays directly (self-payer)
    #[default]
    #[serde(rename = "klient")]
    Client,
    /// A commissioning party (youth office, insurer, ...) pays
    #[serde(rename = "auftraggeber")]
    CommissioningParty,
}

/// One billed session on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    #[serde(rename = "datum", default, deserialize_with = "null_as_default")]
    pub date: String,

    #[serde(rename = "dauer", default, deserialize_with = "null_as_default")]
    pub duration_minutes: i64,

    #[serde(rename = "beschreibung", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "therapeutName", default, deserialize_with = "null_as_default")]
    pub provider_name: String,

    #[serde(rename = "qualifikation", default, skip_serializing_if = "Option::is_none")]
    pub qualification: Option<String>,
}

/// A monthly invoice as returned by the invoices endpoint.
///
/// Hours, rate and amount are computed by the API. This crate only
/// aggregates them across invoices and treats absent figures as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "rechnungsnummer", default, deserialize_with = "null_as_default")]
    pub invoice_number: String,

    /// Billing month, 1-12
    #[serde(rename = "monat", default, deserialize_with = "null_as_default")]
    pub month: u32,

    #[serde(rename = "jahr", default, deserialize_with = "null_as_default")]
    pub year: i32,

    #[serde(rename = "rechnungsdatum", default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,

    #[serde(rename = "empfaenger", default, deserialize_with = "null_as_default")]
    pub recipient_kind: RecipientKind,

    #[serde(rename = "klientName", default, deserialize_with = "null_as_default")]
    pub client_name: String,

    /// Kind of measure billed (e.g., "Einzeltherapie")
    #[serde(rename = "artDerMassnahme", default, deserialize_with = "null_as_default")]
    pub measure: String,

    #[serde(rename = "auftraggeberName", default, skip_serializing_if = "Option::is_none")]
    pub commissioning_party_name: Option<String>,

    /// VAT percentage: 0, 7 or 19
    #[serde(rename = "umsatzsteuer", default, deserialize_with = "null_as_default")]
    pub vat_rate: u8,

    #[serde(rename = "termine", default, deserialize_with = "null_as_default")]
    pub line_items: Vec<InvoiceLineItem>,

    #[serde(rename = "gesamtStunden", default)]
    pub total_hours: Option<f64>,

    #[serde(rename = "stundensatz", default)]
    pub hourly_rate: Option<f64>,

    #[serde(rename = "gesamtBetrag", default)]
    pub total_amount: Option<f64>,
}

impl Invoice {
    /// Minimal invoice for a billing period. Remaining fields take their
    /// API defaults.
    pub fn new(id: impl Into<String>, month: u32, year: i32, total_amount: f64) -> Self {
        Self {
            id: id.into(),
            invoice_number: String::new(),
            month,
            year,
            issue_date: None,
            recipient_kind: RecipientKind::Client,
            client_name: String::new(),
            measure: String::new(),
            commissioning_party_name: None,
            vat_rate: 0,
            line_items: Vec::new(),
            total_hours: None,
            hourly_rate: None,
            total_amount: Some(total_amount),
        }
    }

    /// Total amount, absent treated as zero.
    pub fn amount(&self) -> f64 {
        self.total_amount.unwrap_or(0.0)
    }

    /// Total hours, absent treated as zero.
    pub fn hours(&self) -> f64 {
        self.total_hours.unwrap_or(0.0)
    }

    pub fn is_for_period(&self, month: u32, year: i32) -> bool {
        self.month == month && self.year == year
    }

    /// Commissioning party name, or "Klient" for self-payers.
    pub fn recipient_label(&self) -> &str {
        match self.recipient_kind {
            RecipientKind::CommissioningParty => {
                self.commissioning_party_name.as_deref().unwrap_or("")
            }
            RecipientKind::Client => "Klient",
        }
    }

    /// `"März 2024"`. A missing month renders as January.
    pub fn period_label(&self) -> String {
        format!("{} {}", locale::month_name(self.month), self.year)
    }
}
