use std::cmp::Ordering;

use crate::models::list::{FieldValue, ListRecord, SortConfig, SortDirection};

/// Search fields of the invoice list.
pub const INVOICE_SEARCH_FIELDS: [&str; 4] =
    ["rechnungsnummer", "klientName", "artDerMassnahme", "auftraggeberName"];

/// Search fields of the client list.
pub const CLIENT_SEARCH_FIELDS: [&str; 3] = ["name", "email", "adresse"];

/// Search fields of the commissioning-party list.
pub const COMMISSIONING_PARTY_SEARCH_FIELDS: [&str; 3] = ["name", "institution", "email"];

/// Search fields of the therapist list.
pub const THERAPIST_SEARCH_FIELDS: [&str; 4] = ["vorname", "nachname", "username", "email"];

/// Search and column sorting for every list page.
#[derive(Debug, Clone, Default)]
pub struct ListService;

impl ListService {
    pub fn new() -> Self {
        Self
    }

    /// Records where any of `fields` contains `search_term`,
    /// case-insensitively. An empty term matches everything.
    /// Input order is preserved.
    pub fn filter<'a, T: ListRecord>(
        &self,
        collection: &'a [T],
        search_term: &str,
        fields: &[&str],
    ) -> Vec<&'a T> {
        let needle = search_term.to_lowercase();
        if needle.is_empty() {
            return collection.iter().collect();
        }
        collection
            .iter()
            .filter(|record| {
                fields.iter().any(|field| {
                    record
                        .field(field)
                        .is_some_and(|value| value.search_text().contains(&needle))
                })
            })
            .collect()
    }

    /// Stable sort by `sort.key`. Records lacking the field come first in
    /// ascending order.
    pub fn sort<T: ListRecord>(&self, records: &mut [&T], sort: &SortConfig) {
        records.sort_by(|a, b| {
            let ordering = compare_field(a.field(&sort.key), b.field(&sort.key));
            match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    /// Filter, then sort when a sort is active; otherwise input order.
    pub fn sort_and_filter<'a, T: ListRecord>(
        &self,
        collection: &'a [T],
        search_term: &str,
        fields: &[&str],
        sort: Option<&SortConfig>,
    ) -> Vec<&'a T> {
        let mut records = self.filter(collection, search_term, fields);
        if let Some(sort) = sort {
            self.sort(&mut records, sort);
        }
        records
    }
}

fn compare_field(a: Option<FieldValue>, b: Option<FieldValue>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.compare(&b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
