use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::datetime;
use crate::locale;
use crate::models::dashboard::{MonthlyTotal, RecipientBreakdown, RevenuePoint, RevenueSeries};
use crate::models::invoice::{Invoice, RecipientKind};

/// Aggregates invoice snapshots into list and dashboard figures.
///
/// Financial totals per invoice are computed by the API; this service only
/// sums them. Absent amounts count as zero, empty input gives zero results.
#[derive(Debug, Clone, Default)]
pub struct InvoiceService;

impl InvoiceService {
    pub fn new() -> Self {
        Self
    }

    /// Sum of all invoice amounts.
    pub fn total_amount(&self, invoices: &[Invoice]) -> f64 {
        invoices.iter().map(Invoice::amount).sum()
    }

    /// Sum of invoices billed for exactly `month`/`year`.
    pub fn amount_for_period(&self, invoices: &[Invoice], month: u32, year: i32) -> f64 {
        invoices
            .iter()
            .filter(|i| i.is_for_period(month, year))
            .map(Invoice::amount)
            .sum()
    }

    /// Sum of billed hours.
    pub fn total_hours(&self, invoices: &[Invoice]) -> f64 {
        invoices.iter().map(Invoice::hours).sum()
    }

    /// Revenue of the `months_back` months ending with the month of
    /// `reference`, oldest first. Only the last point is the current month.
    pub fn revenue_series(
        &self,
        invoices: &[Invoice],
        reference: NaiveDate,
        months_back: u32,
    ) -> RevenueSeries {
        let totals = self.period_totals(invoices);

        let series: RevenueSeries = (0..months_back)
            .rev()
            .map(|i| {
                let (year, month) = datetime::months_before(reference.year(), reference.month(), i);
                RevenuePoint {
                    label: locale::month_abbreviation(month).to_string(),
                    month,
                    year,
                    total_amount: totals.get(&(year, month)).map(|(sum, _)| *sum).unwrap_or(0.0),
                    is_current_month: i == 0,
                }
            })
            .collect();

        debug!(points = series.len(), invoices = invoices.len(), "built revenue series");
        series
    }

    /// One entry per billing period that has invoices, oldest first.
    pub fn totals_by_month(&self, invoices: &[Invoice]) -> Vec<MonthlyTotal> {
        self.period_totals(invoices)
            .into_iter()
            .map(|((year, month), (total_amount, invoice_count))| MonthlyTotal {
                month,
                year,
                total_amount,
                invoice_count,
            })
            .collect()
    }

    /// Amounts billed to clients directly vs. to commissioning parties.
    pub fn recipient_breakdown(&self, invoices: &[Invoice]) -> RecipientBreakdown {
        invoices
            .iter()
            .fold(RecipientBreakdown::default(), |mut acc, invoice| {
                match invoice.recipient_kind {
                    RecipientKind::Client => acc.client += invoice.amount(),
                    RecipientKind::CommissioningParty => acc.commissioning_party += invoice.amount(),
                }
                acc
            })
    }

    /// (year, month) → (sum, count), ordered chronologically.
    fn period_totals(&self, invoices: &[Invoice]) -> BTreeMap<(i32, u32), (f64, usize)> {
        let mut totals: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();
        for invoice in invoices {
            let entry = totals.entry((invoice.year, invoice.month)).or_insert((0.0, 0));
            entry.0 += invoice.amount();
            entry.1 += 1;
        }
        totals
    }
}
