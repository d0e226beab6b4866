use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{InvoiceStore, Storage};
use crate::core::{Invoice, InvoiceStatus};

/// Which invoices a listing shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Paid,
    Unpaid,
}

impl StatusFilter {
    pub fn matches(self, status: InvoiceStatus) -> bool {
        match self {
            Self::All => true,
            Self::Paid => status == InvoiceStatus::Paid,
            Self::Unpaid => status == InvoiceStatus::Unpaid,
        }
    }
}

/// Revenue and count summary over all invoices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_revenue: Decimal,
    pub paid_revenue: Decimal,
    pub unpaid_revenue: Decimal,
    pub total_invoices: usize,
    pub paid_invoices: usize,
    pub unpaid_invoices: usize,
    pub total_clients: usize,
}

impl<S: Storage> InvoiceStore<S> {
    /// Invoices whose number or client name contains `term`
    /// (case-insensitive) and whose status passes `filter`, in stored order.
    /// An empty term matches everything.
    pub fn search(&self, term: &str, filter: StatusFilter) -> Vec<&Invoice> {
        let needle = term.trim().to_lowercase();
        self.invoices()
            .iter()
            .filter(|inv| filter.matches(inv.status))
            .filter(|inv| {
                needle.is_empty()
                    || inv.invoice_number.to_lowercase().contains(&needle)
                    || self
                        .client_for(inv)
                        .is_some_and(|c| c.name.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Totals and counts for the dashboard. Revenue sums full-precision
    /// invoice totals.
    pub fn stats(&self) -> DashboardStats {
        let mut stats = DashboardStats {
            total_clients: self.clients().len(),
            ..DashboardStats::default()
        };

        for invoice in self.invoices() {
            let total = invoice.totals().total;
            stats.total_revenue += total;
            stats.total_invoices += 1;
            match invoice.status {
                InvoiceStatus::Paid => {
                    stats.paid_revenue += total;
                    stats.paid_invoices += 1;
                }
                InvoiceStatus::Unpaid => {
                    stats.unpaid_revenue += total;
                    stats.unpaid_invoices += 1;
                }
            }
        }

        stats
    }
}
