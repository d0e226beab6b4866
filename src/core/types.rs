use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::calculator::{self, InvoiceTotals};
use super::ids::{ClientId, InvoiceId};

/// One billable row on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub description: String,
    /// Quantity (≥ 0).
    #[serde(default)]
    pub quantity: Decimal,
    /// Unit price (≥ 0).
    #[serde(default)]
    pub rate: Decimal,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: Decimal, rate: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            rate,
        }
    }

    /// The line amount, `quantity × rate`, unrounded.
    pub fn amount(&self) -> Decimal {
        self.quantity * self.rate
    }

    /// A blank row as a fresh form shows it: quantity 1, rate 0.
    pub fn blank() -> Self {
        Self::new("", Decimal::ONE, Decimal::ZERO)
    }
}

/// Whether the discount is a percentage of the subtotal or a fixed amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    #[default]
    Percentage,
    Fixed,
}

/// Payment status of an invoice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Paid,
    #[default]
    Unpaid,
}

impl InvoiceStatus {
    /// The other status.
    pub fn toggled(self) -> Self {
        match self {
            Self::Paid => Self::Unpaid,
            Self::Unpaid => Self::Paid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Unpaid => "unpaid",
        }
    }
}

/// A stored invoice.
///
/// The total is never stored; call [`Invoice::totals`] to derive it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    pub invoice_number: String,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub due_date: Option<NaiveDate>,
    /// Weak reference, resolved against the client list at read time.
    pub client_id: ClientId,
    /// Display and print order.
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Tax rate in percent.
    #[serde(default)]
    pub tax_rate: Decimal,
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub discount_type: DiscountType,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: InvoiceStatus,
}

impl Invoice {
    /// Subtotal, tax, discount and grand total.
    pub fn totals(&self) -> InvoiceTotals {
        calculator::calculate_totals(
            &self.items,
            self.tax_rate,
            self.discount,
            self.discount_type,
        )
    }

    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }
}

/// A customer that invoices are billed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Client {
    /// Contact lines that are present, in print order: email, phone, address.
    pub fn contact_lines(&self) -> impl Iterator<Item = &str> {
        [&self.email, &self.phone, &self.address]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

/// The issuing company, shown in the document header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Logo as a data URL or path; carried but not rendered.
    pub logo: String,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            name: "Your Company Name".into(),
            email: "company@email.com".into(),
            phone: "(555) 123-4567".into(),
            address: "123 Business St, City, State 12345".into(),
            logo: String::new(),
        }
    }
}

/// Reads `""` and `null` as `None`, as unfinished form fields are stored.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(s) if !s.trim().is_empty() => s.parse().map(Some).map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
