use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::calculator::{self, InvoiceTotals};
use super::error::InvoiceError;
use super::ids::{ClientId, InvoiceId};
use super::types::*;
use super::validation;

/// Builder for invoices, holding the state of an invoice form.
///
/// ```
/// use invoicepro::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let client = ClientBuilder::new("Acme Corp").email("billing@acme.test").build(ClientId::new("c-1")).unwrap();
///
/// let invoice = InvoiceBuilder::new("INV-2024-0001", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
///     .due_date(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap())
///     .client(client.id.clone())
///     .add_item(LineItem::new("Consulting", dec!(10), dec!(150)))
///     .tax_rate(dec!(8))
///     .build(InvoiceId::new("inv-1"), &[client])
///     .unwrap();
///
/// assert_eq!(invoice.totals().total, dec!(1620));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceBuilder {
    invoice_number: String,
    date: NaiveDate,
    due_date: Option<NaiveDate>,
    client_id: Option<ClientId>,
    items: Vec<LineItem>,
    tax_rate: Decimal,
    discount: Decimal,
    discount_type: DiscountType,
    notes: String,
    status: InvoiceStatus,
}

impl InvoiceBuilder {
    pub fn new(invoice_number: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            invoice_number: invoice_number.into(),
            date,
            due_date: None,
            client_id: None,
            items: Vec::new(),
            tax_rate: Decimal::ZERO,
            discount: Decimal::ZERO,
            discount_type: DiscountType::Percentage,
            notes: String::new(),
            status: InvoiceStatus::Unpaid,
        }
    }

    /// Start from an existing invoice, e.g. to edit it.
    pub fn from_invoice(invoice: &Invoice) -> Self {
        Self {
            invoice_number: invoice.invoice_number.clone(),
            date: invoice.date,
            due_date: invoice.due_date,
            client_id: (!invoice.client_id.is_empty()).then(|| invoice.client_id.clone()),
            items: invoice.items.clone(),
            tax_rate: invoice.tax_rate,
            discount: invoice.discount,
            discount_type: invoice.discount_type,
            notes: invoice.notes.clone(),
            status: invoice.status,
        }
    }

    pub fn invoice_number(mut self, number: impl Into<String>) -> Self {
        self.invoice_number = number.into();
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn client(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    pub fn add_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Replace all items.
    pub fn items(mut self, items: Vec<LineItem>) -> Self {
        self.items = items;
        self
    }

    /// Remove the item row at `index`; out-of-range indices are ignored.
    pub fn remove_item(mut self, index: usize) -> Self {
        if index < self.items.len() {
            self.items.remove(index);
        }
        self
    }

    pub fn tax_rate(mut self, percent: Decimal) -> Self {
        self.tax_rate = percent;
        self
    }

    pub fn discount(mut self, amount: Decimal, kind: DiscountType) -> Self {
        self.discount = amount;
        self.discount_type = kind;
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn status(mut self, status: InvoiceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn get_invoice_number(&self) -> &str {
        &self.invoice_number
    }

    pub fn get_date(&self) -> NaiveDate {
        self.date
    }

    pub fn get_status(&self) -> InvoiceStatus {
        self.status
    }

    pub fn get_items(&self) -> &[LineItem] {
        &self.items
    }

    /// Live totals of the form state.
    pub fn totals(&self) -> InvoiceTotals {
        calculator::calculate_totals(
            &self.items,
            self.tax_rate,
            self.discount,
            self.discount_type,
        )
    }

    /// Build the invoice and validate it against the known clients.
    /// Returns all validation errors (not just the first).
    pub fn build(self, id: InvoiceId, clients: &[Client]) -> Result<Invoice, InvoiceError> {
        let invoice = self.build_unchecked(id);
        let errors = validation::validate_invoice(&invoice, clients);
        if !errors.is_empty() {
            return Err(InvoiceError::Validation(errors));
        }
        Ok(invoice)
    }

    /// Build without validation, for previews of unfinished forms.
    pub fn build_unchecked(self, id: InvoiceId) -> Invoice {
        Invoice {
            id,
            invoice_number: self.invoice_number.trim().to_string(),
            date: self.date,
            due_date: self.due_date,
            client_id: self.client_id.unwrap_or_else(|| ClientId::new("")),
            items: self.items,
            tax_rate: self.tax_rate,
            discount: self.discount,
            discount_type: self.discount_type,
            notes: self.notes,
            status: self.status,
        }
    }
}

/// Builder for Client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientBuilder {
    name: String,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
}

impl ClientBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            phone: None,
            address: None,
        }
    }

    /// Start from an existing client, e.g. to edit it.
    pub fn from_client(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            email: client.email.clone(),
            phone: client.phone.clone(),
            address: client.address.clone(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = non_blank(email.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = non_blank(phone.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = non_blank(address.into());
        self
    }

    /// Build the client; the name is required.
    pub fn build(self, id: ClientId) -> Result<Client, InvoiceError> {
        let client = Client {
            id,
            name: self.name.trim().to_string(),
            email: self.email,
            phone: self.phone,
            address: self.address,
        };
        let errors = validation::validate_client(&client);
        if !errors.is_empty() {
            return Err(InvoiceError::Validation(errors));
        }
        Ok(client)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
