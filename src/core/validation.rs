use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::ValidationError;
use super::types::*;

/// Largest accepted item quantity (absolute value).
pub const MAX_QUANTITY: Decimal = dec!(1000000000);

/// Largest accepted item rate or fixed discount (absolute value).
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// Largest accepted tax rate or percentage discount (absolute value).
pub const MAX_PERCENT: Decimal = dec!(1000);

/// Largest number of items on one invoice.
pub const MAX_ITEMS: usize = 10_000;

/// Validate an invoice before it is accepted into storage.
/// Returns all validation errors found (not just the first).
pub fn validate_invoice(invoice: &Invoice, clients: &[Client]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // INV-01: The invoice shall reference an existing client
    if invoice.client_id.is_empty() {
        errors.push(ValidationError::with_rule(
            "client_id",
            "a client must be selected",
            "INV-01",
        ));
    } else if !clients.iter().any(|c| c.id == invoice.client_id) {
        errors.push(ValidationError::with_rule(
            "client_id",
            format!("client '{}' does not exist", invoice.client_id),
            "INV-01",
        ));
    }

    // INV-02: The invoice shall have an invoice number
    if invoice.invoice_number.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "invoice_number",
            "invoice number must not be empty",
            "INV-02",
        ));
    }

    // INV-03: The invoice shall have a due date
    if invoice.due_date.is_none() {
        errors.push(ValidationError::with_rule(
            "due_date",
            "due date is required",
            "INV-03",
        ));
    }

    // INV-04: At least one item with a description
    if !invoice
        .items
        .iter()
        .any(|item| !item.description.trim().is_empty())
    {
        errors.push(ValidationError::with_rule(
            "items",
            "add at least one item with a description",
            "INV-04",
        ));
    }

    errors.extend(validate_amounts(invoice));
    errors
}

/// Check that every number on an invoice is small enough for its totals
/// to be computed exactly.
///
/// Applied to invoices entering the store from any source: forms, stored
/// blobs and backup files.
pub fn validate_amounts(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // INV-05: Item count, quantities and rates within range
    if invoice.items.len() > MAX_ITEMS {
        errors.push(ValidationError::with_rule(
            "items",
            format!("at most {MAX_ITEMS} items are allowed"),
            "INV-05",
        ));
    }
    for (i, item) in invoice.items.iter().enumerate() {
        if item.quantity.abs() > MAX_QUANTITY {
            errors.push(ValidationError::with_rule(
                format!("items[{i}].quantity"),
                format!("quantity {} exceeds {MAX_QUANTITY}", item.quantity),
                "INV-05",
            ));
        }
        if item.rate.abs() > MAX_AMOUNT {
            errors.push(ValidationError::with_rule(
                format!("items[{i}].rate"),
                format!("rate {} exceeds {MAX_AMOUNT}", item.rate),
                "INV-05",
            ));
        }
    }

    // INV-06: Tax rate and discount within range
    if invoice.tax_rate.abs() > MAX_PERCENT {
        errors.push(ValidationError::with_rule(
            "tax_rate",
            format!("tax rate {}% exceeds {MAX_PERCENT}%", invoice.tax_rate),
            "INV-06",
        ));
    }
    let discount_limit = match invoice.discount_type {
        DiscountType::Percentage => MAX_PERCENT,
        DiscountType::Fixed => MAX_AMOUNT,
    };
    if invoice.discount.abs() > discount_limit {
        errors.push(ValidationError::with_rule(
            "discount",
            format!("discount {} exceeds {discount_limit}", invoice.discount),
            "INV-06",
        ));
    }

    errors
}

/// Validate a client before it is accepted into storage.
pub fn validate_client(client: &Client) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // CLI-01: A client shall have a name
    if client.name.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "name",
            "client name is required",
            "CLI-01",
        ));
    }

    errors
}
