//! Invoice totals.
//!
//! All amounts are carried at full precision. Rounding to cents is a
//! presentation step applied by the renderer, never while accumulating.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::types::{DiscountType, Invoice, LineItem};

/// Derived amounts of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of quantity × rate over all items.
    pub subtotal: Decimal,
    /// `subtotal × tax_rate / 100`.
    pub tax_amount: Decimal,
    /// Percentage of the subtotal, or the fixed discount as given.
    pub discount_amount: Decimal,
    /// `subtotal + tax_amount - discount_amount`. May be negative.
    pub total: Decimal,
}

/// Sum of quantity × rate over all items. Zero for an empty list.
pub fn subtotal(items: &[LineItem]) -> Decimal {
    items.iter().map(LineItem::amount).sum()
}

/// Compute subtotal, tax, discount and total.
///
/// Tax is computed on the undiscounted subtotal, and the discount is
/// subtracted afterwards. A discount larger than subtotal plus tax yields a
/// negative total; it is not clamped.
///
/// Inputs within the limits checked by
/// [`validate_amounts`](super::validate_amounts) cannot overflow.
pub fn calculate_totals(
    items: &[LineItem],
    tax_rate: Decimal,
    discount: Decimal,
    discount_type: DiscountType,
) -> InvoiceTotals {
    let subtotal = subtotal(items);
    let tax_amount = subtotal * tax_rate / dec!(100);
    let discount_amount = match discount_type {
        DiscountType::Percentage => subtotal * discount / dec!(100),
        DiscountType::Fixed => discount,
    };

    InvoiceTotals {
        subtotal,
        tax_amount,
        discount_amount,
        total: subtotal + tax_amount - discount_amount,
    }
}

/// Grand total of an invoice.
pub fn total(invoice: &Invoice) -> Decimal {
    invoice.totals().total
}
