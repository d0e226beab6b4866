//! # invoicepro
//!
//! Local invoice management: clients, invoices with line items, totals
//! with tax and discount, a one-page document renderer with PDF output,
//! local persistence, and JSON backups.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use invoicepro::core::*;
//! use rust_decimal_macros::dec;
//!
//! let items = vec![LineItem::new("Website redesign", dec!(2), dec!(50))];
//! let totals = calculate_totals(&items, dec!(10), dec!(5), DiscountType::Percentage);
//!
//! assert_eq!(totals.subtotal, dec!(100));
//! assert_eq!(totals.tax_amount, dec!(10));
//! assert_eq!(totals.discount_amount, dec!(5));
//! assert_eq!(totals.total, dec!(105));
//! assert_eq!(next_invoice_number(3, 2024), "INV-2024-0004");
//! # let _ = NaiveDate::from_ymd_opt(2024, 1, 1);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Invoice types, totals, validation, numbering |
//! | `render` | Layout of an invoice into draw operations |
//! | `pdf` | PDF output of a rendered invoice |
//! | `store` | Invoice/client store with JSON persistence |
//! | `backup` | Full JSON backup export and import |
//! | `all` | Everything (also the default) |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "render")]
pub mod render;

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "store")]
pub mod store;

#[cfg(feature = "backup")]
pub mod backup;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
