/// Prefix of generated invoice numbers.
pub const INVOICE_PREFIX: &str = "INV-";

/// Zero-padding width of the sequence part ("0001").
pub const SEQUENCE_WIDTH: usize = 4;

/// Suggest the number for a new invoice.
///
/// Generates numbers in the format `INV-{year}-{sequence}`, e.g.
/// "INV-2024-0001", where the sequence is `existing_count + 1`.
///
/// The sequence is derived from the number of invoices currently held, not
/// from the highest number ever issued. After deletions this can repeat a
/// number that was handed out before; callers that care should check the
/// result against their collection.
pub fn next_invoice_number(existing_count: usize, year: i32) -> String {
    format!(
        "{}{}-{:0>width$}",
        INVOICE_PREFIX,
        year,
        existing_count + 1,
        width = SEQUENCE_WIDTH
    )
}
