//! PDF output of rendered invoices.
//!
//! Writes a single-page PDF using the built-in Helvetica fonts, so no font
//! files are embedded. Text is WinAnsi encoded; characters outside that
//! code page are replaced with `?`.

mod encoding;
mod writer;

use tracing::debug;

use crate::core::{Client, CompanyProfile, Invoice, InvoiceError};
use crate::render::{RenderConfig, RenderedDocument, render_invoice};

pub use writer::to_pdf;

/// A finished PDF file.
#[derive(Debug, Clone)]
pub struct PdfExport {
    /// Suggested file name, `{invoice_number}.pdf`.
    pub filename: String,
    /// PDF bytes.
    pub bytes: Vec<u8>,
}

/// File name for an exported invoice.
pub fn pdf_filename(invoice: &Invoice) -> String {
    format!("{}.pdf", invoice.invoice_number)
}

/// Render and write an invoice as PDF.
///
/// `client` is the result of resolving the invoice's client reference. A
/// missing client is reported as [`InvoiceError::UnknownClient`] instead of
/// producing a document without a recipient.
pub fn export_invoice_pdf(
    invoice: &Invoice,
    client: Option<&Client>,
    company: &CompanyProfile,
    config: &RenderConfig,
) -> Result<PdfExport, InvoiceError> {
    let client = client.ok_or_else(|| {
        InvoiceError::UnknownClient(format!(
            "invoice {} references client '{}', which does not exist",
            invoice.invoice_number, invoice.client_id
        ))
    })?;

    let document: RenderedDocument = render_invoice(invoice, client, company, config);
    let bytes = to_pdf(&document)?;
    let filename = pdf_filename(invoice);
    debug!(%filename, size = bytes.len(), "exported invoice PDF");

    Ok(PdfExport { filename, bytes })
}
