use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::format::{format_money, format_number};
use super::text::{line_height, wrap_text};
use super::{Align, DrawOp, FontWeight, RenderConfig, RenderedDocument, Rgb};
use crate::core::{Client, CompanyProfile, DiscountType, Invoice};

// Vertical anchors of the fixed sections (mm from the top edge).
const HEADER_Y: f32 = 20.0;
const COMPANY_LINES_Y: [f32; 3] = [28.0, 34.0, 40.0];
const META_LINES_Y: [f32; 3] = [30.0, 36.0, 42.0];
const BILL_TO_Y: f32 = 60.0;
const CLIENT_NAME_Y: f32 = 68.0;
const CLIENT_LINES_Y: [f32; 3] = [74.0, 80.0, 86.0];
const TABLE_Y: f32 = 110.0;
const TABLE_HEADER_HEIGHT: f32 = 10.0;
const TABLE_HEADER_BASELINE: f32 = 7.0;
const FIRST_ROW_OFFSET: f32 = 15.0;
const ROW_STEP: f32 = 7.0;
const TOTALS_GAP: f32 = 10.0;
const NOTES_GAP: f32 = 20.0;

// Column anchors, measured from the right page edge.
const QTY_FROM_RIGHT: f32 = 90.0;
const RATE_FROM_RIGHT: f32 = 60.0;
const TOTALS_LABEL_FROM_RIGHT: f32 = 70.0;
const CELL_PADDING: f32 = 5.0;

const TITLE_SIZE: f32 = 28.0;
const COMPANY_NAME_SIZE: f32 = 24.0;
const SECTION_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 10.0;

/// Collects draw operations in painting order.
struct Page<'a> {
    config: &'a RenderConfig,
    ops: Vec<DrawOp>,
}

impl<'a> Page<'a> {
    fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            ops: Vec::new(),
        }
    }

    fn right_edge(&self) -> f32 {
        self.config.page_width - self.config.margin
    }

    fn from_right(&self, offset: f32) -> f32 {
        self.config.page_width - offset
    }

    fn money(&self, amount: Decimal) -> String {
        format_money(amount, &self.config.currency_symbol)
    }

    fn text(&mut self, text: impl Into<String>, x: f32, y: f32, size: f32, weight: FontWeight) {
        self.text_styled(text, x, y, size, weight, Rgb::BLACK, Align::Left);
    }

    fn text_right(
        &mut self,
        text: impl Into<String>,
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
    ) {
        self.text_styled(text, x, y, size, weight, Rgb::BLACK, Align::Right);
    }

    #[allow(clippy::too_many_arguments)]
    fn text_styled(
        &mut self,
        text: impl Into<String>,
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Rgb,
        align: Align,
    ) {
        self.ops.push(DrawOp::Text {
            text: text.into(),
            x,
            y,
            size,
            weight,
            color,
            align,
        });
    }
}

/// Lay out a one-page invoice.
///
/// `client` must be the client the invoice references; resolving it (and
/// deciding what to do when it is missing) is the caller's job. Amounts are
/// rendered exactly as the calculator returns them, negative totals
/// included.
///
/// The document is a single page without pagination. Each item takes
/// 7 mm, so on A4 roughly 20 items fit before the totals and notes run
/// past the bottom edge; such a document is still returned, logged with
/// `warn!`, and reports [`RenderedDocument::overflows_page`].
pub fn render_invoice(
    invoice: &Invoice,
    client: &Client,
    company: &CompanyProfile,
    config: &RenderConfig,
) -> RenderedDocument {
    let mut page = Page::new(config);

    company_block(&mut page, company);
    title_block(&mut page, invoice);
    bill_to_block(&mut page, client);
    let y = item_table(&mut page, invoice);
    let y = totals_block(&mut page, invoice, y);
    notes_block(&mut page, &invoice.notes, y);

    debug!(
        invoice = %invoice.invoice_number,
        ops = page.ops.len(),
        "rendered invoice document"
    );

    let document = RenderedDocument {
        title: invoice.invoice_number.clone(),
        page_width: config.page_width,
        page_height: config.page_height,
        ops: page.ops,
    };
    if document.overflows_page() {
        warn!(
            invoice = %invoice.invoice_number,
            items = invoice.items.len(),
            bottom = document.content_bottom(),
            "invoice content runs past the end of the page"
        );
    }
    document
}

fn company_block(page: &mut Page<'_>, company: &CompanyProfile) {
    let x = page.config.margin;
    page.text(&company.name, x, HEADER_Y, COMPANY_NAME_SIZE, FontWeight::Bold);

    let lines = [&company.email, &company.phone, &company.address];
    for (line, y) in lines.into_iter().zip(COMPANY_LINES_Y) {
        if !line.trim().is_empty() {
            page.text(line, x, y, BODY_SIZE, FontWeight::Normal);
        }
    }
}

fn title_block(page: &mut Page<'_>, invoice: &Invoice) {
    let x = page.right_edge();
    page.text_right("INVOICE", x, HEADER_Y, TITLE_SIZE, FontWeight::Bold);

    let due = invoice
        .due_date
        .map(|d| d.to_string())
        .unwrap_or_default();
    let lines = [
        format!("Invoice #: {}", invoice.invoice_number),
        format!("Date: {}", invoice.date),
        format!("Due: {due}"),
    ];
    for (line, y) in lines.into_iter().zip(META_LINES_Y) {
        page.text_right(line, x, y, BODY_SIZE, FontWeight::Normal);
    }
}

fn bill_to_block(page: &mut Page<'_>, client: &Client) {
    let x = page.config.margin;
    page.text("Bill To:", x, BILL_TO_Y, SECTION_SIZE, FontWeight::Bold);
    page.text(&client.name, x, CLIENT_NAME_Y, BODY_SIZE, FontWeight::Normal);

    // Each contact field keeps its own slot; absent ones leave a gap.
    let fields = [&client.email, &client.phone, &client.address];
    for (field, y) in fields.into_iter().zip(CLIENT_LINES_Y) {
        if let Some(value) = field.as_deref().filter(|v| !v.trim().is_empty()) {
            page.text(value, x, y, BODY_SIZE, FontWeight::Normal);
        }
    }
}

/// Draws the header band and one row per item. Returns the baseline below
/// the last row.
fn item_table(page: &mut Page<'_>, invoice: &Invoice) -> f32 {
    let margin = page.config.margin;
    let desc_x = margin + CELL_PADDING;
    let qty_x = page.from_right(QTY_FROM_RIGHT);
    let rate_x = page.from_right(RATE_FROM_RIGHT);
    let amount_x = page.right_edge() - CELL_PADDING;

    page.ops.push(DrawOp::FilledRect {
        x: margin,
        y: TABLE_Y,
        width: page.config.page_width - 2.0 * margin,
        height: TABLE_HEADER_HEIGHT,
        color: page.config.header_color,
    });

    let header_y = TABLE_Y + TABLE_HEADER_BASELINE;
    let bold = FontWeight::Bold;
    page.text_styled("Description", desc_x, header_y, BODY_SIZE, bold, Rgb::WHITE, Align::Left);
    page.text_styled("Qty", qty_x, header_y, BODY_SIZE, bold, Rgb::WHITE, Align::Left);
    page.text_styled("Rate", rate_x, header_y, BODY_SIZE, bold, Rgb::WHITE, Align::Left);
    page.text_styled("Amount", amount_x, header_y, BODY_SIZE, bold, Rgb::WHITE, Align::Right);

    let mut y = TABLE_Y + FIRST_ROW_OFFSET;
    for item in &invoice.items {
        let rate = page.money(item.rate);
        let amount = page.money(item.amount());
        page.text(&item.description, desc_x, y, BODY_SIZE, FontWeight::Normal);
        page.text(format_number(item.quantity), qty_x, y, BODY_SIZE, FontWeight::Normal);
        page.text(rate, rate_x, y, BODY_SIZE, FontWeight::Normal);
        page.text_right(amount, amount_x, y, BODY_SIZE, FontWeight::Normal);
        y += ROW_STEP;
    }
    y
}

/// Draws the totals lines starting below the table. Returns the baseline of
/// the grand total.
fn totals_block(page: &mut Page<'_>, invoice: &Invoice, table_end: f32) -> f32 {
    let totals = invoice.totals();
    let label_x = page.from_right(TOTALS_LABEL_FROM_RIGHT);
    let value_x = page.right_edge() - CELL_PADDING;
    let mut y = table_end + TOTALS_GAP;

    let line = |page: &mut Page<'_>, label: String, value: String, y: f32| {
        page.text(label, label_x, y, BODY_SIZE, FontWeight::Normal);
        page.text_right(value, value_x, y, BODY_SIZE, FontWeight::Normal);
    };

    let subtotal = page.money(totals.subtotal);
    line(page, "Subtotal:".into(), subtotal, y);
    y += ROW_STEP;

    if invoice.tax_rate > Decimal::ZERO {
        let label = format!("Tax ({}%):", format_number(invoice.tax_rate));
        let value = page.money(totals.tax_amount);
        line(page, label, value, y);
        y += ROW_STEP;
    }

    if invoice.discount > Decimal::ZERO {
        let label = match invoice.discount_type {
            DiscountType::Percentage => format!("Discount ({}%):", format_number(invoice.discount)),
            DiscountType::Fixed => "Discount:".to_string(),
        };
        let value = format!("-{}", page.money(totals.discount_amount));
        line(page, label, value, y);
        y += ROW_STEP;
    }

    let total = page.money(totals.total);
    page.text("Total:", label_x, y, SECTION_SIZE, FontWeight::Bold);
    page.text_right(total, value_x, y, SECTION_SIZE, FontWeight::Bold);
    y
}

fn notes_block(page: &mut Page<'_>, notes: &str, totals_end: f32) {
    if notes.trim().is_empty() {
        return;
    }

    let x = page.config.margin;
    let y = totals_end + NOTES_GAP;
    page.text("Notes:", x, y, BODY_SIZE, FontWeight::Bold);

    let width = page.config.page_width - 2.0 * page.config.margin;
    page.ops.push(DrawOp::TextBlock {
        lines: wrap_text(notes, width, BODY_SIZE, FontWeight::Normal),
        x,
        y: y + ROW_STEP,
        size: BODY_SIZE,
        weight: FontWeight::Normal,
        color: Rgb::BLACK,
        line_height: line_height(BODY_SIZE),
    });
}
