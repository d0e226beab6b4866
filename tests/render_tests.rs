#![cfg(feature = "render")]

use chrono::NaiveDate;
use invoicepro::core::*;
use invoicepro::render::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn client() -> Client {
    ClientBuilder::new("Initech")
        .email("ap@initech.test")
        .build(ClientId::new("c-1"))
        .unwrap()
}

fn invoice() -> Invoice {
    InvoiceBuilder::new("INV-2024-0001", date(2024, 6, 15))
        .due_date(date(2024, 7, 15))
        .client(ClientId::new("c-1"))
        .add_item(LineItem::new("Design", dec!(2), dec!(50)))
        .add_item(LineItem::new("Hosting", dec!(1.5), dec!(20)))
        .tax_rate(dec!(10))
        .discount(dec!(5), DiscountType::Fixed)
        .notes("Thank you for your business.")
        .build_unchecked(InvoiceId::new("i-1"))
}

fn render(invoice: &Invoice) -> RenderedDocument {
    render_invoice(
        invoice,
        &client(),
        &CompanyProfile::default(),
        &RenderConfig::default(),
    )
}

fn position(doc: &RenderedDocument, needle: &str) -> (f32, f32, Align) {
    match doc.find_text(needle) {
        Some(DrawOp::Text { x, y, align, .. }) => (*x, *y, *align),
        other => panic!("no text run {needle:?}: {other:?}"),
    }
}

#[test]
fn page_text_in_painting_order() {
    let doc = render(&invoice());
    insta::assert_snapshot!(doc.texts().join("\n"), @r"
    Your Company Name
    company@email.com
    (555) 123-4567
    123 Business St, City, State 12345
    INVOICE
    Invoice #: INV-2024-0001
    Date: 2024-06-15
    Due: 2024-07-15
    Bill To:
    Initech
    ap@initech.test
    Description
    Qty
    Rate
    Amount
    Design
    2
    $50.00
    $100.00
    Hosting
    1.5
    $20.00
    $30.00
    Subtotal:
    $130.00
    Tax (10%):
    $13.00
    Discount:
    -$5.00
    Total:
    $138.00
    Notes:
    Thank you for your business.
    ");
}

#[test]
fn document_title_is_invoice_number() {
    let doc = render(&invoice());
    assert_eq!(doc.title, "INV-2024-0001");
    assert_eq!(doc.page_width, 210.0);
    assert_eq!(doc.page_height, 297.0);
}

#[test]
fn rows_and_totals_follow_item_count() {
    let doc = render(&invoice());

    assert_eq!(position(&doc, "Design"), (25.0, 125.0, Align::Left));
    assert_eq!(position(&doc, "Hosting"), (25.0, 132.0, Align::Left));
    assert_eq!(position(&doc, "$100.00"), (185.0, 125.0, Align::Right));
    assert_eq!(position(&doc, "1.5"), (120.0, 132.0, Align::Left));
    assert_eq!(position(&doc, "$20.00"), (150.0, 132.0, Align::Left));

    assert_eq!(position(&doc, "Subtotal:"), (140.0, 149.0, Align::Left));
    assert_eq!(position(&doc, "Tax (10%):").1, 156.0);
    assert_eq!(position(&doc, "Discount:").1, 163.0);
    assert_eq!(position(&doc, "Total:").1, 170.0);
    assert_eq!(position(&doc, "Notes:").1, 190.0);
}

#[test]
fn header_band_spans_the_content_width() {
    let doc = render(&invoice());
    let rect = doc
        .ops
        .iter()
        .find(|op| matches!(op, DrawOp::FilledRect { .. }))
        .unwrap();
    assert_eq!(
        rect,
        &DrawOp::FilledRect {
            x: 20.0,
            y: 110.0,
            width: 170.0,
            height: 10.0,
            color: Rgb(100, 100, 255),
        }
    );
    assert_eq!(rect.to_string(), "rect 20.0,110.0 170.0x10.0 #6464ff");
}

#[test]
fn zero_tax_and_discount_lines_are_omitted() {
    let inv = InvoiceBuilder::from_invoice(&invoice())
        .tax_rate(dec!(0))
        .discount(dec!(0), DiscountType::Percentage)
        .notes("")
        .build_unchecked(InvoiceId::new("i-1"));
    let doc = render(&inv);

    assert!(doc.texts().iter().all(|t| !t.starts_with("Tax")));
    assert!(doc.texts().iter().all(|t| !t.starts_with("Discount")));
    assert!(doc.find_text("Notes:").is_none());
    assert_eq!(position(&doc, "Total:").1, 156.0);
    assert!(doc.find_text("$130.00").is_some());
}

#[test]
fn percentage_discount_label_shows_rate() {
    let inv = InvoiceBuilder::from_invoice(&invoice())
        .discount(dec!(12.5), DiscountType::Percentage)
        .build_unchecked(InvoiceId::new("i-1"));
    let doc = render(&inv);
    assert!(doc.find_text("Discount (12.5%):").is_some());
    // 130 × 12.5% = 16.25
    assert!(doc.find_text("-$16.25").is_some());
}

#[test]
fn negative_total_is_rendered_as_is() {
    let inv = InvoiceBuilder::new("INV-2024-0002", date(2024, 6, 15))
        .due_date(date(2024, 7, 15))
        .client(ClientId::new("c-1"))
        .add_item(LineItem::new("Credit", dec!(1), dec!(200)))
        .discount(dec!(250), DiscountType::Fixed)
        .build_unchecked(InvoiceId::new("i-2"));
    let doc = render(&inv);
    assert!(doc.find_text("-$50.00").is_some());
    assert!(doc.find_text("-$250.00").is_some());
}

#[test]
fn empty_item_list_still_renders_totals() {
    let inv = InvoiceBuilder::new("INV-2024-0003", date(2024, 6, 15))
        .client(ClientId::new("c-1"))
        .build_unchecked(InvoiceId::new("i-3"));
    let doc = render(&inv);

    assert_eq!(position(&doc, "Subtotal:").1, 135.0);
    assert!(doc.find_text("Due: ").is_some());
    assert!(doc.find_text("$0.00").is_some());
}

#[test]
fn long_notes_wrap_within_the_margins() {
    let notes = "Payment is due within thirty days of the invoice date. \
                 Please include the invoice number with your transfer so we can match it.";
    let inv = InvoiceBuilder::from_invoice(&invoice())
        .notes(notes)
        .build_unchecked(InvoiceId::new("i-1"));
    let doc = render(&inv);

    let Some(DrawOp::TextBlock { lines, x, y, .. }) = doc
        .ops
        .iter()
        .find(|op| matches!(op, DrawOp::TextBlock { .. }))
    else {
        panic!("notes block missing");
    };
    assert_eq!((*x, *y), (20.0, 197.0));
    assert!(lines.len() > 1);
    for line in lines {
        assert!(text_width(line, 10.0, FontWeight::Normal) <= 170.0, "{line}");
    }
    assert_eq!(lines.join(" "), notes);
}

#[test]
fn currency_symbol_is_configurable() {
    let config = RenderConfig {
        currency_symbol: "€".into(),
        ..RenderConfig::default()
    };
    let doc = render_invoice(&invoice(), &client(), &CompanyProfile::default(), &config);
    assert!(doc.find_text("€138.00").is_some());
    assert!(doc.find_text("-€5.00").is_some());
}

#[test]
fn listing_has_one_entry_per_op() {
    let doc = render(&invoice());
    let listing = doc.listing();
    assert!(listing.starts_with("text 20.0,20.0 24pt bold left #000000 \"Your Company Name\""));
    assert!(listing.contains("text 185.0,125.0 10pt normal right #000000 \"$100.00\""));
    assert!(listing.contains("block 20.0,197.0 10pt normal"));
}
